//! # magic-output core
//!
//! Severity classifier for build and tool output.
//!
//! ## Overview
//!
//! Given a single line of output, the [`Classifier`] decides at most one
//! [`Category`] for it: error, warning, success, debug, trace or info. A host
//! (terminal, editor pane, log viewer) maps that category to a style; colors
//! and fonts are not this crate's concern.
//!
//! - **Ordered rules**: a [`RuleTable`] holds (category, matcher) pairs; table
//!   position is priority and the first matching rule wins
//! - **Keyword terms**: case-insensitive search anywhere in the line, optional
//!   standalone-word matching, optional `not_after` exclusions
//! - **Streaming**: [`LineStream`] classifies growing output chunk by chunk
//! - **Shared state**: compiled tables are immutable and `Send + Sync`
//!
//! ## Architecture
//!
//! ```text
//! RuleSpec (JSON / preset) ──compile──► RuleTable ──Arc──► Classifier
//!                                                              │
//!               chunks ──update()──► LineStream ──classify_line()
//!                                         │
//!                                         ▼
//!                                  Vec<LineEvent>
//! ```
//!
//! ## Default vocabulary
//!
//! | Priority | Category | Keywords |
//! |---|---|---|
//! | 1 | Error | error, exception, failed (not after `0 `), failure, fatal, critical, word `fail` |
//! | 2 | Warning | warning, warn, caution, deprecated |
//! | 3 | Success | success, succeeded, completed, passed, done, word `ok`, build succeeded |
//! | 4 | Debug | debug, verbose |
//! | 5 | Trace | trace, tracing |
//! | 6 | Info | info, information, note, starting, building |
//!
//! Matching is substring based, so "0 errors" is an error under this
//! vocabulary. [`Preset::CountAware`] adds exclusions for zero-count summaries.
//!
//! ## Examples
//!
//! ### Single lines
//!
//! ```
//! use magic_output_core::{Category, Classifier};
//!
//! let classifier = Classifier::default();
//! assert_eq!(classifier.classify("error CS1002: ; expected"), Some(Category::Error));
//! assert_eq!(classifier.classify("WARNING: deprecated API used"), Some(Category::Warning));
//! assert_eq!(classifier.classify("Tests: 12 passed, 0 failed"), Some(Category::Success));
//! assert_eq!(classifier.classify("   "), None);
//! ```
//!
//! ### Streaming output
//!
//! ```
//! use magic_output_core::{Category, LineStream};
//!
//! let mut stream = LineStream::default();
//! let mut events = stream.update("Starting build...\nwarn");
//! events.extend(stream.update("ing: unused variable\n"));
//! events.extend(stream.finish());
//!
//! let labels: Vec<_> = events.iter().map(|e| e.category).collect();
//! assert_eq!(labels, [Some(Category::Info), Some(Category::Warning)]);
//! ```
//!
//! ### Custom rule tables
//!
//! ```
//! use magic_output_core::{Category, Classifier, RuleTable};
//!
//! let table = RuleTable::from_json(r#"{
//!     "rules": [
//!         { "category": "error", "terms": [{ "pattern": "panicked" }] },
//!         { "category": "success", "terms": [{ "pattern": "ok", "word": true }] }
//!     ]
//! }"#)?;
//! let classifier = Classifier::new(table);
//! assert_eq!(classifier.classify("thread 'main' panicked"), Some(Category::Error));
//! assert_eq!(classifier.classify("token accepted"), None);
//! # Ok::<(), magic_output_core::ConfigError>(())
//! ```

/// Severity labels.
pub mod category;
/// Line classification.
pub mod classifier;
/// Construction errors.
pub mod error;
/// Spans and event types.
pub mod ir;
/// Compiled rules and their serializable specs.
pub mod rule;
/// Incremental line splitting.
pub mod stream;
/// Rule tables and built-in vocabularies.
pub mod table;


pub use category::Category;
pub use classifier::Classifier;
pub use error::{ConfigError, ParseCategoryError};
pub use ir::{Classification, LineEvent, Span};
pub use rule::{Rule, RuleSpec, TableSpec, TermSpec};
pub use stream::LineStream;
pub use table::{Preset, RuleTable};

/// Schema version of the serialized [`LineEvent`] and [`TableSpec`] formats.
///
/// - MAJOR: breaking changes to field names or structure
/// - MINOR: new optional fields
/// - PATCH: classification fixes with no format change
pub const SCHEMA_VERSION: &str = "1.0.0";
