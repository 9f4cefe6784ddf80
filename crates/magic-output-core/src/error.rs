use std::path::PathBuf;
use thiserror::Error;

use crate::category::Category;

/// Raised while building a [`RuleTable`](crate::RuleTable).
///
/// Construction is all-or-nothing: any of these aborts the whole table.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{category} rule at position {index} has no terms")]
    EmptyRule { category: Category, index: usize },

    #[error("{category} rule has an empty pattern")]
    EmptyPattern { category: Category },

    #[error("invalid pattern `{pattern}` in {category} rule: {source}")]
    InvalidPattern {
        category: Category,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid exclusion `{pattern}` in {category} rule: {source}")]
    InvalidExclusion {
        category: Category,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("malformed rule table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("cannot read rule table {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A category name that is not one of the six known labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category `{0}`")]
pub struct ParseCategoryError(pub String);
