use once_cell::sync::Lazy;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::category::Category;
use crate::error::ConfigError;
use crate::rule::{Rule, RuleSpec, TableSpec, TermSpec};

static REFERENCE: Lazy<Arc<RuleTable>> =
    Lazy::new(|| Arc::new(RuleTable::preset(Preset::Reference)));

/// Built-in vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// The classic keyword list. "0 failed" is the only exclusion, so count
    /// summaries such as "0 errors" still classify as errors.
    #[default]
    Reference,
    /// Same keywords and priorities, but zero-count summaries ("0 errors",
    /// "no warnings", "0 failed") do not trigger Error or Warning.
    CountAware,
}

/// Exclusion shared by every count-aware guard.
const ZERO_COUNT: &str = r"\b(?:0|no)\s+";

impl Preset {
    pub fn specs(self) -> Vec<RuleSpec> {
        match self {
            Preset::Reference => reference_specs(),
            Preset::CountAware => count_aware_specs(),
        }
    }
}

fn reference_specs() -> Vec<RuleSpec> {
    vec![
        RuleSpec::new(
            Category::Error,
            vec![
                TermSpec::keyword("error"),
                TermSpec::keyword("exception"),
                TermSpec::keyword("failed").not_after(r"0\s"),
                TermSpec::keyword("failure"),
                TermSpec::keyword("fatal"),
                TermSpec::keyword("critical"),
                TermSpec::word("fail"),
            ],
        ),
        RuleSpec::new(
            Category::Warning,
            vec![
                TermSpec::keyword("warning"),
                TermSpec::keyword("warn"),
                TermSpec::keyword("caution"),
                TermSpec::keyword("deprecated"),
            ],
        ),
        RuleSpec::new(
            Category::Success,
            vec![
                TermSpec::keyword("success"),
                TermSpec::keyword("succeeded"),
                TermSpec::keyword("completed"),
                TermSpec::keyword("passed"),
                TermSpec::keyword("done"),
                TermSpec::word("ok"),
                TermSpec::keyword("build succeeded"),
            ],
        ),
        RuleSpec::new(
            Category::Debug,
            vec![TermSpec::keyword("debug"), TermSpec::keyword("verbose")],
        ),
        RuleSpec::new(
            Category::Trace,
            vec![TermSpec::keyword("trace"), TermSpec::keyword("tracing")],
        ),
        RuleSpec::new(
            Category::Info,
            vec![
                TermSpec::keyword("info"),
                TermSpec::keyword("information"),
                TermSpec::keyword("note"),
                TermSpec::keyword("starting"),
                TermSpec::keyword("building"),
            ],
        ),
    ]
}

fn count_aware_specs() -> Vec<RuleSpec> {
    let mut specs = reference_specs();
    for rule in &mut specs {
        for term in &mut rule.terms {
            let guarded = matches!(
                (rule.category, term.pattern.as_str()),
                (Category::Error, "error" | "failed") | (Category::Warning, "warning" | "warn")
            );
            if guarded {
                term.not_after = Some(ZERO_COUNT.to_string());
            }
        }
    }
    specs
}

/// Ordered, immutable list of compiled rules. Position is priority.
#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::preset(Preset::Reference)
    }
}

impl RuleTable {
    /// Compiles `specs` in order. Fails on the first bad rule; no partial table is returned.
    pub fn from_specs(specs: impl IntoIterator<Item = RuleSpec>) -> Result<Self, ConfigError> {
        let rules = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| Rule::compile(index, &spec))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("compiled rule table with {} rules", rules.len());
        Ok(Self { rules })
    }

    /// Parses a JSON [`TableSpec`] document and compiles it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let spec: TableSpec = serde_json::from_str(text)?;
        Self::from_specs(spec.rules)
    }

    /// Reads and compiles a JSON rule table from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loading rule table from {}", path.display());
        Self::from_json(&text)
    }

    /// Compiles a built-in vocabulary. Its patterns are fixed, so this cannot fail at runtime.
    pub fn preset(preset: Preset) -> Self {
        Self::from_specs(preset.specs())
            .unwrap_or_else(|err| panic!("built-in {preset:?} vocabulary does not compile: {err}"))
    }

    /// Shared, lazily compiled reference table.
    pub fn reference() -> Arc<RuleTable> {
        Arc::clone(&REFERENCE)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Categories in priority order, as they appear in the table.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.rules.iter().map(Rule::category)
    }

    pub fn to_specs(&self) -> TableSpec {
        TableSpec {
            rules: self.rules.iter().map(Rule::to_spec).collect(),
        }
    }
}
