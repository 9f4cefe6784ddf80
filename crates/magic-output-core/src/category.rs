use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseCategoryError;

/// Severity label assigned to a line of output.
///
/// The set is closed. Variants are listed in the default priority order,
/// which is also the order of [`Category::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Error,
    Warning,
    Success,
    Debug,
    Trace,
    Info,
}

impl Category {
    /// Every category, highest priority first.
    pub const ALL: [Category; 6] = [
        Category::Error,
        Category::Warning,
        Category::Success,
        Category::Debug,
        Category::Trace,
        Category::Info,
    ];

    /// Lower-case name used in rule files and JSON output.
    pub fn name(self) -> &'static str {
        match self {
            Category::Error => "error",
            Category::Warning => "warning",
            Category::Success => "success",
            Category::Debug => "debug",
            Category::Trace => "trace",
            Category::Info => "info",
        }
    }

    /// Classification-type name a host registers its styles under, e.g. `output.error`.
    pub fn classification_type(self) -> &'static str {
        match self {
            Category::Error => "output.error",
            Category::Warning => "output.warning",
            Category::Success => "output.success",
            Category::Debug => "output.debug",
            Category::Trace => "output.trace",
            Category::Info => "output.info",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Accepts both the short name (`warning`) and the classification-type
    /// name (`output.warning`), ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lowered = trimmed.to_ascii_lowercase();
        let name = lowered.strip_prefix("output.").unwrap_or(&lowered);
        Category::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| ParseCategoryError(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_name_forms() {
        assert_eq!("error".parse::<Category>().unwrap(), Category::Error);
        assert_eq!("Output.Trace".parse::<Category>().unwrap(), Category::Trace);
        assert_eq!(" INFO ".parse::<Category>().unwrap(), Category::Info);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "fatal".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category `fatal`");
    }

    #[test]
    fn test_display_matches_serde() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category));
        }
    }
}
