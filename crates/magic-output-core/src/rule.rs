use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::ConfigError;
use crate::ir::Span;

/// Serializable form of a single keyword pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermSpec {
    /// Regular-expression fragment, matched case-insensitively anywhere in the line.
    pub pattern: String,
    /// Only match as a standalone word.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub word: bool,
    /// Occurrences directly preceded by text matching this pattern are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_after: Option<String>,
}

impl TermSpec {
    pub fn keyword(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            word: false,
            not_after: None,
        }
    }

    pub fn word(pattern: impl Into<String>) -> Self {
        Self {
            word: true,
            ..Self::keyword(pattern)
        }
    }

    pub fn not_after(mut self, exclusion: impl Into<String>) -> Self {
        self.not_after = Some(exclusion.into());
        self
    }
}

/// Serializable form of a [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    pub category: Category,
    pub terms: Vec<TermSpec>,
}

impl RuleSpec {
    pub fn new(category: Category, terms: Vec<TermSpec>) -> Self {
        Self { category, terms }
    }
}

/// Serializable form of a whole [`RuleTable`](crate::RuleTable), highest priority first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableSpec {
    pub rules: Vec<RuleSpec>,
}

/// A keyword whose matches carry an exclusion check.
#[derive(Debug)]
struct GuardedTerm {
    regex: Regex,
    not_after: Regex,
}

impl GuardedTerm {
    /// First occurrence that is not preceded by the exclusion.
    ///
    /// Every start position is tried, so an accepted occurrence that begins
    /// inside a rejected one is still found.
    fn find(&self, line: &str) -> Option<Span> {
        let mut start = 0;
        while let Some(m) = self.regex.find_at(line, start) {
            if !self.not_after.is_match(&line[..m.start()]) {
                return Some(Span::new(m.start(), m.end()));
            }
            match line[m.start()..].chars().next() {
                Some(c) => start = m.start() + c.len_utf8(),
                None => break,
            }
        }
        None
    }
}

/// A compiled (Category, Matcher) pair.
///
/// Unguarded terms are folded into one alternation; terms with a `not_after`
/// exclusion are checked one by one, occurrence by occurrence.
#[derive(Debug)]
pub struct Rule {
    category: Category,
    specs: Vec<TermSpec>,
    plain: Option<Regex>,
    guarded: Vec<GuardedTerm>,
}

impl Rule {
    pub fn compile(index: usize, spec: &RuleSpec) -> Result<Self, ConfigError> {
        let category = spec.category;
        if spec.terms.is_empty() {
            return Err(ConfigError::EmptyRule { category, index });
        }

        let mut plain_fragments = Vec::new();
        let mut guarded = Vec::new();

        for term in &spec.terms {
            if term.pattern.is_empty() {
                return Err(ConfigError::EmptyPattern { category });
            }
            let fragment = if term.word {
                format!(r"\b(?:{})\b", term.pattern)
            } else {
                format!("(?:{})", term.pattern)
            };
            // Compiled on its own first so errors name the offending pattern.
            let regex = Regex::new(&format!("(?i){fragment}")).map_err(|source| {
                ConfigError::InvalidPattern {
                    category,
                    pattern: term.pattern.clone(),
                    source,
                }
            })?;

            match &term.not_after {
                None => plain_fragments.push(fragment),
                Some(exclusion) => {
                    if exclusion.is_empty() {
                        return Err(ConfigError::EmptyPattern { category });
                    }
                    let not_after = Regex::new(&format!("(?i)(?:{exclusion})$")).map_err(
                        |source| ConfigError::InvalidExclusion {
                            category,
                            pattern: exclusion.clone(),
                            source,
                        },
                    )?;
                    guarded.push(GuardedTerm { regex, not_after });
                }
            }
        }

        let plain = if plain_fragments.is_empty() {
            None
        } else {
            let joined = format!("(?i){}", plain_fragments.join("|"));
            Some(
                Regex::new(&joined).map_err(|source| ConfigError::InvalidPattern {
                    category,
                    pattern: joined.clone(),
                    source,
                })?,
            )
        };

        Ok(Self {
            category,
            specs: spec.terms.clone(),
            plain,
            guarded,
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.plain.as_ref().is_some_and(|re| re.is_match(line))
            || self.guarded.iter().any(|term| term.find(line).is_some())
    }

    /// Earliest accepted occurrence of any term.
    pub fn find(&self, line: &str) -> Option<Span> {
        let plain = self
            .plain
            .as_ref()
            .and_then(|re| re.find(line))
            .map(|m| Span::new(m.start(), m.end()));

        self.guarded
            .iter()
            .filter_map(|term| term.find(line))
            .chain(plain)
            .min_by_key(|span| span.start)
    }

    pub fn to_spec(&self) -> RuleSpec {
        RuleSpec::new(self.category, self.specs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(terms: Vec<TermSpec>) -> Rule {
        Rule::compile(0, &RuleSpec::new(Category::Error, terms)).unwrap()
    }

    #[test]
    fn test_guarded_term_skips_excluded_occurrence() {
        let r = rule(vec![TermSpec::keyword("failed").not_after(r"0\s")]);
        assert!(!r.is_match("0 failed"));
        // Second occurrence is not excluded.
        assert_eq!(r.find("0 failed, 2 failed"), Some(Span::new(12, 18)));
    }

    #[test]
    fn test_occurrence_inside_rejected_match() {
        // "aab" at 1 is excluded, but "ab" at 2 follows "xa" and is accepted.
        let r = rule(vec![TermSpec::keyword("a+b").not_after("x")]);
        assert!(r.is_match("xaab"));
        assert_eq!(r.find("xaab"), Some(Span::new(2, 4)));
        assert!(!r.is_match("xab"));
    }

    #[test]
    fn test_guarded_term_multibyte_retry() {
        let r = rule(vec![TermSpec::keyword("é+t").not_after("x")]);
        assert_eq!(r.find("xéét"), Some(Span::new(3, 6)));
    }

    #[test]
    fn test_find_prefers_earliest_term() {
        let r = rule(vec![
            TermSpec::keyword("fatal"),
            TermSpec::keyword("failed").not_after(r"0\s"),
        ]);
        assert_eq!(r.find("task failed: fatal"), Some(Span::new(5, 11)));
        assert_eq!(r.find("fatal: task failed"), Some(Span::new(0, 5)));
    }

    #[test]
    fn test_word_boundary() {
        let r = rule(vec![TermSpec::word("fail")]);
        assert!(r.is_match("FAIL: test_x"));
        assert!(!r.is_match("failing"));
    }

    #[test]
    fn test_empty_rule_rejected() {
        let err = Rule::compile(3, &RuleSpec::new(Category::Info, vec![])).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyRule { index: 3, .. }));
    }

    #[test]
    fn test_bad_exclusion_rejected() {
        let err = Rule::compile(
            0,
            &RuleSpec::new(Category::Error, vec![TermSpec::keyword("x").not_after("(")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidExclusion { .. }));
    }

    #[test]
    fn test_term_spec_serde_omits_defaults() {
        let json = serde_json::to_string(&TermSpec::keyword("done")).unwrap();
        assert_eq!(json, r#"{"pattern":"done"}"#);
        let spec: TermSpec = serde_json::from_str(r#"{"pattern":"ok","word":true}"#).unwrap();
        assert_eq!(spec, TermSpec::word("ok"));
    }
}
