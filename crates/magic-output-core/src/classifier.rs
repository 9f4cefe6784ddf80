use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

use crate::category::Category;
use crate::ir::Classification;
use crate::table::RuleTable;

/// Assigns at most one [`Category`] to a line of output.
///
/// Rules are tried in table order and the first match wins, so a line that
/// mentions both "error" and "succeeded" is an error. The classifier holds no
/// mutable state; clones share the same compiled table.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: Arc<RuleTable>,
}

impl Default for Classifier {
    /// A classifier over the shared reference vocabulary.
    fn default() -> Self {
        Self::with_shared(RuleTable::reference())
    }
}

impl From<RuleTable> for Classifier {
    fn from(table: RuleTable) -> Self {
        Self::new(table)
    }
}

impl Classifier {
    pub fn new(table: RuleTable) -> Self {
        Self::with_shared(Arc::new(table))
    }

    pub fn with_shared(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Returns the category of the first rule that matches `line`.
    ///
    /// Empty and whitespace-only lines never match.
    pub fn classify(&self, line: &str) -> Option<Category> {
        if line.trim().is_empty() {
            return None;
        }
        self.table
            .rules()
            .iter()
            .find(|rule| rule.is_match(line))
            .map(|rule| rule.category())
    }

    /// Like [`classify`](Self::classify), also locating the keyword that decided it.
    pub fn classify_line(&self, line: &str) -> Option<Classification> {
        if line.trim().is_empty() {
            return None;
        }
        let classification = self.table.rules().iter().find_map(|rule| {
            rule.find(line).map(|trigger| Classification {
                category: rule.category(),
                trigger,
            })
        });
        log::trace!("{:?} <- {:?}", classification.map(|c| c.category), line);
        classification
    }

    /// Classifies each line in order.
    pub fn classify_lines<'a, I>(&self, lines: I) -> Vec<Option<Category>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines.into_iter().map(|line| self.classify(line)).collect()
    }

    /// Classifies a batch on scoped worker threads. Output order matches input order.
    pub fn classify_parallel(&self, lines: &[&str]) -> Vec<Option<Category>> {
        let workers = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        if workers < 2 || lines.len() < 2 {
            return self.classify_lines(lines.iter().copied());
        }

        let chunk_size = lines.len().div_ceil(workers);
        thread::scope(|scope| {
            let handles: Vec<_> = lines
                .chunks(chunk_size)
                .map(|chunk| scope.spawn(move || self.classify_lines(chunk.iter().copied())))
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(results) => results,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Span;

    #[test]
    fn test_classify_line_reports_trigger() {
        let classifier = Classifier::default();
        let result = classifier
            .classify_line("MSB3073: The command exited, build FAILED.")
            .unwrap();
        assert_eq!(result.category, Category::Error);
        assert_eq!(result.trigger, Span::new(35, 41));
    }

    #[test]
    fn test_first_rule_wins_not_earliest_keyword() {
        // "Done" appears before "error" but Error has higher priority.
        let classifier = Classifier::default();
        let result = classifier.classify_line("Done with 1 error").unwrap();
        assert_eq!(result.category, Category::Error);
        assert_eq!(result.trigger, Span::new(12, 17));
    }

    #[test]
    fn test_parallel_keeps_order() {
        let classifier = Classifier::default();
        let lines: Vec<&str> = ["error", "", "ok", "note"].repeat(50);
        assert_eq!(
            classifier.classify_parallel(&lines),
            classifier.classify_lines(lines.iter().copied())
        );
    }

    #[test]
    fn test_empty_table_matches_nothing() {
        let classifier = Classifier::new(RuleTable::from_specs(Vec::new()).unwrap());
        assert_eq!(classifier.classify("fatal error"), None);
    }
}
