use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Byte range, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Moves the span forward by `base` bytes.
    pub fn shift(self, base: usize) -> Self {
        Self::new(self.start + base, self.end + base)
    }
}

/// Outcome of classifying one line that matched a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    /// Keyword occurrence that decided the label, relative to the line.
    pub trigger: Span,
}

/// One logical line produced by a [`LineStream`](crate::LineStream).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineEvent {
    /// Zero-based line number within the stream.
    pub line: usize,
    /// Absolute byte range of the line content, terminator excluded.
    pub span: Span,
    /// Line content without its terminator.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category: Option<Category>,
    /// Absolute byte range of the trigger keyword.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trigger: Option<Span>,
}

impl LineEvent {
    pub(crate) fn new(
        line: usize,
        span: Span,
        text: &str,
        classification: Option<Classification>,
    ) -> Self {
        Self {
            line,
            span,
            text: text.to_string(),
            category: classification.map(|c| c.category),
            trigger: classification.map(|c| c.trigger.shift(span.start)),
        }
    }
}
