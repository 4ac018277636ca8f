use std::fmt;
use std::ops::Range;

use crate::diagnostics::Diagnostic;

/// A fatal problem that aborts loading a world file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    /// 1-based line number, 0 when no single line is to blame.
    pub line: usize,
    /// Byte range of the offending line.
    pub span: Range<usize>,
    pub message: String,
}

impl LoadError {
    pub fn new(line: usize, span: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            line,
            span,
            message: message.into(),
        }
    }

    /// An error not tied to any line, such as an unreadable file.
    pub fn general(message: impl Into<String>) -> Self {
        Self::new(0, 0..0, message)
    }

    /// Convert into a diagnostic for rendering alongside warnings.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.line, self.span.clone(), self.message.clone())
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "line {}: {}", self.line, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for LoadError {}

/// Alias for `Result<T, LoadError>`.
pub type LoadResult<T> = Result<T, LoadError>;
