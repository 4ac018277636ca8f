use ariadne::{Color, Label, Report, ReportKind, Source};
use std::fmt;
use std::ops::Range;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic message tied to a line of a world file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// 1-based line number, 0 when the problem has no single line.
    pub line: usize,
    /// Byte range of the offending text in the source.
    pub span: Range<usize>,
    pub message: String,
    pub label: Option<String>,
}

impl Diagnostic {
    pub fn error(line: usize, span: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            line,
            span,
            message: message.into(),
            label: None,
        }
    }

    pub fn warning(line: usize, span: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            line,
            span,
            message: message.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        if self.line > 0 {
            write!(f, "{prefix}: line {}: {}", self.line, self.message)
        } else {
            write!(f, "{prefix}: {}", self.message)
        }
    }
}

/// Render diagnostics using ariadne for pretty terminal output.
pub fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) -> String {
    let mut output = Vec::new();

    for diag in diagnostics {
        let kind = match diag.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
        };
        let color = match diag.severity {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
        };

        // Clamp so a stale span never points past the end of the source.
        let end = diag.span.end.min(source.len());
        let span = diag.span.start.min(end)..end;

        let mut report = Report::build(kind, (filename, span.clone())).with_message(&diag.message);

        let label_text = diag.label.as_deref().unwrap_or(&diag.message);
        report = report.with_label(
            Label::new((filename, span))
                .with_message(label_text)
                .with_color(color),
        );

        report
            .finish()
            .write((filename, Source::from(source)), &mut output)
            .ok();
    }

    String::from_utf8(output).unwrap_or_default()
}
