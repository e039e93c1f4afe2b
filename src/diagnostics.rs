//! Diagnostic reporting with source locations
//!
//! Parse errors carry spans; this module attaches the source text to them and
//! renders them with miette.

use crate::common::Span;
use crate::parser::ParseError;
use miette::{NamedSource, SourceSpan};
use std::sync::Arc;

/// Source file for error reporting
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content: Arc<str>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Arc::from(content.into()),
        }
    }

    pub fn to_named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.name.clone(), self.content.to_string())
    }
}

/// Convert our Span to miette's SourceSpan
impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.len())
    }
}

/// Error reporter that collects syntax errors for one source file
pub struct Reporter {
    source: SourceFile,
    errors: Vec<ParseError>,
}

impl Reporter {
    pub fn new(source: SourceFile) -> Self {
        Self {
            source,
            errors: Vec::new(),
        }
    }

    pub fn error(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = ParseError>) {
        self.errors.extend(errors);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Get the source file
    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    /// Render every error against the source text
    pub fn render_all(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|error| {
                let report = miette::Report::new(error.clone())
                    .with_source_code(self.source.to_named_source());
                format!("{:?}", report)
            })
            .collect()
    }

    /// Print all diagnostics
    pub fn emit_all(&self) {
        for rendered in self.render_all() {
            eprintln!("{}", rendered);
        }
    }

    /// Get errors by reference
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_conversion() {
        let span: SourceSpan = Span::new(4, 7).into();
        assert_eq!(span.offset(), 4);
        assert_eq!(span.len(), 3);
    }

    #[test]
    fn test_reporter_collects_parse_errors() {
        let source = "let x 5;";
        let (_, errors) = crate::parser::parse(source);
        let mut reporter = Reporter::new(SourceFile::new("test.mk", source));
        reporter.extend(errors);

        assert!(reporter.has_errors());
        assert_eq!(reporter.error_count(), 1);
        let rendered = reporter.render_all();
        assert!(rendered[0].contains("expected next token to be =, got INT instead"));
    }
}
