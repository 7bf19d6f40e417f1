use std::{borrow::Cow, fmt};

use annotate_snippets::snippet::AnnotationType;
use bop_common::Span;

use super::{
    snippet::{Marker, Report},
    utils::display_expected_of_any,
    AsAnnotationSnippet,
};

/// Thrown when a block query string cannot be compiled
///
/// Contains the location in the query where the error occurred and the
/// offending text, so that the message stays readable without the source.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct QueryError {
    pub kind: QueryErrorKind,
    pub span: Span,
    /// The text covered by `span`
    pub snippet: String,
}

/// Specifies why a query could not be parsed
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum QueryErrorKind {
    /// The input does not match the token grammar at this position
    Syntax {
        /// Descriptions of what would have been accepted instead
        expected: Vec<String>,
    },
    /// A bracket clause is not of the form `name=value|value` or `value|value`
    MalformedProperty,
    /// A sigil-qualified name does not resolve
    UnknownReference { kind: ReferenceKind, name: String },
}

/// The kind of name an [`QueryErrorKind::UnknownReference`] failed to resolve
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum ReferenceKind {
    Block,
    Class,
    Material,
    Predefined,
}

impl QueryError {
    pub fn new(kind: QueryErrorKind, span: Span, source: &str) -> Self {
        QueryError {
            kind,
            span,
            snippet: span.text(source).to_string(),
        }
    }

    /// Whether this error was caused by malformed input rather than an unknown name
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self.kind,
            QueryErrorKind::Syntax { .. } | QueryErrorKind::MalformedProperty
        )
    }

    /// Returns the name that failed to resolve, if this is an unknown reference
    pub fn unknown_reference(&self) -> Option<(ReferenceKind, &str)> {
        match &self.kind {
            QueryErrorKind::UnknownReference { kind, name } => Some((*kind, name.as_str())),
            _ => None,
        }
    }

    /// Renders this error against the query it was produced from
    pub fn format(&self, source: &str) -> String {
        <Self as AsAnnotationSnippet>::to_string(self, source)
    }

    fn help(&self) -> Option<Cow<'static, str>> {
        match &self.kind {
            QueryErrorKind::Syntax { expected } => {
                Some(Cow::Owned(display_expected_of_any(expected)))
            }
            QueryErrorKind::MalformedProperty => Some(Cow::Borrowed(
                "Property clauses look like `name=value|value` or `value|value`",
            )),
            QueryErrorKind::UnknownReference {
                kind: ReferenceKind::Class,
                ..
            } => Some(Cow::Borrowed(
                "Class names are looked up as-is, then under `biomesoplenty.common.block.` and `net.minecraft.block.`",
            )),
            QueryErrorKind::UnknownReference { .. } => None,
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceKind::Block => "block",
            ReferenceKind::Class => "block class",
            ReferenceKind::Material => "block material",
            ReferenceKind::Predefined => "predefined query",
        };
        f.write_str(name)
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            QueryErrorKind::Syntax { .. } | QueryErrorKind::MalformedProperty => {
                write!(f, "Syntax error in '{}'", self.snippet)
            }
            QueryErrorKind::UnknownReference { kind, name } => match kind {
                ReferenceKind::Block => write!(f, "No block called {name}"),
                ReferenceKind::Class => {
                    write!(f, "No class found extending from Block called {name}")
                }
                ReferenceKind::Material => write!(f, "No block material found called {name}"),
                ReferenceKind::Predefined => write!(f, "No predefined query named {name}"),
            },
        }
    }
}

impl std::error::Error for QueryError {}

impl<'a> AsAnnotationSnippet<'a> for QueryError {
    fn as_annotation_snippet(&self, source: &'a str) -> Report<'a> {
        // Errors at the end of the input have no width, point at the last character instead
        let range = if self.span.is_empty() && self.span.start() > 0 {
            let previous = source
                .get(..self.span.start())
                .unwrap_or_default()
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            Span::new(self.span.start() - previous, previous)
        } else {
            self.span
        };

        let label = match &self.kind {
            QueryErrorKind::UnknownReference { kind, .. } => format!("Unknown {kind}"),
            QueryErrorKind::Syntax { .. } | QueryErrorKind::MalformedProperty => {
                "Error Here".to_string()
            }
        };

        Report {
            id: "Query",
            title: format!("{self}"),
            marker: Some(Marker {
                source,
                span: range,
                label,
            }),
            help: self.help().map(|help| (AnnotationType::Info, help)),
        }
    }
}

#[cfg(test)]
mod tests {
    use bop_common::Span;

    use super::{QueryError, QueryErrorKind, ReferenceKind};

    #[test]
    fn messages_name_the_offending_text() {
        let source = "sand,bogus";
        let error = QueryError::new(
            QueryErrorKind::UnknownReference {
                kind: ReferenceKind::Block,
                name: "bogus".to_string(),
            },
            Span::new(5, 5),
            source,
        );
        assert_eq!(error.snippet, "bogus");
        assert_eq!(error.to_string(), "No block called bogus");
        assert!(!error.is_syntax_error());
        assert_eq!(
            error.unknown_reference(),
            Some((ReferenceKind::Block, "bogus"))
        );

        let rendered = error.format(source);
        assert!(rendered.contains("No block called bogus"));
        assert!(rendered.contains("sand,bogus"));
    }

    #[test]
    fn syntax_errors_at_end_of_input_render() {
        let source = "[";
        let error = QueryError::new(
            QueryErrorKind::Syntax {
                expected: vec!["query term".to_string()],
            },
            Span::new(0, 1),
            source,
        );
        assert!(error.is_syntax_error());
        assert_eq!(error.to_string(), "Syntax error in '['");
        assert!(error.format(source).contains("Expected query term"));

        let at_end = QueryError::new(
            QueryErrorKind::Syntax {
                expected: Vec::new(),
            },
            Span::new(4, 0),
            "sand",
        );
        assert!(at_end.format("sand").contains("Syntax error"));
    }
}
