//! Errors as `annotate_snippets` reports
use std::borrow::Cow;

use annotate_snippets::{
    display_list::{DisplayList, FormatOptions},
    snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation},
};

use bop_common::Span;

/// Marks the part of a query an error is about
#[derive(Debug)]
pub struct Marker<'a> {
    pub source: &'a str,
    /// Byte span into `source`
    pub span: Span,
    pub label: String,
}

/// Everything needed to render one error
///
/// `annotate_snippets` only borrows its input, so a report owns the strings
/// its snippet points into.
#[derive(Debug)]
pub struct Report<'a> {
    /// The part of the workspace the error comes from, e.g. `Query`
    pub id: &'static str,
    pub title: String,
    pub marker: Option<Marker<'a>>,
    pub help: Option<(AnnotationType, Cow<'static, str>)>,
}

impl Report<'_> {
    pub fn render(&self) -> String {
        let slices = self
            .marker
            .iter()
            .map(|marker| Slice {
                source: marker.source,
                line_start: 1,
                origin: None,
                fold: true,
                annotations: vec![SourceAnnotation {
                    range: marker.span.char_bounds(marker.source),
                    label: &marker.label,
                    annotation_type: AnnotationType::Error,
                }],
            })
            .collect();

        let footer = self
            .help
            .iter()
            .map(|(annotation_type, help)| Annotation {
                annotation_type: *annotation_type,
                id: None,
                label: Some(help.as_ref()),
            })
            .collect();

        let snippet = Snippet {
            title: Some(Annotation {
                annotation_type: AnnotationType::Error,
                id: Some(self.id),
                label: Some(self.title.as_str()),
            }),
            slices,
            footer,
            opt: FormatOptions {
                color: super::COLORED,
                ..Default::default()
            },
        };
        DisplayList::from(snippet).to_string()
    }
}
