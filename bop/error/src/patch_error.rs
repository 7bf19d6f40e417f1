use std::{borrow::Cow, fmt};

use annotate_snippets::snippet::AnnotationType;

use super::{snippet::Report, AsAnnotationSnippet};

/// Thrown when a class cannot be decoded, edited or patched
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum PatchError {
    /// The anticipated instruction pattern is absent from the target method
    TargetNotFound {
        class: String,
        method: String,
        /// Human readable description of the instruction that was searched for
        pattern: String,
    },
    /// The instruction next to the matched pattern is not the anticipated one
    UnexpectedInstruction {
        method: String,
        index: usize,
        expected: &'static str,
        got: String,
    },
    /// The class bytes could not be decoded
    MalformedClass { offset: usize, reason: String },
    /// A jump would target a label that is not part of the instruction list
    DanglingLabel { label: u32 },
    /// A label would appear more than once in the instruction list
    DuplicateLabel { label: u32 },
    /// An instruction index is out of bounds
    InvalidIndex { index: usize, len: usize },
}

impl PatchError {
    pub fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        PatchError::MalformedClass {
            offset,
            reason: reason.into(),
        }
    }

    /// Renders this error as a snippet without source annotations
    pub fn format(&self) -> String {
        <Self as AsAnnotationSnippet>::to_string(self, "")
    }
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::TargetNotFound {
                class,
                method,
                pattern,
            } => write!(f, "Could not find `{pattern}` in {class}.{method}"),
            PatchError::UnexpectedInstruction {
                method,
                index,
                expected,
                got,
            } => write!(
                f,
                "Expected {expected} at instruction {index} of {method}, got {got}"
            ),
            PatchError::MalformedClass { offset, reason } => {
                write!(f, "Malformed class at byte {offset}: {reason}")
            }
            PatchError::DanglingLabel { label } => {
                write!(f, "Label L{label} is not part of the instruction list")
            }
            PatchError::DuplicateLabel { label } => {
                write!(f, "Label L{label} appears more than once")
            }
            PatchError::InvalidIndex { index, len } => {
                write!(f, "Instruction index {index} is out of bounds (len {len})")
            }
        }
    }
}

impl std::error::Error for PatchError {}

impl<'a> AsAnnotationSnippet<'a> for PatchError {
    fn as_annotation_snippet(&self, _source: &'a str) -> Report<'a> {
        let help: Option<Cow<'static, str>> = match self {
            PatchError::TargetNotFound { .. } | PatchError::UnexpectedInstruction { .. } => {
                Some("The engine class does not have the anticipated layout, the engine version is probably not supported".into())
            }
            PatchError::MalformedClass { .. } => None,
            PatchError::DanglingLabel { .. }
            | PatchError::DuplicateLabel { .. }
            | PatchError::InvalidIndex { .. } => {
                Some("The edit was rejected and the instruction list is unchanged".into())
            }
        };

        Report {
            id: "Patch",
            title: format!("{self}"),
            marker: None,
            help: help.map(|help| (AnnotationType::Help, help)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PatchError;

    #[test]
    fn target_not_found_names_method() {
        let error = PatchError::TargetNotFound {
            class: "net.minecraft.world.gen.ChunkProviderGenerate".to_string(),
            method: "func_147423_a".to_string(),
            pattern: "GETSTATIC WorldType.AMPLIFIED".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Could not find `GETSTATIC WorldType.AMPLIFIED` in net.minecraft.world.gen.ChunkProviderGenerate.func_147423_a"
        );
        let rendered = error.format();
        assert!(rendered.contains("func_147423_a"));
        assert!(rendered.contains("engine version"));
    }
}
