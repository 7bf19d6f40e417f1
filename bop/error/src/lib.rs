//! Error handling
//!
//! Contains the errors of the block query language ([`QueryError`]), of the
//! method patcher ([`PatchError`]) and of world type registration
//! ([`WorldTypeError`]). All of them can be rendered as `annotate_snippets`
//! snippets, so that nice rust-style error messages can be printed.
use std::fmt;
use std::fmt::{Display, Formatter};

pub use patch_error::PatchError;
pub use query_error::{QueryError, QueryErrorKind, ReferenceKind};
pub use snippet::{Marker, Report};

mod utils;
pub use utils::display_expected_of_any;

mod patch_error;
mod query_error;
mod snippet;

/// Used to determine whether the error messages should use console colors
/// Or be plain text
pub const COLORED: bool = cfg!(feature = "colored_errors");

/// The result type used by the query parser
pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// The result type used by the patcher
pub type PatchResult<T> = std::result::Result<T, PatchError>;

/// The result type used by the facade crate
pub type Result<T> = std::result::Result<T, BopError>;

pub trait AsAnnotationSnippet<'a> {
    fn as_annotation_snippet(&self, source: &'a str) -> Report<'a>;

    fn to_string(&self, source: &'a str) -> String {
        self.as_annotation_snippet(source).render()
    }
}

/// Thrown when registering a world type
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum WorldTypeError {
    /// The engine stores world type names in a 16 character field
    NameTooLong { name: String, max: usize },
    AlreadyRegistered { name: String },
    /// Every world type slot of the engine is taken
    NoFreeSlot { name: String },
}

impl Display for WorldTypeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            WorldTypeError::NameTooLong { name, max } => write!(
                f,
                "World type name '{name}' is longer than {max} characters"
            ),
            WorldTypeError::AlreadyRegistered { name } => {
                write!(f, "World type '{name}' is already registered")
            }
            WorldTypeError::NoFreeSlot { name } => {
                write!(f, "No free world type slot left for '{name}'")
            }
        }
    }
}

impl std::error::Error for WorldTypeError {}

/// Any error produced by this workspace
///
/// This type is the Err value of the facade crate.
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum BopError {
    /// An error which happens when parsing a block query
    Query(QueryError),
    /// An error which happens when patching a class
    Patch(PatchError),
    /// An error which happens when registering a world type
    WorldType(WorldTypeError),
}

impl BopError {
    /// Formats this error, `source` is the query text for query errors and ignored otherwise
    pub fn format(&self, source: &str) -> String {
        match self {
            BopError::Query(error) => error.format(source),
            BopError::Patch(error) => error.format(),
            BopError::WorldType(error) => format!("error: {error}"),
        }
    }
}

impl Display for BopError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BopError::Query(error) => write!(f, "Could not parse the block query: {error}"),
            BopError::Patch(error) => write!(f, "Could not patch the class: {error}"),
            BopError::WorldType(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for BopError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BopError::Query(error) => Some(error),
            BopError::Patch(error) => Some(error),
            BopError::WorldType(error) => Some(error),
        }
    }
}

impl From<QueryError> for BopError {
    fn from(error: QueryError) -> Self {
        BopError::Query(error)
    }
}

impl From<PatchError> for BopError {
    fn from(error: PatchError) -> Self {
        BopError::Patch(error)
    }
}

impl From<WorldTypeError> for BopError {
    fn from(error: WorldTypeError) -> Self {
        BopError::WorldType(error)
    }
}
