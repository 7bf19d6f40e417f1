use smol_str::SmolStr;
use std::{
    borrow::Borrow,
    convert::AsRef,
    fmt::Display,
    fmt::{self, Formatter},
};

/// A short name, like a property name or the name of a predefined query
///
/// Since idents have to be cloned quite often they are represented by a
/// `SmolStr`, which is stack-allocated for the majority of practical values
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Ident(SmolStr);

impl Ident {
    /// Creates a new identifier
    pub fn new<T: AsRef<str>>(value: T) -> Self {
        Ident(SmolStr::new(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares two idents the way block state properties are compared
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl<T> From<T> for Ident
where
    T: Into<SmolStr>,
{
    fn from(value: T) -> Self {
        Ident(value.into())
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Ident {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<&str> for Ident {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<Ident> for &str {
    fn eq(&self, other: &Ident) -> bool {
        other == self
    }
}
