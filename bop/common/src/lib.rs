//! Common items shared by the query language and the method patcher

mod ident;
pub use ident::Ident;

mod span;
pub use span::Span;

mod config;
pub use config::{Config, MissingPatternPolicy, SymbolMode, DEFAULT_PROPERTY_NAME};

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;
pub type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;
