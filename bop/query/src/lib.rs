//! The block query language
//!
//! World generation features describe the blocks they may replace or grow on
//! with short query strings like `%BlockLeaves,~water[level=0]`. This crate
//! compiles such strings into [`BlockPosQuery`] trees, which are then
//! evaluated against a [`bop_world::World`].

mod compound;
pub use compound::{build_and, build_or, CompoundKind, CompoundQuery, CompoundQueryBuilder};

pub mod parser;
pub use parser::{parse, ParseContext};

mod plant;
pub use plant::sustains_plant;

mod predefined;
pub use predefined::PredefinedQueries;

mod property_parser;

mod query;
pub use query::{BlockPosQuery, QueryDisplay};

pub mod token;
mod trace;
