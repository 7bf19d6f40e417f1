use std::sync::Arc;

use bop_common::{FxIndexMap, Ident};
use bop_world::Material;
use log::debug;

use crate::BlockPosQuery;

/// Named queries which block query strings can refer to with `@name`
///
/// The registry is filled during setup and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct PredefinedQueries {
    queries: FxIndexMap<Ident, Arc<BlockPosQuery>>,
}

impl PredefinedQueries {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the standard queries
    pub fn with_defaults() -> Self {
        let mut queries = Self::new();
        queries.register("anything", BlockPosQuery::Anything);
        queries.register("nothing", BlockPosQuery::Nothing);
        queries.register("hasWater", BlockPosQuery::AdjacentMaterial(Material::Water));
        queries.register("airAbove", BlockPosQuery::AirAbove);
        queries.register("breakable", BlockPosQuery::Breakable);
        queries.register(
            "airOrLeaves",
            BlockPosQuery::materials([Material::Air, Material::Leaves]),
        );
        queries
    }

    /// Registers `query` under `name` and returns the query it replaces
    pub fn register(
        &mut self,
        name: impl Into<Ident>,
        query: BlockPosQuery,
    ) -> Option<Arc<BlockPosQuery>> {
        let name = name.into();
        debug!("Registering predefined query @{name}");
        self.queries.insert(name, Arc::new(query))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<BlockPosQuery>> {
        self.queries.get(name)
    }

    /// Returns a query that refers to the predefined query `name`
    pub fn reference(&self, name: &str) -> Option<BlockPosQuery> {
        self.queries
            .get_key_value(name)
            .map(|(name, query)| BlockPosQuery::Shared {
                name: name.clone(),
                query: Arc::clone(query),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &Ident> {
        self.queries.keys()
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
