use std::{fmt, sync::Arc};

use bop_common::{FxIndexSet, Ident};
use bop_world::{
    BlockClassId, BlockId, BlockPos, BlockRegistry, BlockState, Material, PlantType, World,
};
use itertools::Itertools;
use smol_str::SmolStr;

use crate::plant::sustains_plant;

/// A compiled block query
///
/// Queries are immutable once built and can be evaluated any number of times.
/// Compound queries are assembled with [`crate::CompoundQuery`].
#[derive(Debug, Clone)]
pub enum BlockPosQuery {
    Anything,
    Nothing,
    /// The block is one of these blocks
    Blocks(FxIndexSet<BlockId>),
    /// The block state is exactly one of these states
    States(FxIndexSet<BlockState>),
    /// The block class is `class`, or a subclass of it unless `strict` is set
    Class { class: BlockClassId, strict: bool },
    Materials(FxIndexSet<Material>),
    /// The block has the property `name` and its value is one of `values`.
    /// Values are stored lowercase.
    Property { name: Ident, values: Vec<SmolStr> },
    /// The altitude lies within `min..=max`
    Altitude { min: i32, max: i32 },
    /// The light level is at least the threshold, or the position sees the sky
    LightAtLeast(u8),
    LightNoMoreThan(u8),
    /// One of the four horizontal neighbors has this material
    AdjacentMaterial(Material),
    AirAbove,
    /// The block is not unbreakable
    Breakable,
    SustainsPlantType(PlantType),
    Not(Box<BlockPosQuery>),
    And(Vec<BlockPosQuery>),
    Or(Vec<BlockPosQuery>),
    /// A predefined query, referenced by name
    Shared {
        name: Ident,
        query: Arc<BlockPosQuery>,
    },
}

impl BlockPosQuery {
    pub fn blocks(blocks: impl IntoIterator<Item = BlockId>) -> Self {
        BlockPosQuery::Blocks(blocks.into_iter().collect())
    }

    pub fn states(states: impl IntoIterator<Item = BlockState>) -> Self {
        BlockPosQuery::States(states.into_iter().collect())
    }

    pub fn materials(materials: impl IntoIterator<Item = Material>) -> Self {
        BlockPosQuery::Materials(materials.into_iter().collect())
    }

    pub fn property<'a>(name: &str, values: impl IntoIterator<Item = &'a str>) -> Self {
        BlockPosQuery::Property {
            name: Ident::new(name),
            values: values
                .into_iter()
                .map(|value| value.to_lowercase().into())
                .collect(),
        }
    }

    /// Wraps this query in a negation
    pub fn negate(self) -> Self {
        BlockPosQuery::Not(Box::new(self))
    }

    /// Evaluates this query for the block at `pos`
    pub fn matches(&self, world: &dyn World, pos: BlockPos) -> bool {
        match self {
            BlockPosQuery::Not(query) => !query.matches(world, pos),
            BlockPosQuery::And(queries) => queries.iter().all(|query| query.matches(world, pos)),
            BlockPosQuery::Or(queries) => queries.iter().any(|query| query.matches(world, pos)),
            BlockPosQuery::Shared { query, .. } => query.matches(world, pos),
            BlockPosQuery::Altitude { min, max } => (*min..=*max).contains(&pos.y),
            BlockPosQuery::LightAtLeast(level) => {
                world.light(pos) >= *level || world.can_see_sky(pos)
            }
            BlockPosQuery::LightNoMoreThan(level) => world.light(pos) <= *level,
            BlockPosQuery::AdjacentMaterial(material) => pos
                .horizontal_neighbors()
                .any(|neighbor| world.material(neighbor) == *material),
            BlockPosQuery::AirAbove => world.is_air(pos.up()),
            BlockPosQuery::SustainsPlantType(plant) => sustains_plant(world, pos, *plant),
            BlockPosQuery::Anything
            | BlockPosQuery::Nothing
            | BlockPosQuery::Blocks(_)
            | BlockPosQuery::States(_)
            | BlockPosQuery::Class { .. }
            | BlockPosQuery::Materials(_)
            | BlockPosQuery::Property { .. }
            | BlockPosQuery::Breakable => {
                self.matches_state(world.block_state(pos), world.registry()) == Some(true)
            }
        }
    }

    /// Evaluates this query against a block state alone
    ///
    /// Returns `None` if the query also depends on the position of the block,
    /// for example on its altitude or neighbors.
    pub fn matches_state(&self, state: &BlockState, registry: &BlockRegistry) -> Option<bool> {
        let def = registry.def(state.block);
        let result = match self {
            BlockPosQuery::Anything => true,
            BlockPosQuery::Nothing => false,
            BlockPosQuery::Blocks(blocks) => blocks.contains(&state.block),
            BlockPosQuery::States(states) => states.contains(state),
            BlockPosQuery::Class { class, strict } => {
                if *strict {
                    def.class == *class
                } else {
                    registry.classes().is_subclass_of(def.class, *class)
                }
            }
            BlockPosQuery::Materials(materials) => materials.contains(&def.material),
            BlockPosQuery::Property { name, values } => state
                .property(name.as_str())
                .is_some_and(|value| values.contains(&value.as_query_string())),
            BlockPosQuery::Breakable => def.is_breakable(),
            BlockPosQuery::Not(query) => !query.matches_state(state, registry)?,
            BlockPosQuery::And(queries) => queries.iter().try_fold(true, |all, query| {
                Some(query.matches_state(state, registry)? && all)
            })?,
            BlockPosQuery::Or(queries) => queries.iter().try_fold(false, |any, query| {
                Some(query.matches_state(state, registry)? || any)
            })?,
            BlockPosQuery::Shared { query, .. } => query.matches_state(state, registry)?,
            BlockPosQuery::Altitude { .. }
            | BlockPosQuery::LightAtLeast(_)
            | BlockPosQuery::LightNoMoreThan(_)
            | BlockPosQuery::AdjacentMaterial(_)
            | BlockPosQuery::AirAbove
            | BlockPosQuery::SustainsPlantType(_) => return None,
        };
        Some(result)
    }

    /// Returns a value which displays this query with the names from `registry`
    pub fn display<'a>(&'a self, registry: &'a BlockRegistry) -> QueryDisplay<'a> {
        QueryDisplay {
            query: self,
            registry,
        }
    }
}

/// Human readable rendering of a [`BlockPosQuery`]
pub struct QueryDisplay<'a> {
    query: &'a BlockPosQuery,
    registry: &'a BlockRegistry,
}

impl QueryDisplay<'_> {
    fn child<'b>(&'b self, query: &'b BlockPosQuery) -> QueryDisplay<'b> {
        QueryDisplay {
            query,
            registry: self.registry,
        }
    }

    fn write_state(&self, f: &mut fmt::Formatter<'_>, state: &BlockState) -> fmt::Result {
        write!(f, "{}", self.registry.def(state.block).name)?;
        if !state.properties.is_empty() {
            let properties = state
                .properties
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .join(",");
            write!(f, "[{properties}]")?;
        }
        Ok(())
    }
}

impl fmt::Display for QueryDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.query {
            BlockPosQuery::Anything => write!(f, "anything"),
            BlockPosQuery::Nothing => write!(f, "nothing"),
            BlockPosQuery::Blocks(blocks) => {
                let names = blocks
                    .iter()
                    .map(|block| &self.registry.def(*block).name)
                    .join(", ");
                write!(f, "block({names})")
            }
            BlockPosQuery::States(states) => {
                write!(f, "state(")?;
                for (index, state) in states.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    self.write_state(f, state)?;
                }
                write!(f, ")")
            }
            BlockPosQuery::Class { class, strict } => {
                let name = self.registry.classes().short_name(*class);
                if *strict {
                    write!(f, "exact_class({name})")
                } else {
                    write!(f, "class({name})")
                }
            }
            BlockPosQuery::Materials(materials) => {
                write!(f, "material({})", materials.iter().join(", "))
            }
            BlockPosQuery::Property { name, values } => {
                write!(f, "property({name} = {})", values.iter().join("|"))
            }
            BlockPosQuery::Altitude { min, max } => write!(f, "altitude({min}..={max})"),
            BlockPosQuery::LightAtLeast(level) => write!(f, "light_at_least({level})"),
            BlockPosQuery::LightNoMoreThan(level) => write!(f, "light_no_more_than({level})"),
            BlockPosQuery::AdjacentMaterial(material) => write!(f, "adjacent({material})"),
            BlockPosQuery::AirAbove => write!(f, "air_above"),
            BlockPosQuery::Breakable => write!(f, "breakable"),
            BlockPosQuery::SustainsPlantType(plant) => write!(f, "sustains({plant})"),
            BlockPosQuery::Not(query) => write!(f, "!{}", self.child(query)),
            BlockPosQuery::And(queries) => {
                let children = queries.iter().map(|query| self.child(query)).join(", ");
                write!(f, "all({children})")
            }
            BlockPosQuery::Or(queries) => {
                let children = queries.iter().map(|query| self.child(query)).join(", ");
                write!(f, "any({children})")
            }
            BlockPosQuery::Shared { name, .. } => write!(f, "@{name}"),
        }
    }
}
