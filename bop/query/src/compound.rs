use bop_world::{BlockClassId, BlockId, BlockState, Material, PlantType};

use crate::BlockPosQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundKind {
    /// Matches if every child matches
    And,
    /// Matches if any child matches
    Or,
}

/// A compound query which is still being assembled
///
/// Children can only be added until [`CompoundQuery::instance`] turns it into
/// an immutable [`BlockPosQuery`].
#[derive(Debug, Clone)]
pub struct CompoundQuery {
    kind: CompoundKind,
    children: Vec<BlockPosQuery>,
}

impl CompoundQuery {
    pub fn new(kind: CompoundKind) -> Self {
        CompoundQuery {
            kind,
            children: Vec::new(),
        }
    }

    pub fn and() -> Self {
        Self::new(CompoundKind::And)
    }

    pub fn or() -> Self {
        Self::new(CompoundKind::Or)
    }

    pub fn add(&mut self, child: BlockPosQuery) {
        self.children.push(child);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Finishes this compound.
    ///
    /// No children turn into [`BlockPosQuery::Anything`] for both kinds and a
    /// single child is returned as is.
    pub fn instance(mut self) -> BlockPosQuery {
        match self.children.len() {
            0 => BlockPosQuery::Anything,
            1 => self.children.remove(0),
            _ => match self.kind {
                CompoundKind::And => BlockPosQuery::And(self.children),
                CompoundKind::Or => BlockPosQuery::Or(self.children),
            },
        }
    }
}

/// Fluent construction of compound queries in code
#[derive(Debug, Clone)]
pub struct CompoundQueryBuilder {
    query: CompoundQuery,
}

/// Starts a query whose parts must all match
pub fn build_and() -> CompoundQueryBuilder {
    CompoundQueryBuilder::new(CompoundQuery::and())
}

/// Starts a query of which any part must match
pub fn build_or() -> CompoundQueryBuilder {
    CompoundQueryBuilder::new(CompoundQuery::or())
}

impl CompoundQueryBuilder {
    pub fn new(query: CompoundQuery) -> Self {
        CompoundQueryBuilder { query }
    }

    pub fn and(mut self, query: BlockPosQuery) -> Self {
        self.query.add(query);
        self
    }

    pub fn blocks(self, blocks: impl IntoIterator<Item = BlockId>) -> Self {
        self.and(BlockPosQuery::blocks(blocks))
    }

    pub fn states(self, states: impl IntoIterator<Item = BlockState>) -> Self {
        self.and(BlockPosQuery::states(states))
    }

    /// Matches `class` and its subclasses
    pub fn block_class(self, class: BlockClassId) -> Self {
        self.and(BlockPosQuery::Class {
            class,
            strict: false,
        })
    }

    pub fn materials(self, materials: impl IntoIterator<Item = Material>) -> Self {
        self.and(BlockPosQuery::materials(materials))
    }

    pub fn with_property<'a>(self, name: &str, values: impl IntoIterator<Item = &'a str>) -> Self {
        self.and(BlockPosQuery::property(name, values))
    }

    pub fn not(self, query: BlockPosQuery) -> Self {
        self.and(query.negate())
    }

    pub fn not_blocks(self, blocks: impl IntoIterator<Item = BlockId>) -> Self {
        self.not(BlockPosQuery::blocks(blocks))
    }

    pub fn not_states(self, states: impl IntoIterator<Item = BlockState>) -> Self {
        self.not(BlockPosQuery::states(states))
    }

    pub fn not_block_class(self, class: BlockClassId) -> Self {
        self.not(BlockPosQuery::Class {
            class,
            strict: false,
        })
    }

    pub fn not_materials(self, materials: impl IntoIterator<Item = Material>) -> Self {
        self.not(BlockPosQuery::materials(materials))
    }

    pub fn not_with_property<'a>(
        self,
        name: &str,
        values: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.not(BlockPosQuery::property(name, values))
    }

    /// Both bounds are inclusive
    pub fn with_altitude_between(self, min: i32, max: i32) -> Self {
        self.and(BlockPosQuery::Altitude { min, max })
    }

    pub fn by_water(self) -> Self {
        self.and(BlockPosQuery::AdjacentMaterial(Material::Water))
    }

    pub fn with_air_above(self) -> Self {
        self.and(BlockPosQuery::AirAbove)
    }

    pub fn with_light_at_least(self, level: u8) -> Self {
        self.and(BlockPosQuery::LightAtLeast(level))
    }

    pub fn with_light_no_more_than(self, level: u8) -> Self {
        self.and(BlockPosQuery::LightNoMoreThan(level))
    }

    pub fn sustains_plant(self, plant: PlantType) -> Self {
        self.and(BlockPosQuery::SustainsPlantType(plant))
    }

    pub fn create(self) -> BlockPosQuery {
        self.query.instance()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bop_world::{vanilla, BlockPos, Material, PlantType, SnapshotWorld};

    use super::{build_and, build_or, CompoundQuery};
    use crate::BlockPosQuery;

    #[test]
    fn empty_compounds_match_anything() {
        assert!(matches!(
            CompoundQuery::and().instance(),
            BlockPosQuery::Anything
        ));
        assert!(matches!(
            CompoundQuery::or().instance(),
            BlockPosQuery::Anything
        ));
    }

    #[test]
    fn single_child_is_unwrapped() {
        let mut and = CompoundQuery::and();
        and.add(BlockPosQuery::AirAbove);
        assert!(matches!(and.instance(), BlockPosQuery::AirAbove));

        let query = build_or().with_light_at_least(4).create();
        assert!(matches!(query, BlockPosQuery::LightAtLeast(4)));
    }

    #[test]
    fn builder_combines_parts() {
        let registry = Arc::new(vanilla::registry());
        let grass = registry.get("grass").unwrap();
        let query = build_and()
            .blocks([grass])
            .with_altitude_between(60, 70)
            .with_air_above()
            .not_materials([Material::Water])
            .sustains_plant(PlantType::Plains)
            .create();
        expect_test::expect![[r#"all(block(minecraft:grass), altitude(60..=70), air_above, !material(water), sustains(Plains))"#]]
            .assert_eq(&query.display(&registry).to_string());

        let mut world = SnapshotWorld::new(Arc::clone(&registry));
        let pos = BlockPos::new(3, 64, 3);
        world.set_block_named(pos, "grass");
        assert!(query.matches(&world, pos));
        world.set_block_named(pos.up(), "tallgrass");
        assert!(!query.matches(&world, pos));
        assert!(!query.matches(&world, pos.up()));
    }
}
