use bop_world::{BlockPos, Material, PlantType, PropertyValue, World};

/// Whether the block at `pos` can carry plants of type `plant`
///
/// Blocks with a [`bop_world::SustainsPlantType`] capability decide on their
/// own, all other blocks are checked against a fixed table.
pub fn sustains_plant(world: &dyn World, pos: BlockPos, plant: PlantType) -> bool {
    let state = world.block_state(pos);
    let registry = world.registry();
    let def = registry.def(state.block);

    if let Some(capability) = &def.plant_capability {
        return capability.can_sustain_plant_type(world, pos, plant);
    }

    let is_one_of = |names: &[&str]| {
        names
            .iter()
            .any(|name| registry.get(name) == Some(state.block))
    };

    match plant {
        PlantType::Desert => is_one_of(&["sand", "hardened_clay", "stained_hardened_clay", "dirt"]),
        PlantType::Nether => is_one_of(&["soul_sand"]),
        PlantType::Crop => is_one_of(&["farmland"]),
        PlantType::Cave => def.solid_top,
        PlantType::Plains => is_one_of(&["grass", "dirt", "farmland"]),
        PlantType::Water => {
            def.material == Material::Water
                && state.property("level") == Some(&PropertyValue::Int(0))
        }
        PlantType::Beach => {
            is_one_of(&["grass", "dirt", "sand"])
                && pos
                    .horizontal_neighbors()
                    .any(|neighbor| world.material(neighbor) == Material::Water)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bop_world::{vanilla, BlockPos, PlantType, SnapshotWorld, World};

    use super::sustains_plant;

    fn world_with(name: &str) -> (SnapshotWorld, BlockPos) {
        let pos = BlockPos::new(0, 64, 0);
        let mut world = SnapshotWorld::new(Arc::new(vanilla::registry()));
        assert!(world.set_block_named(pos, name));
        (world, pos)
    }

    #[test]
    fn fallback_table() {
        let cases = [
            ("sand", PlantType::Desert, true),
            ("stained_hardened_clay", PlantType::Desert, true),
            ("grass", PlantType::Desert, false),
            ("soul_sand", PlantType::Nether, true),
            ("farmland", PlantType::Crop, true),
            ("farmland", PlantType::Plains, true),
            ("stone", PlantType::Cave, true),
            ("glass", PlantType::Cave, false),
            ("water", PlantType::Water, true),
            ("lava", PlantType::Water, false),
            ("sand", PlantType::Beach, false),
        ];
        for (block, plant, expected) in cases {
            let (world, pos) = world_with(block);
            assert_eq!(
                sustains_plant(&world, pos, plant),
                expected,
                "{block} sustaining {plant}"
            );
        }
    }

    #[test]
    fn water_needs_level_zero() {
        let (mut world, pos) = world_with("water");
        let flowing = world.registry().state("water").unwrap().with("level", 3);
        world.set_block(pos, flowing);
        assert!(!sustains_plant(&world, pos, PlantType::Water));
    }

    #[test]
    fn beach_needs_adjacent_water() {
        let (mut world, pos) = world_with("sand");
        assert!(world.set_block_named(pos.north(), "water"));
        assert!(sustains_plant(&world, pos, PlantType::Beach));
        assert!(!sustains_plant(&world, pos.up(), PlantType::Beach));
    }

    #[test]
    fn capability_takes_precedence() {
        let (mut world, pos) = world_with("biomesoplenty:grass");
        let moss = world
            .registry()
            .state("biomesoplenty:grass")
            .unwrap()
            .with("variant", "spectral_moss");
        world.set_block(pos, moss);
        assert!(!sustains_plant(&world, pos, PlantType::Plains));
        assert!(sustains_plant(&world, pos, PlantType::Cave));
    }
}
