//! The blocks of the base game and of the mod that world generation refers to

use std::sync::Arc;

use crate::{
    BlockClassRegistry, BlockDef, BlockPos, BlockRegistry, Material, PlantType, ResourceName,
    SustainsPlantType, World,
};

pub const MOD_NAMESPACE: &str = "biomesoplenty";

const VANILLA_CLASSES: &str = "net.minecraft.block.";
const MOD_CLASSES: &str = "biomesoplenty.common.block.";

/// The soil of the mod, whose variants support different plants
#[derive(Debug, Default)]
pub struct BopGrassSoil;

impl SustainsPlantType for BopGrassSoil {
    fn can_sustain_plant_type(&self, world: &dyn World, pos: BlockPos, plant: PlantType) -> bool {
        let variant = world
            .block_state(pos)
            .property("variant")
            .map(|value| value.as_query_string())
            .unwrap_or_default();

        match variant.as_str() {
            "spectral_moss" => plant == PlantType::Cave,
            "smoldering" | "overgrown_netherrack" => plant == PlantType::Nether,
            "sandy" => matches!(
                plant,
                PlantType::Plains | PlantType::Desert | PlantType::Beach
            ),
            _ => match plant {
                PlantType::Plains => true,
                PlantType::Beach => pos
                    .horizontal_neighbors()
                    .any(|neighbor| world.material(neighbor) == Material::Water),
                _ => false,
            },
        }
    }
}

fn register_class(classes: &mut BlockClassRegistry, name: &str, parent: &str) {
    let parent = classes
        .by_qualified_name(parent)
        .unwrap_or_else(|| classes.block());
    classes.register(name, parent);
}

/// Creates a registry with the vanilla and mod blocks used by world generation
pub fn registry() -> BlockRegistry {
    let mut classes = BlockClassRegistry::new();
    let root = classes.block();

    for (name, parent) in [
        ("BlockStone", "net.minecraft.block.Block"),
        ("BlockGrass", "net.minecraft.block.Block"),
        ("BlockDirt", "net.minecraft.block.Block"),
        ("BlockFalling", "net.minecraft.block.Block"),
        ("BlockSand", "net.minecraft.block.BlockFalling"),
        ("BlockGravel", "net.minecraft.block.BlockFalling"),
        ("BlockHardenedClay", "net.minecraft.block.Block"),
        ("BlockColored", "net.minecraft.block.Block"),
        ("BlockSoulSand", "net.minecraft.block.Block"),
        ("BlockFarmland", "net.minecraft.block.Block"),
        ("BlockLiquid", "net.minecraft.block.Block"),
        ("BlockStaticLiquid", "net.minecraft.block.BlockLiquid"),
        ("BlockLeaves", "net.minecraft.block.Block"),
        ("BlockOldLeaf", "net.minecraft.block.BlockLeaves"),
        ("BlockLog", "net.minecraft.block.Block"),
        ("BlockOldLog", "net.minecraft.block.BlockLog"),
        ("BlockBush", "net.minecraft.block.Block"),
        ("BlockTallGrass", "net.minecraft.block.BlockBush"),
        ("BlockIce", "net.minecraft.block.Block"),
        ("BlockSnow", "net.minecraft.block.Block"),
        ("BlockGlass", "net.minecraft.block.Block"),
        ("BlockCactus", "net.minecraft.block.Block"),
    ] {
        register_class(&mut classes, &format!("{VANILLA_CLASSES}{name}"), parent);
    }
    for (name, parent) in [
        ("BlockBOPGrass", "net.minecraft.block.BlockGrass"),
        ("BlockBOPLeaves", "net.minecraft.block.BlockLeaves"),
        ("BlockBOPLog", "net.minecraft.block.BlockLog"),
        ("BlockBOPFlower", "net.minecraft.block.BlockBush"),
    ] {
        register_class(&mut classes, &format!("{MOD_CLASSES}{name}"), parent);
    }
    // Engine class with a block-like name that is not a block
    classes.register_unrelated("net.minecraft.block.BlockEventData");

    let class_of = |classes: &BlockClassRegistry, name: &str| {
        classes.resolve(name).unwrap_or(root)
    };

    let mut blocks = Vec::new();
    {
        let mut add = |name: &str, class: &str, material: Material, hardness: f32| {
            blocks.push(
                BlockDef::new(
                    ResourceName::parse(name),
                    class_of(&classes, class),
                    material,
                )
                .with_hardness(hardness),
            );
        };
        add("stone", "BlockStone", Material::Rock, 1.5);
        add("grass", "BlockGrass", Material::Grass, 0.6);
        add("dirt", "BlockDirt", Material::Ground, 0.5);
        add("sand", "BlockSand", Material::Sand, 0.5);
        add("gravel", "BlockGravel", Material::Sand, 0.6);
        add("hardened_clay", "BlockHardenedClay", Material::Rock, 1.25);
        add("stained_hardened_clay", "BlockColored", Material::Rock, 1.25);
        add("soul_sand", "BlockSoulSand", Material::Sand, 0.5);
        add("farmland", "BlockFarmland", Material::Ground, 0.6);
        add("water", "BlockStaticLiquid", Material::Water, 100.0);
        add("lava", "BlockStaticLiquid", Material::Lava, 100.0);
        add("leaves", "BlockOldLeaf", Material::Leaves, 0.2);
        add("log", "BlockOldLog", Material::Wood, 2.0);
        add("tallgrass", "BlockTallGrass", Material::Vine, 0.0);
        add("ice", "BlockIce", Material::Ice, 0.5);
        add("snow_layer", "BlockSnow", Material::Snow, 0.1);
        add("glass", "BlockGlass", Material::Glass, 0.3);
        add("cactus", "BlockCactus", Material::Cactus, 0.4);
        add("bedrock", "Block", Material::Rock, -1.0);
        add("biomesoplenty:grass", "BlockBOPGrass", Material::Grass, 0.6);
        add("biomesoplenty:leaves_0", "BlockBOPLeaves", Material::Leaves, 0.2);
        add("biomesoplenty:log_0", "BlockBOPLog", Material::Wood, 2.0);
        add("biomesoplenty:flower_0", "BlockBOPFlower", Material::Plants, 0.0);
    }

    let mut registry = BlockRegistry::new(classes);
    for def in blocks {
        let name = def.name.clone();
        let def = match name.path.as_str() {
            "stone" | "dirt" | "sand" | "gravel" | "hardened_clay" | "stained_hardened_clay"
            | "soul_sand" | "log" | "bedrock" | "log_0" => def.with_solid_top(),
            _ => def,
        };
        let def = match (name.namespace.as_str(), name.path.as_str()) {
            ("minecraft", "grass") => def.with_solid_top().with_property("snowy", false),
            ("minecraft", "dirt") => def.with_property("variant", "dirt"),
            ("minecraft", "sand") => def.with_property("variant", "sand"),
            ("minecraft", "stained_hardened_clay") => def.with_property("color", "white"),
            ("minecraft", "farmland") => def.with_property("moisture", 0),
            ("minecraft", "water" | "lava") => def.with_property("level", 0),
            ("minecraft", "leaves") => def
                .with_property("variant", "oak")
                .with_property("decayable", true),
            ("minecraft", "log") => def.with_property("variant", "oak"),
            ("minecraft", "snow_layer") => def.with_property("layers", 1),
            (MOD_NAMESPACE, "grass") => def
                .with_solid_top()
                .with_property("variant", "loamy")
                .with_plant_capability(Arc::new(BopGrassSoil)),
            (MOD_NAMESPACE, "leaves_0") => def.with_property("variant", "yellow_autumn"),
            (MOD_NAMESPACE, "log_0") => def.with_property("variant", "sacred_oak"),
            (MOD_NAMESPACE, "flower_0") => def.with_property("variant", "clover"),
            _ => def,
        };
        registry.register(def);
    }
    registry
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{BlockPos, PlantType, SnapshotWorld, World};

    use super::registry;

    #[test]
    fn classes_resolve_through_namespaces() {
        let registry = registry();
        let classes = registry.classes();
        let leaves = classes.resolve("BlockLeaves").unwrap();
        let bop_leaves = classes.resolve("BlockBOPLeaves").unwrap();
        assert!(classes.is_subclass_of(bop_leaves, leaves));
        assert!(classes.resolve("BlockEventData").is_none());

        let sand = registry.get("sand").unwrap();
        let falling = classes.resolve("BlockFalling").unwrap();
        assert!(classes.is_subclass_of(registry.def(sand).class, falling));
        assert!(!registry.def(registry.get("bedrock").unwrap()).is_breakable());
    }

    #[test]
    fn mod_grass_decides_by_variant() {
        let registry = Arc::new(registry());
        let grass = registry.state("biomesoplenty:grass").unwrap();
        let capability = registry
            .def(grass.block)
            .plant_capability
            .clone()
            .unwrap();

        let pos = BlockPos::new(0, 64, 0);
        let mut world = SnapshotWorld::new(Arc::clone(&registry));
        world.set_block(pos, grass.clone().with("variant", "spectral_moss"));
        assert!(capability.can_sustain_plant_type(&world, pos, PlantType::Cave));
        assert!(!capability.can_sustain_plant_type(&world, pos, PlantType::Plains));

        world.set_block(pos, grass);
        assert!(capability.can_sustain_plant_type(&world, pos, PlantType::Plains));
        assert!(!capability.can_sustain_plant_type(&world, pos, PlantType::Beach));
        world.set_block_named(pos.east(), "water");
        assert!(capability.can_sustain_plant_type(&world, pos, PlantType::Beach));
        assert!(world.is_side_solid(pos, crate::Direction::Up));
    }
}
