use std::sync::Arc;

use bop_worldgen::{
    error::{BopError, QueryErrorKind, ReferenceKind},
    query::{build_and, build_or, BlockPosQuery, CompoundQuery},
    world::{BlockPos, Material, PlantType, SnapshotWorld, World},
    WorldgenSetup,
};
use expect_test::expect;

mod common;
use common::setup;

const BLOCKS: [&str; 12] = [
    "sand",
    "dirt",
    "grass",
    "stone",
    "gravel",
    "water",
    "leaves",
    "soul_sand",
    "farmland",
    "biomesoplenty:grass",
    "biomesoplenty:leaves_0",
    "air",
];

/// A small world with every block of [`BLOCKS`] on a row, once at sea level
/// and once below a stone roof
fn sample_world(setup: &WorldgenSetup) -> (SnapshotWorld, Vec<BlockPos>) {
    let mut world = SnapshotWorld::new(Arc::clone(setup.registry())).with_default_light(4);
    let mut positions = Vec::new();
    for (x, name) in (0..).step_by(2).zip(BLOCKS) {
        for y in [62, 20] {
            let pos = BlockPos::new(x, y, 0);
            assert!(world.set_block_named(pos, name), "{name}");
            positions.push(pos);
        }
        world.set_block_named(BlockPos::new(x, 30, 0), "stone");
    }
    let flowing = setup.registry().state("water").unwrap().with("level", 3);
    world.set_block(BlockPos::new(1, 62, 0), flowing);
    positions.push(BlockPos::new(1, 62, 0));
    (world, positions)
}

fn matching(
    query: &BlockPosQuery,
    world: &SnapshotWorld,
    positions: &[BlockPos],
) -> Vec<BlockPos> {
    positions
        .iter()
        .copied()
        .filter(|pos| query.matches(world, *pos))
        .collect()
}

#[test]
fn identity_negation_and_or() {
    let setup = setup();
    let (world, positions) = sample_world(&setup);
    let sand = setup.parse_query("sand").unwrap();
    let dirt = setup.parse_query("dirt").unwrap();
    let not_sand = setup.parse_query("!sand").unwrap();
    let sand_or_dirt = setup.parse_query("sand,dirt").unwrap();

    for pos in &positions {
        let is_sand = world.block(*pos).name.path == "sand";
        assert_eq!(sand.matches(&world, *pos), is_sand, "{pos}");
        assert_eq!(not_sand.matches(&world, *pos), !is_sand, "{pos}");
        assert_eq!(
            sand_or_dirt.matches(&world, *pos),
            sand.matches(&world, *pos) || dirt.matches(&world, *pos),
            "{pos}"
        );
    }
    assert_eq!(matching(&sand, &world, &positions).len(), 2);
}

#[test]
fn material_and_property_combine_with_and() {
    let setup = setup();
    let (world, positions) = sample_world(&setup);
    let still = setup.parse_query("~water[level=0]").unwrap();
    let any_water = setup.parse_query("~water").unwrap();

    assert_eq!(
        matching(&still, &world, &positions),
        [BlockPos::new(10, 62, 0), BlockPos::new(10, 20, 0)]
    );
    assert_eq!(matching(&any_water, &world, &positions).len(), 3);

    let built = build_and()
        .materials([Material::Water])
        .with_property("level", ["0"])
        .create();
    assert_eq!(
        matching(&built, &world, &positions),
        matching(&still, &world, &positions)
    );
}

#[test]
fn reference_errors() {
    let setup = setup();
    let BopError::Query(error) = setup.parse_query("@undefined_name").unwrap_err() else {
        panic!("Expected a query error");
    };
    assert_eq!(
        error.kind,
        QueryErrorKind::UnknownReference {
            kind: ReferenceKind::Predefined,
            name: "undefined_name".to_string(),
        }
    );

    let error = setup.parse_query("[").unwrap_err();
    assert!(matches!(&error, BopError::Query(error) if error.is_syntax_error()));
}

#[test]
fn compound_instances() {
    assert!(matches!(
        CompoundQuery::and().instance(),
        BlockPosQuery::Anything
    ));
    assert!(matches!(
        CompoundQuery::or().instance(),
        BlockPosQuery::Anything
    ));

    let mut single = CompoundQuery::or();
    single.add(BlockPosQuery::AirAbove);
    assert!(matches!(single.instance(), BlockPosQuery::AirAbove));

    let mut single = CompoundQuery::and();
    single.add(BlockPosQuery::Breakable);
    assert!(matches!(single.instance(), BlockPosQuery::Breakable));

    let pair = build_or()
        .materials([Material::Sand])
        .sustains_plant(PlantType::Nether)
        .create();
    assert!(matches!(pair, BlockPosQuery::Or(children) if children.len() == 2));
}

#[test]
fn light_and_sky() {
    let setup = setup();
    let (mut world, positions) = sample_world(&setup);
    world.set_light(BlockPos::new(0, 20, 0), 12);
    let bright = build_and().with_light_at_least(10).create();
    let dark = build_and().with_light_no_more_than(4).create();

    // Only the air at the top of the last column sees the sky
    assert_eq!(
        matching(&bright, &world, &positions),
        [BlockPos::new(0, 20, 0), BlockPos::new(22, 62, 0)]
    );
    assert_eq!(
        matching(&dark, &world, &positions).len(),
        positions.len() - 1
    );
    assert!(world.can_see_sky(BlockPos::new(0, 63, 0)));
    assert!(!world.can_see_sky(BlockPos::new(0, 62, 0)));
}

#[test]
fn plants() {
    let setup = setup();
    let (world, positions) = sample_world(&setup);
    let names = |plant: PlantType| {
        let query = build_and().sustains_plant(plant).create();
        let mut names: Vec<String> = matching(&query, &world, &positions)
            .into_iter()
            .filter(|pos| pos.y == 62)
            .map(|pos| world.block(pos).name.to_string())
            .collect();
        names.dedup();
        names
    };

    assert_eq!(names(PlantType::Nether), ["minecraft:soul_sand"]);
    assert_eq!(names(PlantType::Crop), ["minecraft:farmland"]);
    assert_eq!(
        names(PlantType::Desert),
        ["minecraft:sand", "minecraft:dirt"]
    );
    assert_eq!(
        names(PlantType::Plains),
        [
            "minecraft:dirt",
            "minecraft:grass",
            "minecraft:farmland",
            "biomesoplenty:grass"
        ]
    );
}

#[test]
fn user_defined_queries() {
    let mut setup = setup();
    assert!(setup
        .define_query("soil", "grass,dirt,%BlockBOPGrass")
        .unwrap()
        .is_none());
    let previous = setup.define_query("soil", "grass,dirt").unwrap();
    assert!(previous.is_some());

    let query = setup.parse_query("@soil,~sand").unwrap();
    expect!["any(@soil, material(sand))"]
        .assert_eq(&query.display(setup.registry()).to_string());

    let (world, positions) = sample_world(&setup);
    let names: Vec<_> = matching(&query, &world, &positions)
        .into_iter()
        .filter(|pos| pos.y == 20)
        .map(|pos| world.block(pos).name.path.to_string())
        .collect();
    assert_eq!(names, ["sand", "dirt", "grass", "gravel", "soul_sand"]);
}
