use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{BlockDef, BlockPos, BlockRegistry, BlockState, Direction, Material};

/// Read access to the blocks around a position
///
/// Block queries are evaluated against this trait and only ever look at the
/// queried position and its direct neighbors.
pub trait World {
    fn registry(&self) -> &BlockRegistry;

    /// The state at `pos`, air where nothing was placed
    fn block_state(&self, pos: BlockPos) -> &BlockState;

    /// The combined block and sky light level at `pos`, between 0 and 15
    fn light(&self, pos: BlockPos) -> u8;

    fn can_see_sky(&self, pos: BlockPos) -> bool;

    fn block(&self, pos: BlockPos) -> &BlockDef {
        self.registry().def(self.block_state(pos).block)
    }

    fn material(&self, pos: BlockPos) -> Material {
        self.block(pos).material
    }

    fn is_air(&self, pos: BlockPos) -> bool {
        self.material(pos) == Material::Air
    }

    /// Blocks are modelled as either full cubes or not, so every side is
    /// solid exactly when the top side is
    fn is_side_solid(&self, pos: BlockPos, _side: Direction) -> bool {
        self.block(pos).solid_top
    }
}

/// In-memory world made of explicitly placed blocks
#[derive(Debug, Clone)]
pub struct SnapshotWorld {
    registry: Arc<BlockRegistry>,
    air: BlockState,
    states: FxHashMap<BlockPos, BlockState>,
    light: FxHashMap<BlockPos, u8>,
    default_light: u8,
    /// Highest non-air block per (x, z) column
    heights: FxHashMap<(i32, i32), i32>,
}

impl SnapshotWorld {
    pub fn new(registry: Arc<BlockRegistry>) -> Self {
        SnapshotWorld {
            air: registry.air(),
            registry,
            states: FxHashMap::default(),
            light: FxHashMap::default(),
            default_light: 15,
            heights: FxHashMap::default(),
        }
    }

    /// Sets the light level of every position without an explicit one
    pub fn with_default_light(mut self, light: u8) -> Self {
        self.default_light = light.min(15);
        self
    }

    pub fn set_light(&mut self, pos: BlockPos, light: u8) {
        self.light.insert(pos, light.min(15));
    }

    pub fn set_block(&mut self, pos: BlockPos, state: BlockState) {
        let is_air = self.registry.def(state.block).material == Material::Air;
        if is_air {
            self.states.remove(&pos);
            self.recompute_height(pos.x, pos.z);
        } else {
            self.states.insert(pos, state);
            let height = self.heights.entry((pos.x, pos.z)).or_insert(pos.y);
            *height = (*height).max(pos.y);
        }
    }

    /// Places the default state of the block called `name`.
    /// Returns false if there is no such block.
    pub fn set_block_named(&mut self, pos: BlockPos, name: &str) -> bool {
        match self.registry.state(name) {
            Some(state) => {
                self.set_block(pos, state);
                true
            }
            None => false,
        }
    }

    /// Fills the box spanned by `from` and `to`, both inclusive
    pub fn fill(&mut self, from: BlockPos, to: BlockPos, state: &BlockState) {
        for x in from.x.min(to.x)..=from.x.max(to.x) {
            for y in from.y.min(to.y)..=from.y.max(to.y) {
                for z in from.z.min(to.z)..=from.z.max(to.z) {
                    self.set_block(BlockPos::new(x, y, z), state.clone());
                }
            }
        }
    }

    fn recompute_height(&mut self, x: i32, z: i32) {
        let height = self
            .states
            .keys()
            .filter(|pos| pos.x == x && pos.z == z)
            .map(|pos| pos.y)
            .max();
        match height {
            Some(height) => self.heights.insert((x, z), height),
            None => self.heights.remove(&(x, z)),
        };
    }
}

impl World for SnapshotWorld {
    fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    fn block_state(&self, pos: BlockPos) -> &BlockState {
        self.states.get(&pos).unwrap_or(&self.air)
    }

    fn light(&self, pos: BlockPos) -> u8 {
        self.light.get(&pos).copied().unwrap_or(self.default_light)
    }

    fn can_see_sky(&self, pos: BlockPos) -> bool {
        self.heights
            .get(&(pos.x, pos.z))
            .map_or(true, |height| pos.y > *height)
    }
}
