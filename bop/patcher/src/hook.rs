use bop_world::{
    world_type::{AMPLIFIED, BIOMES_O_PLENTY_AMPLIFIED},
    WorldType, WorldTypes,
};

/// The predicate the patched method calls instead of comparing against the
/// built-in amplified world type
///
/// World types are compared by slot, the engine compares them by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmplifiedHook {
    amplified: Option<u8>,
    mod_amplified: Option<u8>,
}

impl AmplifiedHook {
    pub fn new(world_types: &WorldTypes) -> Self {
        AmplifiedHook {
            amplified: world_types.get(AMPLIFIED).map(|world_type| world_type.id),
            mod_amplified: world_types
                .get(BIOMES_O_PLENTY_AMPLIFIED)
                .map(|world_type| world_type.id),
        }
    }

    /// Whether the engine should generate terrain for `world_type` the amplified way
    pub fn is_amplified(&self, world_type: &WorldType) -> bool {
        let id = Some(world_type.id);
        id == self.amplified || id == self.mod_amplified
    }
}
