use log::debug;
use rustc_hash::FxHashMap;

use crate::{
    BlockClassId, BlockClassRegistry, BlockDef, BlockId, BlockState, Material, ResourceName,
};

/// All blocks known to a world, keyed by their resource name
///
/// The registry always contains air at [`BlockRegistry::AIR`], which is also
/// what unknown ids resolve to.
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    classes: BlockClassRegistry,
    blocks: Vec<BlockDef>,
    by_name: FxHashMap<ResourceName, BlockId>,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new(BlockClassRegistry::new())
    }
}

impl BlockRegistry {
    pub const AIR: BlockId = BlockId(0);

    pub fn new(mut classes: BlockClassRegistry) -> Self {
        let air_class = classes.register("net.minecraft.block.BlockAir", classes.block());
        let mut registry = BlockRegistry {
            classes,
            blocks: Vec::new(),
            by_name: FxHashMap::default(),
        };
        registry.register(
            BlockDef::new(ResourceName::parse("air"), air_class, Material::Air).with_hardness(0.0),
        );
        registry
    }

    /// Adds a block. A block with the same name is replaced and keeps its id.
    pub fn register(&mut self, def: BlockDef) -> BlockId {
        if let Some(id) = self.by_name.get(&def.name).copied() {
            debug!("Replacing block {}", def.name);
            self.blocks[id.index()] = def;
            return id;
        }
        let id = BlockId(u16::try_from(self.blocks.len()).expect("Too many blocks"));
        self.by_name.insert(def.name.clone(), id);
        self.blocks.push(def);
        id
    }

    /// Registers a block class under its fully qualified name
    pub fn register_class(&mut self, name: &str, parent: BlockClassId) -> BlockClassId {
        self.classes.register(name, parent)
    }

    pub fn classes(&self) -> &BlockClassRegistry {
        &self.classes
    }

    /// Looks a block up by `name` or `namespace:name`
    pub fn get(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(&ResourceName::parse(name)).copied()
    }

    /// Returns the definition of `id`, air if the id is unknown
    pub fn def(&self, id: BlockId) -> &BlockDef {
        self.blocks
            .get(id.index())
            .unwrap_or(&self.blocks[Self::AIR.index()])
    }

    /// The state with every declared property at its default value
    pub fn default_state(&self, id: BlockId) -> BlockState {
        BlockState {
            block: id,
            properties: self.def(id).properties.clone(),
        }
    }

    /// Looks a block up by name and returns its default state
    pub fn state(&self, name: &str) -> Option<BlockState> {
        self.get(name).map(|id| self.default_state(id))
    }

    pub fn air(&self) -> BlockState {
        self.default_state(Self::AIR)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[allow(clippy::cast_possible_truncation)] // `register` keeps the length within u16
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &BlockDef)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(index, def)| (BlockId(index as u16), def))
    }
}

#[cfg(test)]
mod tests {
    use crate::{BlockClassRegistry, BlockDef, BlockId, Material, ResourceName};

    use super::BlockRegistry;

    #[test]
    fn air_is_the_fallback() {
        let mut registry = BlockRegistry::new(BlockClassRegistry::new());
        let block = registry.classes().block();
        let sand = registry.register(
            BlockDef::new(ResourceName::parse("sand"), block, Material::Sand).with_hardness(0.5),
        );

        assert_eq!(registry.get("sand"), Some(sand));
        assert_eq!(registry.get("minecraft:sand"), Some(sand));
        assert_eq!(registry.get("biomesoplenty:sand"), None);
        assert_eq!(registry.get("air"), Some(BlockRegistry::AIR));
        assert_eq!(registry.def(BlockId(999)).material, Material::Air);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn reregistering_keeps_the_id() {
        let mut registry = BlockRegistry::default();
        let block = registry.classes().block();
        let first = registry.register(BlockDef::new(
            ResourceName::parse("stone"),
            block,
            Material::Rock,
        ));
        let second = registry.register(
            BlockDef::new(ResourceName::parse("stone"), block, Material::Rock).with_hardness(1.5),
        );
        assert_eq!(first, second);
        assert!((registry.def(first).hardness - 1.5).abs() < f32::EPSILON);
    }
}
