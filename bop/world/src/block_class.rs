//! Block classes
//!
//! A block class is the category a block belongs to, e.g. `BlockLeaves`.
//! Classes form a tree with `net.minecraft.block.Block` at the root. Queries
//! refer to classes by their short name, which is looked up under a fixed
//! list of namespaces.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

/// The namespaces a short class name is searched in, in this order
pub const CLASS_NAMESPACES: [&str; 3] = ["", "biomesoplenty.common.block.", "net.minecraft.block."];

/// The fully qualified name of the root block class
pub const BLOCK_CLASS: &str = "net.minecraft.block.Block";

/// Identifies a class in a [`BlockClassRegistry`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockClassId(u32);

#[derive(Debug, Clone)]
pub struct BlockClassDesc {
    /// The fully qualified name
    pub name: SmolStr,
    pub parent: Option<BlockClassId>,
}

/// Explicit registry of the known classes
#[derive(Debug, Clone)]
pub struct BlockClassRegistry {
    classes: Vec<BlockClassDesc>,
    by_name: FxHashMap<SmolStr, BlockClassId>,
}

impl Default for BlockClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockClassRegistry {
    /// Creates a registry that only knows the root block class
    pub fn new() -> Self {
        let mut registry = BlockClassRegistry {
            classes: Vec::new(),
            by_name: FxHashMap::default(),
        };
        registry.insert(BLOCK_CLASS, None);
        registry
    }

    /// The root class every block class descends from
    pub fn block(&self) -> BlockClassId {
        BlockClassId(0)
    }

    /// Registers a class with a fully qualified `name`.
    /// Registering a name twice returns the existing id.
    pub fn register(&mut self, name: &str, parent: BlockClassId) -> BlockClassId {
        self.insert(name, Some(parent))
    }

    /// Registers a class which does not descend from the root block class
    pub fn register_unrelated(&mut self, name: &str) -> BlockClassId {
        self.insert(name, None)
    }

    fn insert(&mut self, name: &str, parent: Option<BlockClassId>) -> BlockClassId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = BlockClassId(u32::try_from(self.classes.len()).expect("Too many block classes"));
        self.classes.push(BlockClassDesc {
            name: name.into(),
            parent,
        });
        self.by_name.insert(name.into(), id);
        id
    }

    pub fn get(&self, id: BlockClassId) -> Option<&BlockClassDesc> {
        self.classes.get(id.0 as usize)
    }

    /// Returns the class with the exact fully qualified `name`
    pub fn by_qualified_name(&self, name: &str) -> Option<BlockClassId> {
        self.by_name.get(name).copied()
    }

    /// Resolves a short class name the way block queries do: every namespace in
    /// [`CLASS_NAMESPACES`] is tried in order, and the first class found that
    /// descends from the root block class wins.
    pub fn resolve(&self, short_name: &str) -> Option<BlockClassId> {
        CLASS_NAMESPACES
            .iter()
            .filter_map(|namespace| self.by_qualified_name(&format!("{namespace}{short_name}")))
            .find(|id| self.is_subclass_of(*id, self.block()))
    }

    /// Whether `class` is `ancestor` or inherits from it
    pub fn is_subclass_of(&self, class: BlockClassId, ancestor: BlockClassId) -> bool {
        let mut current = Some(class);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(|desc| desc.parent);
        }
        false
    }

    pub fn name(&self, id: BlockClassId) -> &str {
        self.get(id).map_or("<unknown>", |desc| desc.name.as_str())
    }

    /// The name without its namespace, e.g. `BlockLeaves`
    pub fn short_name(&self, id: BlockClassId) -> &str {
        let name = self.name(id);
        name.rsplit_once('.').map_or(name, |(_, short)| short)
    }
}
