//! The world model that block queries are evaluated against
//!
//! Contains positions, materials, block classes, the block registry and an
//! in-memory [`SnapshotWorld`], as well as the table of world types.

mod block;
pub use block::{BlockDef, BlockId, BlockState, PropertyValue, ResourceName, DEFAULT_NAMESPACE};

mod block_class;
pub use block_class::{
    BlockClassDesc, BlockClassId, BlockClassRegistry, BLOCK_CLASS, CLASS_NAMESPACES,
};

mod material;
pub use material::Material;

mod plant;
pub use plant::{PlantType, SustainsPlantType};

mod pos;
pub use pos::{BlockPos, Direction};

mod registry;
pub use registry::BlockRegistry;

mod world;
pub use world::{SnapshotWorld, World};

pub mod vanilla;
pub mod world_type;
pub use world_type::{WorldType, WorldTypes};
