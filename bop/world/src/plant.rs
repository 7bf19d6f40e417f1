use std::fmt;

use crate::{BlockPos, World};

/// The kinds of soil a plant can require
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlantType {
    Plains,
    Desert,
    Beach,
    Cave,
    Water,
    Nether,
    Crop,
}

impl PlantType {
    pub const ALL: [PlantType; 7] = [
        PlantType::Plains,
        PlantType::Desert,
        PlantType::Beach,
        PlantType::Cave,
        PlantType::Water,
        PlantType::Nether,
        PlantType::Crop,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlantType::Plains => "Plains",
            PlantType::Desert => "Desert",
            PlantType::Beach => "Beach",
            PlantType::Cave => "Cave",
            PlantType::Water => "Water",
            PlantType::Nether => "Nether",
            PlantType::Crop => "Crop",
        }
    }
}

impl fmt::Display for PlantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Implemented by blocks which decide on their own which plants they support.
///
/// Blocks without this capability use the fixed fallback table of the query language.
pub trait SustainsPlantType: Send + Sync + fmt::Debug {
    fn can_sustain_plant_type(&self, world: &dyn World, pos: BlockPos, plant: PlantType) -> bool;
}
