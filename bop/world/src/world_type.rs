//! World types
//!
//! The engine keeps world types in a fixed table of sixteen slots and writes
//! their names into a sixteen character field of the level data.

use bop_error::WorldTypeError;
use log::info;
use smol_str::SmolStr;

pub const WORLD_TYPE_SLOTS: usize = 16;
pub const MAX_NAME_LENGTH: usize = 16;

pub const DEFAULT: &str = "default";
pub const FLAT: &str = "flat";
pub const LARGE_BIOMES: &str = "largeBiomes";
pub const AMPLIFIED: &str = "amplified";
pub const DEFAULT_1_1: &str = "default_1_1";

/// The world type of the mod
pub const BIOMES_O_PLENTY: &str = "BIOMESOP";
/// The mod's amplified world type, which the engine has to treat like [`AMPLIFIED`]
pub const BIOMES_O_PLENTY_AMPLIFIED: &str = "BIOMESOPAMPL";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorldType {
    /// The slot this type occupies
    pub id: u8,
    pub name: SmolStr,
    /// Whether the world creation screen shows an information notice for this type
    pub show_info_notice: bool,
}

impl WorldType {
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

#[derive(Debug, Clone)]
pub struct WorldTypes {
    slots: [Option<WorldType>; WORLD_TYPE_SLOTS],
}

impl Default for WorldTypes {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl WorldTypes {
    /// A table containing only the engine's own world types
    pub fn with_builtins() -> Self {
        let mut types = WorldTypes {
            slots: Default::default(),
        };
        for (id, name, show_info_notice) in [
            (0, DEFAULT, false),
            (1, FLAT, false),
            (2, LARGE_BIOMES, false),
            (3, AMPLIFIED, true),
            (8, DEFAULT_1_1, false),
        ] {
            types.slots[id as usize] = Some(WorldType {
                id,
                name: name.into(),
                show_info_notice,
            });
        }
        types
    }

    /// Registers `name` in the first free slot
    pub fn register(
        &mut self,
        name: &str,
        show_info_notice: bool,
    ) -> Result<&WorldType, WorldTypeError> {
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(WorldTypeError::NameTooLong {
                name: name.to_string(),
                max: MAX_NAME_LENGTH,
            });
        }
        if self.get(name).is_some() {
            return Err(WorldTypeError::AlreadyRegistered {
                name: name.to_string(),
            });
        }
        let Some(index) = self.slots.iter().position(Option::is_none) else {
            return Err(WorldTypeError::NoFreeSlot {
                name: name.to_string(),
            });
        };

        info!("Registering world type {name} in slot {index}");
        let slot = &mut self.slots[index];
        Ok(slot.insert(WorldType {
            id: u8::try_from(index).expect("Slot index fits a byte"),
            name: name.into(),
            show_info_notice,
        }))
    }

    /// Registers the mod's normal and amplified world types
    pub fn register_mod_types(&mut self) -> Result<(), WorldTypeError> {
        self.register(BIOMES_O_PLENTY, false)?;
        self.register(BIOMES_O_PLENTY_AMPLIFIED, true)?;
        Ok(())
    }

    /// Looks a world type up by name, ignoring case like the engine does
    pub fn get(&self, name: &str) -> Option<&WorldType> {
        self.iter()
            .find(|world_type| world_type.name.eq_ignore_ascii_case(name))
    }

    pub fn by_id(&self, id: u8) -> Option<&WorldType> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorldType> {
        self.slots.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use bop_error::WorldTypeError;

    use super::{WorldTypes, AMPLIFIED, BIOMES_O_PLENTY, BIOMES_O_PLENTY_AMPLIFIED};

    #[test]
    fn mod_types_take_the_first_free_slots() {
        let mut types = WorldTypes::with_builtins();
        types.register_mod_types().unwrap();

        assert_eq!(types.get(AMPLIFIED).unwrap().id, 3);
        assert_eq!(types.get(BIOMES_O_PLENTY).unwrap().id, 4);
        let amplified = types.get(BIOMES_O_PLENTY_AMPLIFIED).unwrap();
        assert_eq!(amplified.id, 5);
        assert!(amplified.show_info_notice);
        assert_eq!(types.get("biomesop").unwrap().id, 4);
        assert_eq!(types.by_id(8).unwrap().name, "default_1_1");
    }

    #[test]
    fn rejects_invalid_registrations() {
        let mut types = WorldTypes::with_builtins();
        assert_eq!(
            types.register("BIOMESOPAMPLIFIED", true),
            Err(WorldTypeError::NameTooLong {
                name: "BIOMESOPAMPLIFIED".to_string(),
                max: 16
            })
        );
        assert_eq!(
            types.register("FLAT", false),
            Err(WorldTypeError::AlreadyRegistered {
                name: "FLAT".to_string()
            })
        );

        for index in 0..11 {
            types.register(&format!("custom{index}"), false).unwrap();
        }
        assert!(matches!(
            types.register("onetoomany", false),
            Err(WorldTypeError::NoFreeSlot { .. })
        ));
    }
}
