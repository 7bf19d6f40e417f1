use std::fmt;

/// Declares the material enum together with the name the engine uses for
/// each material constant
macro_rules! materials {
    ($($variant:ident => $name:literal,)*) => {
        /// The material of a block, which groups blocks by physical behavior
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Material {
            $($variant,)*
        }

        impl Material {
            pub const ALL: &'static [Material] = &[$(Material::$variant,)*];

            /// The name of the engine's material constant
            pub fn name(self) -> &'static str {
                match self {
                    $(Material::$variant => $name,)*
                }
            }

            /// Looks a material up by the exact name of the engine's constant
            pub fn from_name(name: &str) -> Option<Material> {
                match name {
                    $($name => Some(Material::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

materials! {
    Air => "air",
    Grass => "grass",
    Ground => "ground",
    Wood => "wood",
    Rock => "rock",
    Iron => "iron",
    Anvil => "anvil",
    Water => "water",
    Lava => "lava",
    Leaves => "leaves",
    Plants => "plants",
    Vine => "vine",
    Sponge => "sponge",
    Cloth => "cloth",
    Fire => "fire",
    Sand => "sand",
    Circuits => "circuits",
    Carpet => "carpet",
    Glass => "glass",
    RedstoneLight => "redstoneLight",
    Tnt => "tnt",
    Coral => "coral",
    Ice => "ice",
    PackedIce => "packedIce",
    Snow => "snow",
    CraftedSnow => "craftedSnow",
    Cactus => "cactus",
    Clay => "clay",
    Gourd => "gourd",
    DragonEgg => "dragonEgg",
    Portal => "portal",
    Cake => "cake",
    Web => "web",
    Piston => "piston",
    Barrier => "barrier",
}

impl Material {
    pub fn is_liquid(self) -> bool {
        matches!(self, Material::Water | Material::Lava)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
