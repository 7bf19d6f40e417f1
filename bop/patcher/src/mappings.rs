//! Engine symbol names, per [`SymbolMode`]

use bop_common::SymbolMode;

use crate::insn::MemberRef;

/// Binary name of the class that gets patched
pub const TARGET_CLASS: &str = "net.minecraft.world.gen.ChunkProviderGenerate";

pub const HOOK_OWNER: &str = "biomesoplenty/common/transformer/ChunkProviderGenerateClassTransformer";
pub const HOOK_NAME: &str = "isAmplifiedHook";
/// The hook lives in mod code, which is always compiled against the readable names
pub const HOOK_DESC: &str = "(Lnet/minecraft/world/WorldType;)Z";

/// The names the patcher looks for in one symbol mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mappings {
    pub symbol_mode: SymbolMode,
    /// Name of the method that reads the amplified world type
    pub target_method: &'static str,
    pub target_desc: &'static str,
    /// The static field holding the built-in amplified world type
    pub amplified_field: MemberRef,
}

impl Mappings {
    pub fn for_mode(symbol_mode: SymbolMode) -> Self {
        match symbol_mode {
            SymbolMode::Normal => Mappings {
                symbol_mode,
                target_method: "func_147423_a",
                target_desc: "(III)V",
                amplified_field: MemberRef::new(
                    "net/minecraft/world/WorldType",
                    "field_151360_e",
                    "Lnet/minecraft/world/WorldType;",
                ),
            },
            SymbolMode::Obfuscated => Mappings {
                symbol_mode,
                target_method: "a",
                target_desc: "(III)V",
                amplified_field: MemberRef::new("ahm", "e", "Lahm;"),
            },
        }
    }

    pub fn hook() -> MemberRef {
        MemberRef::new(HOOK_OWNER, HOOK_NAME, HOOK_DESC)
    }
}
