use std::fmt;

use itertools::Itertools;
use smol_str::SmolStr;

use crate::insn_list::InsnList;

/// Verification metadata of a jump target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StackMapFrame {
    /// Bytecode offset of the target
    pub offset: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodNode {
    pub access: u16,
    pub name: SmolStr,
    pub desc: SmolStr,
    pub max_stack: u16,
    pub max_locals: u16,
    pub instructions: InsnList,
    pub frames: Vec<StackMapFrame>,
}

impl MethodNode {
    /// Computes one frame per label that is the target of a jump, ordered by offset
    pub fn compute_frames(&self) -> Vec<StackMapFrame> {
        let offsets = self.instructions.label_offsets();
        self.instructions
            .iter()
            .filter_map(|insn| insn.jump_target())
            .filter_map(|label| offsets.get(&label).copied())
            .sorted()
            .dedup()
            .map(|offset| StackMapFrame { offset })
            .collect()
    }
}

impl fmt::Display for MethodNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}{}:", self.name, self.desc)?;
        for insn in self.instructions.iter() {
            writeln!(f, "  {insn}")?;
        }
        Ok(())
    }
}

/// A decoded class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    pub version: u16,
    pub access: u16,
    /// Internal name, e.g. `net/minecraft/world/gen/ChunkProviderGenerate`
    pub name: SmolStr,
    pub super_name: SmolStr,
    pub methods: Vec<MethodNode>,
}

impl ClassNode {
    pub fn method(&self, name: &str, desc: &str) -> Option<&MethodNode> {
        self.methods
            .iter()
            .find(|method| method.name == name && method.desc == desc)
    }

    pub fn method_mut(&mut self, name: &str, desc: &str) -> Option<&mut MethodNode> {
        self.methods
            .iter_mut()
            .find(|method| method.name == name && method.desc == desc)
    }

    /// The name with dots, as class loaders report it
    pub fn binary_name(&self) -> String {
        self.name.replace('/', ".")
    }
}
