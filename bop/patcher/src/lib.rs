//! The binary method patcher
//!
//! Rewrites `ChunkProviderGenerate` so that the engine treats the mod's
//! amplified world type like its own. Classes are decoded into a [`ClassNode`],
//! edited through the label checked [`InsnList`] and encoded again.

mod class_node;
pub use class_node::{ClassNode, MethodNode, StackMapFrame};

mod class_reader;
pub use class_reader::{read_class, MAGIC};

mod class_writer;
pub use class_writer::write_class;

mod hook;
pub use hook::AmplifiedHook;

mod insn;
pub use insn::{FieldOp, Insn, InvokeOp, JumpOp, Label, MemberRef};

mod insn_list;
pub use insn_list::InsnList;

pub mod mappings;
pub use mappings::Mappings;

mod transformer;
pub use transformer::{ChunkProviderGenerateTransformer, ClassTransformer, PatchOutcome};

#[cfg(test)]
mod tests;
