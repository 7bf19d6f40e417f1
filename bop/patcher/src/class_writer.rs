use bop_common::FxIndexSet;
use bop_error::{PatchError, PatchResult};
use smol_str::SmolStr;

use crate::{
    class_node::{ClassNode, MethodNode},
    class_reader::{MAGIC, TAG_FIELD, TAG_JUMP, TAG_LABEL, TAG_METHOD, TAG_OTHER},
    insn::{Insn, MemberRef},
};

/// Encodes `class` in the format read by [`crate::read_class`]
///
/// With `compute_frames` the frames of every method are recomputed from its
/// instructions, otherwise the stored frames are written as they are.
pub fn write_class(class: &ClassNode, compute_frames: bool) -> PatchResult<Vec<u8>> {
    let pool = collect_pool(class);

    let mut writer = ClassWriter {
        out: Vec::new(),
        pool: &pool,
    };
    writer.out.extend_from_slice(MAGIC);
    writer.u16(class.version);

    writer.u16(len_u16(pool.len(), "pool entries")?);
    for entry in &pool {
        writer.u16(len_u16(entry.len(), "bytes in a pool entry")?);
        writer.out.extend_from_slice(entry.as_bytes());
    }

    writer.u16(class.access);
    writer.string(&class.name);
    writer.string(&class.super_name);

    writer.u16(len_u16(class.methods.len(), "methods")?);
    for method in &class.methods {
        writer.method(method, compute_frames)?;
    }

    Ok(writer.out)
}

/// Collects every string in the order the writer references it
fn collect_pool(class: &ClassNode) -> FxIndexSet<SmolStr> {
    let mut pool = FxIndexSet::default();
    pool.insert(class.name.clone());
    pool.insert(class.super_name.clone());
    for method in &class.methods {
        pool.insert(method.name.clone());
        pool.insert(method.desc.clone());
        for insn in method.instructions.iter() {
            if let Insn::Field { field: member, .. } | Insn::Method { method: member, .. } = insn
            {
                pool.insert(member.owner.clone());
                pool.insert(member.name.clone());
                pool.insert(member.desc.clone());
            }
        }
    }
    pool
}

fn len_u16(len: usize, what: &str) -> PatchResult<u16> {
    u16::try_from(len).map_err(|_| PatchError::malformed(0, format!("Too many {what}: {len}")))
}

struct ClassWriter<'a> {
    out: Vec<u8>,
    pool: &'a FxIndexSet<SmolStr>,
}

impl ClassWriter<'_> {
    fn u8(&mut self, value: u8) {
        self.out.push(value);
    }

    fn u16(&mut self, value: u16) {
        self.out.extend_from_slice(&value.to_be_bytes());
    }

    fn u32(&mut self, value: u32) {
        self.out.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes the pool index of `value`, which must have been collected before
    #[allow(clippy::cast_possible_truncation)]
    fn string(&mut self, value: &str) {
        let index = self
            .pool
            .get_index_of(value)
            .unwrap_or_else(|| unreachable!("'{value}' was not collected into the pool"));
        // The pool length was checked to fit
        self.u16(index as u16);
    }

    fn member(&mut self, member: &MemberRef) {
        self.string(&member.owner);
        self.string(&member.name);
        self.string(&member.desc);
    }

    fn method(&mut self, method: &MethodNode, compute_frames: bool) -> PatchResult<()> {
        self.u16(method.access);
        self.string(&method.name);
        self.string(&method.desc);
        self.u16(method.max_stack);
        self.u16(method.max_locals);

        let insn_count = u32::try_from(method.instructions.len())
            .map_err(|_| PatchError::malformed(0, "Too many instructions"))?;
        self.u32(insn_count);
        for insn in method.instructions.iter() {
            self.insn(insn)?;
        }

        let computed;
        let frames = if compute_frames {
            computed = method.compute_frames();
            &computed
        } else {
            &method.frames
        };
        self.u16(len_u16(frames.len(), "frames")?);
        for frame in frames {
            self.u32(frame.offset);
        }
        Ok(())
    }

    fn insn(&mut self, insn: &Insn) -> PatchResult<()> {
        match insn {
            Insn::Label(label) => {
                self.u8(TAG_LABEL);
                self.u32(label.0);
            }
            Insn::Field { op, field } => {
                self.u8(TAG_FIELD);
                self.u8(op.as_byte());
                self.member(field);
            }
            Insn::Method {
                op,
                method,
                interface,
            } => {
                self.u8(TAG_METHOD);
                self.u8(op.as_byte());
                self.member(method);
                self.u8(u8::from(*interface));
            }
            Insn::Jump { op, target } => {
                self.u8(TAG_JUMP);
                self.u8(op.as_byte());
                self.u32(target.0);
            }
            Insn::Other { opcode, operands } => {
                let len = u8::try_from(operands.len()).map_err(|_| {
                    PatchError::malformed(0, format!("Too many operands for opcode 0x{opcode:02x}"))
                })?;
                self.u8(TAG_OTHER);
                self.u8(*opcode);
                self.u8(len);
                self.out.extend_from_slice(operands);
            }
        }
        Ok(())
    }
}
