//! Decoder for the class format
//!
//! ```text
//! magic      "BOPC"
//! version    u16
//! pool       u16 count, then count times (u16 length, utf-8 bytes)
//! access     u16, name u16, super_name u16        (names are pool indices)
//! methods    u16 count, each:
//!   access u16, name u16, desc u16, max_stack u16, max_locals u16
//!   insns    u32 count, each a tag byte and its payload:
//!              0 label   u32 id
//!              1 field   opcode u8, owner u16, name u16, desc u16
//!              2 method  opcode u8, owner u16, name u16, desc u16, interface u8
//!              3 jump    opcode u8, label u32
//!              4 other   opcode u8, length u8, operand bytes
//!   frames   u16 count, each a u32 offset
//! ```
//!
//! All integers are big endian.

use bop_error::{PatchError, PatchResult};
use smol_str::SmolStr;

use crate::{
    class_node::{ClassNode, MethodNode, StackMapFrame},
    insn::{FieldOp, Insn, InvokeOp, JumpOp, Label, MemberRef},
    insn_list::InsnList,
};

pub const MAGIC: &[u8; 4] = b"BOPC";

pub(crate) const TAG_LABEL: u8 = 0;
pub(crate) const TAG_FIELD: u8 = 1;
pub(crate) const TAG_METHOD: u8 = 2;
pub(crate) const TAG_JUMP: u8 = 3;
pub(crate) const TAG_OTHER: u8 = 4;

/// Decodes a class
pub fn read_class(bytes: &[u8]) -> PatchResult<ClassNode> {
    ClassReader::new(bytes).read()
}

struct ClassReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    pool: Vec<SmolStr>,
}

impl<'a> ClassReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        ClassReader {
            bytes,
            pos: 0,
            pool: Vec::new(),
        }
    }

    fn take(&mut self, len: usize) -> PatchResult<&'a [u8]> {
        let bytes = self
            .bytes
            .get(self.pos..self.pos.saturating_add(len))
            .ok_or_else(|| PatchError::malformed(self.pos, "Unexpected end of input"))?;
        self.pos += len;
        Ok(bytes)
    }

    fn u8(&mut self) -> PatchResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> PatchResult<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn u32(&mut self) -> PatchResult<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads a pool index and returns the string it refers to
    fn string(&mut self) -> PatchResult<SmolStr> {
        let offset = self.pos;
        let index = self.u16()?;
        self.pool.get(index as usize).cloned().ok_or_else(|| {
            PatchError::malformed(
                offset,
                format!(
                    "Pool index {index} out of range (pool has {} entries)",
                    self.pool.len()
                ),
            )
        })
    }

    fn member(&mut self) -> PatchResult<MemberRef> {
        Ok(MemberRef {
            owner: self.string()?,
            name: self.string()?,
            desc: self.string()?,
        })
    }

    fn read(mut self) -> PatchResult<ClassNode> {
        if self.take(4)? != MAGIC {
            return Err(PatchError::malformed(0, "Bad magic"));
        }
        let version = self.u16()?;

        let pool_len = self.u16()?;
        for _ in 0..pool_len {
            let len = self.u16()? as usize;
            let offset = self.pos;
            let bytes = self.take(len)?;
            let value = std::str::from_utf8(bytes)
                .map_err(|_| PatchError::malformed(offset, "Invalid utf-8 in pool entry"))?;
            self.pool.push(value.into());
        }

        let access = self.u16()?;
        let name = self.string()?;
        let super_name = self.string()?;

        let method_count = self.u16()?;
        let methods = (0..method_count)
            .map(|_| self.method())
            .collect::<PatchResult<_>>()?;

        if self.pos != self.bytes.len() {
            return Err(PatchError::malformed(self.pos, "Trailing bytes"));
        }

        Ok(ClassNode {
            version,
            access,
            name,
            super_name,
            methods,
        })
    }

    fn method(&mut self) -> PatchResult<MethodNode> {
        let access = self.u16()?;
        let name = self.string()?;
        let desc = self.string()?;
        let max_stack = self.u16()?;
        let max_locals = self.u16()?;

        let insn_count = self.u32()?;
        let mut insns = Vec::new();
        for _ in 0..insn_count {
            insns.push(self.insn()?);
        }

        let frame_count = self.u16()?;
        let frames = (0..frame_count)
            .map(|_| self.u32().map(|offset| StackMapFrame { offset }))
            .collect::<PatchResult<_>>()?;

        Ok(MethodNode {
            access,
            name,
            desc,
            max_stack,
            max_locals,
            instructions: InsnList::new(insns)?,
            frames,
        })
    }

    fn insn(&mut self) -> PatchResult<Insn> {
        let offset = self.pos;
        let tag = self.u8()?;
        let insn = match tag {
            TAG_LABEL => Insn::Label(Label(self.u32()?)),
            TAG_FIELD => {
                let op = self.opcode(FieldOp::from_byte)?;
                Insn::Field {
                    op,
                    field: self.member()?,
                }
            }
            TAG_METHOD => {
                let op = self.opcode(InvokeOp::from_byte)?;
                let method = self.member()?;
                let interface = self.u8()? != 0;
                Insn::Method {
                    op,
                    method,
                    interface,
                }
            }
            TAG_JUMP => {
                let op = self.opcode(JumpOp::from_byte)?;
                Insn::Jump {
                    op,
                    target: Label(self.u32()?),
                }
            }
            TAG_OTHER => {
                let opcode = self.u8()?;
                let len = self.u8()? as usize;
                let operands = self.take(len)?.to_vec();
                Insn::Other { opcode, operands }
            }
            other => {
                return Err(PatchError::malformed(
                    offset,
                    format!("Unknown instruction tag {other}"),
                ))
            }
        };
        Ok(insn)
    }

    fn opcode<T>(&mut self, decode: impl Fn(u8) -> Option<T>) -> PatchResult<T> {
        let offset = self.pos;
        let byte = self.u8()?;
        decode(byte)
            .ok_or_else(|| PatchError::malformed(offset, format!("Unknown opcode 0x{byte:02x}")))
    }
}
