#![allow(dead_code)]

use bop_worldgen::{
    common::{Config, SymbolMode},
    patcher::{
        write_class, ClassNode, FieldOp, Insn, InsnList, JumpOp, Label, Mappings, MemberRef,
        MethodNode,
    },
    WorldgenSetup,
};

pub fn setup() -> WorldgenSetup {
    WorldgenSetup::new(Config::default()).unwrap()
}

fn op(opcode: u8) -> Insn {
    Insn::Other {
        opcode,
        operands: Vec::new(),
    }
}

/// Encodes a chunk provider whose generator method compares the world type
/// against the amplified one `checks` times
pub fn chunk_provider(symbol_mode: SymbolMode, checks: u32) -> Vec<u8> {
    let mappings = Mappings::for_mode(symbol_mode);
    let world_type = MemberRef::new(
        "net/minecraft/world/gen/ChunkProviderGenerate",
        "field_147435_p",
        mappings.amplified_field.desc.clone(),
    );

    let mut insns = Vec::new();
    for label in 0..checks {
        insns.extend([
            op(0x2a),
            Insn::Field {
                op: FieldOp::GetField,
                field: world_type.clone(),
            },
            Insn::Field {
                op: FieldOp::GetStatic,
                field: mappings.amplified_field.clone(),
            },
            Insn::Jump {
                op: JumpOp::IfACmpNe,
                target: Label(label),
            },
            op(0x04),
            op(0x3c),
            Insn::Label(Label(label)),
        ]);
    }
    insns.push(op(0xb1));

    let class = ClassNode {
        version: 50,
        access: 0x0021,
        name: "net/minecraft/world/gen/ChunkProviderGenerate".into(),
        super_name: "java/lang/Object".into(),
        methods: vec![MethodNode {
            access: 0x0002,
            name: mappings.target_method.into(),
            desc: mappings.target_desc.into(),
            max_stack: 2,
            max_locals: 5,
            instructions: InsnList::new(insns).unwrap(),
            frames: Vec::new(),
        }],
    };
    write_class(&class, true).unwrap()
}
