use std::borrow::Cow;

use bop_common::{Config, MissingPatternPolicy, SymbolMode};
use bop_error::PatchError;
use expect_test::expect;

use crate::{
    mappings::TARGET_CLASS, read_class, write_class, ChunkProviderGenerateTransformer, ClassNode,
    ClassTransformer, FieldOp, Insn, InsnList, JumpOp, Label, Mappings, MemberRef, MethodNode,
    PatchOutcome, StackMapFrame, MAGIC,
};

fn op(opcode: u8, operands: &[u8]) -> Insn {
    Insn::Other {
        opcode,
        operands: operands.to_vec(),
    }
}

/// A class shaped like the engine's chunk provider, compiled with the names of `symbol_mode`
fn chunk_provider(symbol_mode: SymbolMode) -> ClassNode {
    let mappings = Mappings::for_mode(symbol_mode);
    let world_type = &mappings.amplified_field;

    let generate = MethodNode {
        access: 0x0002,
        name: mappings.target_method.into(),
        desc: mappings.target_desc.into(),
        max_stack: 2,
        max_locals: 5,
        instructions: InsnList::new(vec![
            op(0x2a, &[]),
            Insn::Field {
                op: FieldOp::GetField,
                field: MemberRef::new(
                    "net/minecraft/world/gen/ChunkProviderGenerate",
                    "field_147435_p",
                    world_type.desc.clone(),
                ),
            },
            Insn::Field {
                op: FieldOp::GetStatic,
                field: world_type.clone(),
            },
            Insn::Jump {
                op: JumpOp::IfACmpNe,
                target: Label(1),
            },
            op(0x12, &[1]),
            op(0x38, &[4]),
            Insn::Label(Label(1)),
            op(0xb1, &[]),
        ])
        .unwrap(),
        frames: vec![StackMapFrame { offset: 14 }],
    };
    let constructor = MethodNode {
        access: 0x0001,
        name: "<init>".into(),
        desc: "()V".into(),
        max_stack: 1,
        max_locals: 1,
        instructions: InsnList::new(vec![op(0x2a, &[]), op(0xb1, &[])]).unwrap(),
        frames: Vec::new(),
    };

    ClassNode {
        version: 50,
        access: 0x0021,
        name: "net/minecraft/world/gen/ChunkProviderGenerate".into(),
        super_name: "java/lang/Object".into(),
        methods: vec![constructor, generate],
    }
}

fn bytes(class: &ClassNode) -> Vec<u8> {
    write_class(class, false).unwrap()
}

fn transformer(
    symbol_mode: SymbolMode,
    policy: MissingPatternPolicy,
) -> ChunkProviderGenerateTransformer {
    let config = Config::default()
        .with_symbol_mode(symbol_mode)
        .with_missing_pattern(policy);
    ChunkProviderGenerateTransformer::new(&config)
}

fn target_method(class: &ClassNode, symbol_mode: SymbolMode) -> &MethodNode {
    let mappings = Mappings::for_mode(symbol_mode);
    class
        .method(mappings.target_method, mappings.target_desc)
        .unwrap()
}

#[test]
fn codec_keeps_classes_intact() {
    let class = chunk_provider(SymbolMode::Normal);
    let encoded = bytes(&class);
    assert!(encoded.starts_with(MAGIC));
    assert_eq!(read_class(&encoded).unwrap(), class);
}

#[test]
fn other_classes_are_borrowed() {
    let transformer = transformer(SymbolMode::Normal, MissingPatternPolicy::Abort);
    let garbage = [0xca, 0xfe];
    let result = transformer
        .transform("ahm", "net.minecraft.world.WorldType", &garbage)
        .unwrap();
    assert!(matches!(result, Cow::Borrowed(bytes) if bytes == garbage));
}

#[test]
fn replaces_the_amplified_check() {
    let transformer = transformer(SymbolMode::Normal, MissingPatternPolicy::Abort);
    let input = bytes(&chunk_provider(SymbolMode::Normal));
    let output = transformer
        .transform(TARGET_CLASS, TARGET_CLASS, &input)
        .unwrap();
    let class = read_class(&output).unwrap();

    let method = target_method(&class, SymbolMode::Normal);
    expect![[r#"
        func_147423_a(III)V:
          op 0x2a
          GETFIELD net/minecraft/world/gen/ChunkProviderGenerate.field_147435_p Lnet/minecraft/world/WorldType;
          INVOKESTATIC biomesoplenty/common/transformer/ChunkProviderGenerateClassTransformer.isAmplifiedHook (Lnet/minecraft/world/WorldType;)Z
          IFEQ L1
          op 0x12 01
          op 0x38 04
          L1:
          op 0xb1
    "#]]
    .assert_eq(&method.to_string());
    assert_eq!(method.frames, [StackMapFrame { offset: 14 }]);

    // Other methods are left alone
    assert_eq!(
        class.method("<init>", "()V"),
        chunk_provider(SymbolMode::Normal).method("<init>", "()V")
    );
}

#[test]
fn obfuscated_names() {
    let transformer = transformer(SymbolMode::Obfuscated, MissingPatternPolicy::Abort);
    let mut class = chunk_provider(SymbolMode::Obfuscated);
    assert_eq!(
        transformer.patch_class(&mut class),
        Ok(PatchOutcome::Patched)
    );

    let method = target_method(&class, SymbolMode::Obfuscated);
    let hook = method
        .instructions
        .find(0, |insn| matches!(insn, Insn::Method { .. }))
        .unwrap();
    assert_eq!(
        method.instructions.get(hook),
        Some(&Insn::invoke_static(Mappings::hook()))
    );
    assert!(!method
        .instructions
        .iter()
        .any(|insn| insn.to_string().contains("ahm.e")));
}

#[test]
fn missing_method_is_not_an_error() {
    for (transformer_mode, class_mode) in [
        (SymbolMode::Normal, SymbolMode::Obfuscated),
        (SymbolMode::Obfuscated, SymbolMode::Normal),
    ] {
        let transformer = transformer(transformer_mode, MissingPatternPolicy::Abort);
        let class = chunk_provider(class_mode);
        let (output, outcome) = transformer.patch(&bytes(&class)).unwrap();
        assert_eq!(outcome, PatchOutcome::NoEligibleMethod);
        assert_eq!(read_class(&output).unwrap(), class);
    }
}

#[test]
fn patching_twice_finds_no_pattern() {
    let input = bytes(&chunk_provider(SymbolMode::Normal));
    let abort = transformer(SymbolMode::Normal, MissingPatternPolicy::Abort);
    let (patched, outcome) = abort.patch(&input).unwrap();
    assert_eq!(outcome, PatchOutcome::Patched);

    let error = abort.patch(&patched).unwrap_err();
    assert_eq!(
        error,
        PatchError::TargetNotFound {
            class: TARGET_CLASS.to_string(),
            method: "func_147423_a".to_string(),
            pattern: "GETSTATIC net/minecraft/world/WorldType.field_151360_e Lnet/minecraft/world/WorldType;".to_string(),
        }
    );

    let pass_through = transformer(SymbolMode::Normal, MissingPatternPolicy::PassThrough);
    let (again, outcome) = pass_through.patch(&patched).unwrap();
    assert_eq!(outcome, PatchOutcome::PatternMissing);
    assert_eq!(again, patched);
}

#[test]
fn field_read_must_be_followed_by_a_jump() {
    let mut class = chunk_provider(SymbolMode::Normal);
    let method = &mut class.methods[1];
    method.instructions = InsnList::new(vec![
        Insn::Field {
            op: FieldOp::GetStatic,
            field: Mappings::for_mode(SymbolMode::Normal).amplified_field,
        },
        op(0x57, &[]),
        op(0xb1, &[]),
    ])
    .unwrap();
    let before = class.clone();

    for policy in [MissingPatternPolicy::Abort, MissingPatternPolicy::PassThrough] {
        let mut class = before.clone();
        assert_eq!(
            transformer(SymbolMode::Normal, policy).patch_class(&mut class),
            Err(PatchError::UnexpectedInstruction {
                method: "func_147423_a".to_string(),
                index: 1,
                expected: "a jump",
                got: "op 0x57".to_string(),
            })
        );
        assert_eq!(class, before);
    }
}

#[test]
fn malformed_classes() {
    fn check(bytes: &[u8], offset: usize, reason: &str) {
        assert_eq!(
            read_class(bytes),
            Err(PatchError::malformed(offset, reason)),
            "{bytes:02x?}"
        );
    }

    check(b"CAFEBABE", 0, "Bad magic");
    check(b"BOP", 0, "Unexpected end of input");
    check(
        b"BOPC\x00\x32\x00\x00\x00\x21\x00\x00",
        10,
        "Pool index 0 out of range (pool has 0 entries)",
    );
    check(
        b"BOPC\x00\x32\x00\x01\x00\x01\xff",
        10,
        "Invalid utf-8 in pool entry",
    );

    let header = b"BOPC\x00\x32\x00\x02\x00\x01A\x00\x01B\x00\x21\x00\x00\x00\x01\x00\x01\
                   \x00\x01\x00\x00\x00\x01\x00\x02\x00\x04\x00\x00\x00\x01";
    check(&[&header[..], b"\x09"].concat(), 36, "Unknown instruction tag 9");
    check(&[&header[..], b"\x01\x00"].concat(), 37, "Unknown opcode 0x00");

    let mut truncated = bytes(&chunk_provider(SymbolMode::Normal));
    truncated.pop();
    assert!(matches!(
        read_class(&truncated),
        Err(PatchError::MalformedClass { .. })
    ));
    let mut trailing = bytes(&chunk_provider(SymbolMode::Normal));
    trailing.push(0);
    assert!(matches!(
        read_class(&trailing),
        Err(PatchError::MalformedClass { .. })
    ));
}

#[test]
fn rendered_errors() {
    let error = transformer(SymbolMode::Obfuscated, MissingPatternPolicy::Abort)
        .patch(b"BOPC")
        .unwrap_err();
    expect!["Malformed class at byte 4: Unexpected end of input"].assert_eq(&error.to_string());
}
