use std::{borrow::Cow, fmt};

use bop_common::{Config, MissingPatternPolicy};
use bop_error::{PatchError, PatchResult};
use log::{debug, info, warn};

use crate::{
    class_node::{ClassNode, MethodNode},
    class_reader::read_class,
    class_writer::write_class,
    insn::{Insn, JumpOp},
    mappings::{Mappings, TARGET_CLASS},
};

/// A hook the class loader calls for every class before defining it
pub trait ClassTransformer {
    /// Returns the class bytes to define
    ///
    /// `name` is the name the class is requested under, `transformed_name`
    /// its readable binary name. Classes a transformer does not care about
    /// are returned borrowed.
    fn transform<'a>(
        &self,
        name: &str,
        transformed_name: &str,
        bytes: &'a [u8],
    ) -> PatchResult<Cow<'a, [u8]>>;
}

/// What happened to the target class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The amplified check was replaced by a call to the hook
    Patched,
    /// The class does not declare the target method
    NoEligibleMethod,
    /// The target method does not read the amplified field, which is only
    /// returned with [`MissingPatternPolicy::PassThrough`]
    PatternMissing,
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PatchOutcome::Patched => "patched",
            PatchOutcome::NoEligibleMethod => "no eligible method",
            PatchOutcome::PatternMissing => "pattern missing",
        };
        f.write_str(text)
    }
}

/// Makes `ChunkProviderGenerate` generate amplified terrain for the mod's
/// amplified world type
///
/// The target method compares the world type against the built-in amplified
/// type:
///
/// ```text
/// GETSTATIC WorldType.AMPLIFIED
/// IF_ACMPNE L
/// ```
///
/// which is replaced by
///
/// ```text
/// INVOKESTATIC ChunkProviderGenerateClassTransformer.isAmplifiedHook
/// IFEQ L
/// ```
#[derive(Debug, Clone)]
pub struct ChunkProviderGenerateTransformer {
    mappings: Mappings,
    missing_pattern: MissingPatternPolicy,
}

impl ChunkProviderGenerateTransformer {
    pub fn new(config: &Config) -> Self {
        ChunkProviderGenerateTransformer {
            mappings: Mappings::for_mode(config.symbol_mode),
            missing_pattern: config.missing_pattern,
        }
    }

    pub fn mappings(&self) -> &Mappings {
        &self.mappings
    }

    /// Decodes `bytes`, patches the class and encodes it again with recomputed frames
    pub fn patch(&self, bytes: &[u8]) -> PatchResult<(Vec<u8>, PatchOutcome)> {
        let mut class = read_class(bytes)?;
        let outcome = self.patch_class(&mut class)?;
        let bytes = write_class(&class, true)?;
        Ok((bytes, outcome))
    }

    /// Patches the target method of `class`
    pub fn patch_class(&self, class: &mut ClassNode) -> PatchResult<PatchOutcome> {
        let class_name = class.binary_name();
        let Some(method) =
            class.method_mut(self.mappings.target_method, self.mappings.target_desc)
        else {
            info!("{class_name} has no eligible method");
            return Ok(PatchOutcome::NoEligibleMethod);
        };

        if self.patch_method(method)? {
            debug!(
                "Replaced the amplified check in {class_name}.{}",
                method.name
            );
            return Ok(PatchOutcome::Patched);
        }

        match self.missing_pattern {
            MissingPatternPolicy::Abort => Err(PatchError::TargetNotFound {
                class: class_name,
                method: method.name.to_string(),
                pattern: format!("GETSTATIC {}", self.mappings.amplified_field),
            }),
            MissingPatternPolicy::PassThrough => {
                warn!(
                    "{class_name}.{} does not read {}, leaving it unmodified",
                    method.name, self.mappings.amplified_field
                );
                Ok(PatchOutcome::PatternMissing)
            }
        }
    }

    /// Rewrites the first read of the amplified field, returns whether there was one
    fn patch_method(&self, method: &mut MethodNode) -> PatchResult<bool> {
        let instructions = &mut method.instructions;
        let Some(index) = instructions.find(0, |insn| {
            insn.is_static_read_of(&self.mappings.amplified_field)
        }) else {
            return Ok(false);
        };

        let next = instructions.get(index + 1);
        let Some(target) = next.and_then(Insn::jump_target) else {
            return Err(PatchError::UnexpectedInstruction {
                method: method.name.to_string(),
                index: index + 1,
                expected: "a jump",
                got: next.map_or_else(|| "end of method".to_string(), ToString::to_string),
            });
        };

        instructions.insert_before(
            index,
            [
                Insn::invoke_static(Mappings::hook()),
                Insn::Jump {
                    op: JumpOp::IfEq,
                    target,
                },
            ],
        )?;
        instructions.remove_range(index + 2..index + 4)?;
        Ok(true)
    }
}

impl ClassTransformer for ChunkProviderGenerateTransformer {
    fn transform<'a>(
        &self,
        _name: &str,
        transformed_name: &str,
        bytes: &'a [u8],
    ) -> PatchResult<Cow<'a, [u8]>> {
        if transformed_name != TARGET_CLASS {
            return Ok(Cow::Borrowed(bytes));
        }

        info!("Transforming {transformed_name}");
        let (bytes, _) = self.patch(bytes)?;
        Ok(Cow::Owned(bytes))
    }
}
