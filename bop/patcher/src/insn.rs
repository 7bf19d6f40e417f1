//! Instructions of a compiled method body

use std::fmt;

use smol_str::SmolStr;

/// Declares an opcode enum with the byte value and mnemonic of every opcode
macro_rules! opcodes {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $byte:literal => $mnemonic:literal,)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            pub fn from_byte(byte: u8) -> Option<Self> {
                match byte {
                    $($byte => Some($name::$variant),)*
                    _ => None,
                }
            }

            pub fn as_byte(self) -> u8 {
                match self {
                    $($name::$variant => $byte,)*
                }
            }

            pub fn mnemonic(self) -> &'static str {
                match self {
                    $($name::$variant => $mnemonic,)*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.mnemonic())
            }
        }
    };
}

opcodes! {
    /// Field access
    FieldOp {
        GetStatic = 0xb2 => "GETSTATIC",
        PutStatic = 0xb3 => "PUTSTATIC",
        GetField = 0xb4 => "GETFIELD",
        PutField = 0xb5 => "PUTFIELD",
    }
}

opcodes! {
    /// Method invocation
    InvokeOp {
        InvokeVirtual = 0xb6 => "INVOKEVIRTUAL",
        InvokeSpecial = 0xb7 => "INVOKESPECIAL",
        InvokeStatic = 0xb8 => "INVOKESTATIC",
        InvokeInterface = 0xb9 => "INVOKEINTERFACE",
    }
}

opcodes! {
    /// Control transfer to a label
    JumpOp {
        IfEq = 0x99 => "IFEQ",
        IfNe = 0x9a => "IFNE",
        IfLt = 0x9b => "IFLT",
        IfGe = 0x9c => "IFGE",
        IfGt = 0x9d => "IFGT",
        IfLe = 0x9e => "IFLE",
        IfICmpEq = 0x9f => "IF_ICMPEQ",
        IfICmpNe = 0xa0 => "IF_ICMPNE",
        IfICmpLt = 0xa1 => "IF_ICMPLT",
        IfICmpGe = 0xa2 => "IF_ICMPGE",
        IfICmpGt = 0xa3 => "IF_ICMPGT",
        IfICmpLe = 0xa4 => "IF_ICMPLE",
        IfACmpEq = 0xa5 => "IF_ACMPEQ",
        IfACmpNe = 0xa6 => "IF_ACMPNE",
        Goto = 0xa7 => "GOTO",
        IfNull = 0xc6 => "IFNULL",
        IfNonNull = 0xc7 => "IFNONNULL",
    }
}

/// An addressable position in an instruction list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// A field or method, identified the way compiled code refers to it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberRef {
    /// Internal name of the declaring class, e.g. `net/minecraft/world/WorldType`
    pub owner: SmolStr,
    pub name: SmolStr,
    /// Type descriptor, e.g. `Lnet/minecraft/world/WorldType;` or `(III)V`
    pub desc: SmolStr,
}

impl MemberRef {
    pub fn new(
        owner: impl Into<SmolStr>,
        name: impl Into<SmolStr>,
        desc: impl Into<SmolStr>,
    ) -> Self {
        MemberRef {
            owner: owner.into(),
            name: name.into(),
            desc: desc.into(),
        }
    }
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} {}", self.owner, self.name, self.desc)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insn {
    Label(Label),
    Field {
        op: FieldOp,
        field: MemberRef,
    },
    Method {
        op: InvokeOp,
        method: MemberRef,
        /// Whether the owner is an interface
        interface: bool,
    },
    Jump {
        op: JumpOp,
        target: Label,
    },
    /// Any other opcode, carried through as is
    Other {
        opcode: u8,
        operands: Vec<u8>,
    },
}

impl Insn {
    pub fn invoke_static(method: MemberRef) -> Self {
        Insn::Method {
            op: InvokeOp::InvokeStatic,
            method,
            interface: false,
        }
    }

    /// Whether this reads the static field `field`
    pub fn is_static_read_of(&self, field: &MemberRef) -> bool {
        matches!(self, Insn::Field { op: FieldOp::GetStatic, field: read } if read == field)
    }

    pub fn jump_target(&self) -> Option<Label> {
        match self {
            Insn::Jump { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// The number of bytecode bytes this instruction occupies
    pub fn size(&self) -> u32 {
        match self {
            Insn::Label(_) => 0,
            Insn::Method {
                op: InvokeOp::InvokeInterface,
                ..
            } => 5,
            Insn::Field { .. } | Insn::Method { .. } | Insn::Jump { .. } => 3,
            Insn::Other { operands, .. } => 1 + u32::try_from(operands.len()).unwrap_or(u32::MAX),
        }
    }
}

impl fmt::Display for Insn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Insn::Label(label) => write!(f, "{label}:"),
            Insn::Field { op, field } => write!(f, "{op} {field}"),
            Insn::Method {
                op,
                method,
                interface,
            } => {
                write!(f, "{op} {method}")?;
                if *interface {
                    write!(f, " (itf)")?;
                }
                Ok(())
            }
            Insn::Jump { op, target } => write!(f, "{op} {target}"),
            Insn::Other { opcode, operands } => {
                write!(f, "op 0x{opcode:02x}")?;
                for operand in operands {
                    write!(f, " {operand:02x}")?;
                }
                Ok(())
            }
        }
    }
}
