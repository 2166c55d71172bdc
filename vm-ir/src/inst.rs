use std::fmt;

use crate::value::{Type, Value};

/// Maximum number of arguments per IR instruction.
pub const MAX_ARGS: usize = 3;

/// The operation set the front end emits. Each opcode carries a static
/// signature (result type plus argument types) used by block validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    GetRegister,
    SetRegister,
    And32,
    Or32,
    LogicalShiftLeft32,
    LogicalShiftRight32,
    ArithmeticShiftRight32,
    CountLeadingZeros32,
    GetGEFlags,
    PackedSelectBytes,
}

struct OpcodeInfo {
    ret: Type,
    args: &'static [Type],
}

impl Opcode {
    const fn info(self) -> OpcodeInfo {
        use Type::{Reg, U32, U8, Void};
        match self {
            Opcode::GetRegister => OpcodeInfo { ret: U32, args: &[Reg] },
            Opcode::SetRegister => OpcodeInfo { ret: Void, args: &[Reg, U32] },
            Opcode::And32 => OpcodeInfo { ret: U32, args: &[U32, U32] },
            Opcode::Or32 => OpcodeInfo { ret: U32, args: &[U32, U32] },
            Opcode::LogicalShiftLeft32 => OpcodeInfo { ret: U32, args: &[U32, U8] },
            Opcode::LogicalShiftRight32 => OpcodeInfo { ret: U32, args: &[U32, U8] },
            Opcode::ArithmeticShiftRight32 => OpcodeInfo { ret: U32, args: &[U32, U8] },
            Opcode::CountLeadingZeros32 => OpcodeInfo { ret: U32, args: &[U32] },
            Opcode::GetGEFlags => OpcodeInfo { ret: U32, args: &[] },
            Opcode::PackedSelectBytes => OpcodeInfo { ret: U32, args: &[U32, U32, U32] },
        }
    }

    /// Returns the result type of this opcode.
    pub fn return_type(self) -> Type {
        self.info().ret
    }

    /// Returns the argument types of this opcode.
    pub fn arg_types(self) -> &'static [Type] {
        self.info().args
    }

    /// Returns the number of arguments this opcode takes.
    pub fn num_args(self) -> usize {
        self.info().args.len()
    }

    /// Returns true if this opcode writes guest state.
    pub fn has_side_effects(self) -> bool {
        matches!(self, Opcode::SetRegister)
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::GetRegister => "GetRegister",
            Opcode::SetRegister => "SetRegister",
            Opcode::And32 => "And32",
            Opcode::Or32 => "Or32",
            Opcode::LogicalShiftLeft32 => "LogicalShiftLeft32",
            Opcode::LogicalShiftRight32 => "LogicalShiftRight32",
            Opcode::ArithmeticShiftRight32 => "ArithmeticShiftRight32",
            Opcode::CountLeadingZeros32 => "CountLeadingZeros32",
            Opcode::GetGEFlags => "GetGEFlags",
            Opcode::PackedSelectBytes => "PackedSelectBytes",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single IR instruction slot in the block arena.
#[derive(Debug, Clone)]
pub struct Inst {
    /// The operation this instruction performs.
    pub opcode: Opcode,
    /// Arguments (up to MAX_ARGS, unused slots are Value::Void).
    pub args: [Value; MAX_ARGS],
    /// Number of other instructions that consume this instruction's result.
    pub use_count: u32,
}

impl Inst {
    /// Create a new instruction with the given opcode and arguments.
    pub fn new(opcode: Opcode, args: &[Value]) -> Self {
        assert!(
            args.len() <= MAX_ARGS,
            "too many args ({}) for opcode {}",
            args.len(),
            opcode
        );
        let mut inst_args = [Value::Void; MAX_ARGS];
        for (i, arg) in args.iter().enumerate() {
            inst_args[i] = *arg;
        }
        Self {
            opcode,
            args: inst_args,
            use_count: 0,
        }
    }

    /// Get the result type of this instruction.
    pub fn return_type(&self) -> Type {
        self.opcode.return_type()
    }

    /// Get the number of arguments.
    pub fn num_args(&self) -> usize {
        self.opcode.num_args()
    }

    /// Get argument at index.
    pub fn arg(&self, idx: usize) -> Value {
        self.args[idx]
    }

    /// Iterate over the declared argument values.
    pub fn arg_values(&self) -> impl Iterator<Item = &Value> {
        self.args[..self.num_args()].iter()
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        let n = self.num_args();
        if n > 0 {
            write!(f, " ")?;
            for i in 0..n {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.args[i])?;
            }
        }
        Ok(())
    }
}
