use std::fmt;

use crate::RegId;

/// Index of an instruction slot inside a [`crate::Block`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstRef(pub u32);

impl InstRef {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for InstRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// Result type of an IR operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Void,
    Reg,
    U8,
    U32,
}

/// An operand handle: either the result of a previously emitted instruction
/// or an immediate. Translators never build `Inst` references themselves;
/// they only pass back what the emitter returned within the same block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Void,
    Inst(InstRef),
    Reg(RegId),
    ImmU8(u8),
    ImmU32(u32),
}

impl Value {
    /// 立即数或寄存器引用（不依赖块内其它指令的值）
    pub fn is_immediate(self) -> bool {
        !matches!(self, Value::Inst(_) | Value::Void)
    }

    pub fn as_inst(self) -> Option<InstRef> {
        match self {
            Value::Inst(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_u8(self) -> Option<u8> {
        match self {
            Value::ImmU8(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u32(self) -> Option<u32> {
        match self {
            Value::ImmU32(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => write!(f, "<void>"),
            Value::Inst(r) => write!(f, "{}", r),
            Value::Reg(r) => write!(f, "r{}", r),
            Value::ImmU8(v) => write!(f, "#{}", v),
            Value::ImmU32(v) => write!(f, "#{:#x}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::ImmU8(31).as_u8(), Some(31));
        assert_eq!(Value::ImmU32(0xF0).as_u32(), Some(0xF0));
        assert_eq!(Value::ImmU8(1).as_u32(), None);
        assert_eq!(Value::Inst(InstRef(2)).as_inst(), Some(InstRef(2)));
        assert!(Value::Reg(15).is_immediate());
        assert!(!Value::Inst(InstRef(0)).is_immediate());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Inst(InstRef(3)).to_string(), "%3");
        assert_eq!(Value::Reg(4).to_string(), "r4");
        assert_eq!(Value::ImmU8(12).to_string(), "#12");
        assert_eq!(Value::ImmU32(0xFFFF_FF0F).to_string(), "#0xffffff0f");
    }
}
