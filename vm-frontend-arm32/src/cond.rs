use std::fmt;

use serde::{Deserialize, Serialize};

use crate::FrontendError;

/// A32 条件码，4 位编码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cond {
    EQ = 0,  // Equal (Z=1)
    NE = 1,  // Not equal (Z=0)
    CS = 2,  // Carry set / unsigned higher or same (C=1)
    CC = 3,  // Carry clear / unsigned lower (C=0)
    MI = 4,  // Minus / negative (N=1)
    PL = 5,  // Plus / positive or zero (N=0)
    VS = 6,  // Overflow (V=1)
    VC = 7,  // No overflow (V=0)
    HI = 8,  // Unsigned higher (C=1 && Z=0)
    LS = 9,  // Unsigned lower or same (C=0 || Z=1)
    GE = 10, // Signed greater than or equal (N=V)
    LT = 11, // Signed less than (N!=V)
    GT = 12, // Signed greater than (Z=0 && N=V)
    LE = 13, // Signed less than or equal (Z=1 || N!=V)
    AL = 14, // Always
    NV = 15, // Never (architecturally behaves like AL)
}

/// 条件码求值使用的 NZCV 标志位快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlagState {
    pub n: bool,
    pub z: bool,
    pub c: bool,
    pub v: bool,
}

impl Cond {
    /// Aliases
    pub const HS: Cond = Cond::CS;
    pub const LO: Cond = Cond::CC;

    /// 在给定标志位快照下判断条件是否成立
    pub fn passed(self, flags: FlagState) -> bool {
        let FlagState { n, z, c, v } = flags;
        match self {
            Cond::EQ => z,
            Cond::NE => !z,
            Cond::CS => c,
            Cond::CC => !c,
            Cond::MI => n,
            Cond::PL => !n,
            Cond::VS => v,
            Cond::VC => !v,
            Cond::HI => c && !z,
            Cond::LS => !c || z,
            Cond::GE => n == v,
            Cond::LT => n != v,
            Cond::GT => !z && (n == v),
            Cond::LE => z || (n != v),
            // NV executes as AL on this architecture version
            Cond::AL | Cond::NV => true,
        }
    }

    /// 反转条件码
    pub fn invert(self) -> Cond {
        match Cond::try_from((self as u8) ^ 1) {
            Ok(c) => c,
            Err(_) => unreachable!("xor of a 4-bit value stays in range"),
        }
    }
}

impl TryFrom<u8> for Cond {
    type Error = FrontendError;

    fn try_from(val: u8) -> Result<Self, Self::Error> {
        match val {
            0 => Ok(Cond::EQ),
            1 => Ok(Cond::NE),
            2 => Ok(Cond::CS),
            3 => Ok(Cond::CC),
            4 => Ok(Cond::MI),
            5 => Ok(Cond::PL),
            6 => Ok(Cond::VS),
            7 => Ok(Cond::VC),
            8 => Ok(Cond::HI),
            9 => Ok(Cond::LS),
            10 => Ok(Cond::GE),
            11 => Ok(Cond::LT),
            12 => Ok(Cond::GT),
            13 => Ok(Cond::LE),
            14 => Ok(Cond::AL),
            15 => Ok(Cond::NV),
            _ => Err(FrontendError::InvalidCondition(val)),
        }
    }
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Cond::EQ => "eq",
            Cond::NE => "ne",
            Cond::CS => "cs",
            Cond::CC => "cc",
            Cond::MI => "mi",
            Cond::PL => "pl",
            Cond::VS => "vs",
            Cond::VC => "vc",
            Cond::HI => "hi",
            Cond::LS => "ls",
            Cond::GE => "ge",
            Cond::LT => "lt",
            Cond::GT => "gt",
            Cond::LE => "le",
            Cond::AL => "al",
            Cond::NV => "nv",
        };
        write!(f, "{}", s)
    }
}
