use std::fmt;

use serde::{Deserialize, Serialize};

use crate::FrontendError;

/// A32 通用寄存器 R0-R15，R13 = SP，R14 = LR，R15 = PC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Reg {
    R0 = 0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
}

impl Reg {
    pub const SP: Reg = Reg::R13;
    pub const LR: Reg = Reg::R14;
    pub const PC: Reg = Reg::R15;

    /// IR 层寄存器编号
    pub fn number(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Reg {
    type Error = FrontendError;

    fn try_from(val: u8) -> Result<Self, Self::Error> {
        match val {
            0 => Ok(Reg::R0),
            1 => Ok(Reg::R1),
            2 => Ok(Reg::R2),
            3 => Ok(Reg::R3),
            4 => Ok(Reg::R4),
            5 => Ok(Reg::R5),
            6 => Ok(Reg::R6),
            7 => Ok(Reg::R7),
            8 => Ok(Reg::R8),
            9 => Ok(Reg::R9),
            10 => Ok(Reg::R10),
            11 => Ok(Reg::R11),
            12 => Ok(Reg::R12),
            13 => Ok(Reg::R13),
            14 => Ok(Reg::R14),
            15 => Ok(Reg::R15),
            _ => Err(FrontendError::InvalidRegister(val)),
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Reg::R13 => write!(f, "SP"),
            Reg::R14 => write!(f, "LR"),
            Reg::R15 => write!(f, "PC"),
            r => write!(f, "R{}", r as u8),
        }
    }
}

/// 5 位立即数字段，取值范围 0..=31，由解码边界保证
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Imm5(u8);

impl Imm5 {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Imm5 {
    type Error = FrontendError;

    fn try_from(val: u8) -> Result<Self, Self::Error> {
        if val < 32 {
            Ok(Imm5(val))
        } else {
            Err(FrontendError::ImmediateOutOfRange {
                value: val,
                width: 5,
            })
        }
    }
}

impl From<Imm5> for u8 {
    fn from(imm: Imm5) -> u8 {
        imm.0
    }
}

impl fmt::Display for Imm5 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
