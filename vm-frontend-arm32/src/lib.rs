//! # vm-frontend-arm32 - ARM A32 翻译前端
//!
//! 将外部解码器提取好字段的 A32 指令翻译为 IR 基本块中的操作序列。
//! 不可预测编码在发射任何 IR 之前被拒绝，条件不成立的指令翻译为空。

use vm_core::{CoreError, VmError};

pub mod cond;
pub mod translate;
pub mod types;

pub use cond::{Cond, FlagState};
pub use translate::{translate, ArmContext, ArmInstruction, TranslationOutcome};
pub use types::{Imm5, Reg};

/// 解码边界错误：仅在由原始字段构造类型时产生
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrontendError {
    #[error("invalid register index: {0}")]
    InvalidRegister(u8),
    #[error("immediate {value} exceeds {width}-bit field")]
    ImmediateOutOfRange { value: u8, width: u8 },
    #[error("invalid condition code: {0:#x}")]
    InvalidCondition(u8),
}

impl From<FrontendError> for VmError {
    fn from(e: FrontendError) -> Self {
        match e {
            FrontendError::InvalidRegister(index) => VmError::Core(CoreError::InvalidParameter {
                name: "register".to_string(),
                value: index.to_string(),
                message: "register index out of range".to_string(),
            }),
            FrontendError::ImmediateOutOfRange { value, width } => {
                VmError::Core(CoreError::InvalidParameter {
                    name: "immediate".to_string(),
                    value: value.to_string(),
                    message: format!("exceeds {}-bit field", width),
                })
            }
            FrontendError::InvalidCondition(raw) => VmError::Core(CoreError::DecodeError {
                message: format!("invalid condition code {:#x}", raw),
                position: None,
                module: "vm-frontend-arm32".to_string(),
            }),
        }
    }
}
