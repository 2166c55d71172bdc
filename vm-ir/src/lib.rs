mod block;
mod emit;
mod inst;
mod value;

pub use block::Block;
pub use emit::Emitter;
pub use inst::{Inst, Opcode, MAX_ARGS};
pub use value::{InstRef, Type, Value};

use vm_core::{CoreError, VmError};

/// IR-level register index assigned by the front end.
pub type RegId = u8;

/// Structural validation failures reported by [`Block::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    #[error("instruction {index}: {opcode} expects {expected} args, found {found}")]
    ArityMismatch {
        index: usize,
        opcode: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("instruction {index} arg {arg}: expected {expected:?}, found {found:?}")]
    TypeMismatch {
        index: usize,
        arg: usize,
        expected: Type,
        found: Type,
    },
    #[error("instruction {index} arg {arg}: reference to %{target} does not precede its use")]
    ForwardReference { index: usize, arg: usize, target: u32 },
    #[error("instruction {index}: stored use count {stored} does not match {actual} actual uses")]
    UseCountMismatch { index: usize, stored: u32, actual: u32 },
}

impl From<IrError> for VmError {
    fn from(e: IrError) -> Self {
        VmError::Core(CoreError::Internal {
            message: e.to_string(),
            module: "vm-ir".to_string(),
        })
    }
}
