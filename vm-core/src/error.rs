use crate::{GuestAddr, VmResult};

use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// 统一的虚拟机错误类型
///
/// 这是整个工作区的统一错误类型，所有模块都应该使用这个错误类型
/// 或可以转换为这个类型的错误。它支持错误链和上下文信息。
#[derive(Debug, Clone)]
pub enum VmError {
    /// 核心/基础架构错误
    Core(CoreError),
    /// 带上下文的错误包装器
    WithContext {
        /// 原始错误
        error: Box<VmError>,
        /// 上下文信息
        context: String,
        /// 可选的回溯信息
        backtrace: Option<Arc<Backtrace>>,
    },
}

/// 核心系统错误
///
/// 包含翻译核心的基础错误，如解码、参数、内部错误等。
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// 解码错误
    DecodeError {
        /// 错误描述
        message: String,
        /// 错误位置（如指令地址）
        position: Option<GuestAddr>,
        /// 模块名称
        module: String,
    },
    /// 无效参数
    InvalidParameter {
        /// 参数名称
        name: String,
        /// 参数值
        value: String,
        /// 错误描述
        message: String,
    },
    /// 内部错误
    Internal {
        /// 错误描述
        message: String,
        /// 模块名称
        module: String,
    },
}

impl fmt::Display for VmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmError::Core(e) => write!(f, "Core error: {}", e),
            VmError::WithContext { error, context, .. } => write!(f, "{}: {}", context, error),
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::DecodeError {
                message,
                position,
                module,
            } => match position {
                Some(pos) => write!(f, "Decode error in {} at {:#x}: {}", module, pos, message),
                None => write!(f, "Decode error in {}: {}", module, message),
            },
            CoreError::InvalidParameter {
                name,
                value,
                message,
            } => {
                write!(f, "Invalid parameter '{}='{}': {}", name, value, message)
            }
            CoreError::Internal { message, module } => {
                write!(f, "Internal error in {}: {}", module, message)
            }
        }
    }
}

impl Error for VmError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            VmError::Core(e) => Some(e),
            VmError::WithContext { error, .. } => Some(error.as_ref()),
        }
    }
}

impl Error for CoreError {}

// ============================================================================
// Conversions
// ============================================================================

impl From<CoreError> for VmError {
    fn from(e: CoreError) -> Self {
        VmError::Core(e)
    }
}

impl PartialEq for VmError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (VmError::Core(a), VmError::Core(b)) => a == b,
            (
                VmError::WithContext {
                    error: a,
                    context: ca,
                    ..
                },
                VmError::WithContext {
                    error: b,
                    context: cb,
                    ..
                },
            ) => a == b && ca == cb,
            _ => false,
        }
    }
}

// ============================================================================
// Error Context Trait
// ============================================================================

/// 错误上下文扩展 trait
///
/// 提供类似 anyhow 的错误上下文功能，支持错误链和上下文信息。
pub trait ErrorContext<T> {
    /// 添加静态上下文字符串
    fn context(self, ctx: &str) -> VmResult<T>;

    /// 使用闭包动态生成上下文
    fn with_context<F, S>(self, f: F) -> VmResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: Into<VmError>,
{
    fn context(self, ctx: &str) -> VmResult<T> {
        self.map_err(|e| {
            let vm_err = e.into();
            VmError::WithContext {
                error: Box::new(vm_err),
                context: ctx.to_string(),
                backtrace: Some(Arc::new(Backtrace::capture())),
            }
        })
    }

    fn with_context<F, S>(self, f: F) -> VmResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| {
            let vm_err = e.into();
            VmError::WithContext {
                error: Box::new(vm_err),
                context: f().into(),
                backtrace: Some(Arc::new(Backtrace::capture())),
            }
        })
    }
}
