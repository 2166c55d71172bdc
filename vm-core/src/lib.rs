//! # vm-core - 虚拟机核心库
//!
//! 提供翻译前端各组件共享的核心类型定义和基础设施。
//!
//! ## 主要组件
//!
//! - **类型定义**: [`GuestAddr`] 客户机地址类型
//! - **错误处理**: [`VmError`], [`CoreError`] 统一错误类型及 [`VmResult`] 结果别名
//! - **位操作**: [`bits`] 模块提供位掩码构造工具

use serde::{Deserialize, Serialize};

// 模块定义
pub mod bits;
pub mod error;

// Re-export VmError and CoreError
pub use error::{CoreError, ErrorContext, VmError};

// ============================================================================
// 基础类型定义
// ============================================================================

/// 客户机虚拟地址
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GuestAddr(pub u64);

impl GuestAddr {
    /// Wrapping addition
    pub fn wrapping_add(self, rhs: u64) -> Self {
        GuestAddr(self.0.wrapping_add(rhs))
    }

    /// Wrapping subtraction
    pub fn wrapping_sub(self, rhs: GuestAddr) -> u64 {
        self.0.wrapping_sub(rhs.0)
    }
}

impl std::ops::Add<u64> for GuestAddr {
    type Output = GuestAddr;

    fn add(self, rhs: u64) -> Self::Output {
        GuestAddr(self.0 + rhs)
    }
}

impl std::fmt::LowerHex for GuestAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// 统一的结果类型
pub type VmResult<T> = Result<T, VmError>;
