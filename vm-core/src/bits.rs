//! 位操作工具
//!
//! 提供无状态的位掩码构造函数，供指令翻译器组装位域掩码使用。

/// 构造低 `count` 位全为 1 的掩码，`count` 取值范围 0..=32
pub const fn ones(count: u32) -> u32 {
    debug_assert!(count <= u32::BITS);
    if count == 0 {
        0
    } else {
        u32::MAX >> (u32::BITS - count)
    }
}

/// 构造覆盖闭区间 [lsb, msb] 的位掩码
pub const fn bit_range_mask(lsb: u32, msb: u32) -> u32 {
    debug_assert!(lsb <= msb && msb < u32::BITS);
    ones(msb - lsb + 1) << lsb
}
