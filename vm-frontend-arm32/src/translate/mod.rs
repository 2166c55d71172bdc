use serde::{Deserialize, Serialize};

use vm_ir::{Block, Emitter};

use crate::cond::{Cond, FlagState};
use crate::types::{Imm5, Reg};

mod misc;

/// 单条指令的翻译结果
///
/// 这是传回解码器的继续信号而非错误类型：不可预测指令同样让解码器
/// 继续处理后续指令，只是当前指令不产生任何 IR。
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// 指令已翻译（条件不成立的指令同样视为翻译成功，不发射 IR）
    Translated,
    /// 架构未定义的编码，跳过该指令
    UnpredictableInstruction,
}

impl TranslationOutcome {
    pub fn is_translated(self) -> bool {
        matches!(self, TranslationOutcome::Translated)
    }
}

/// 翻译上下文
///
/// 持有当前基本块的 IR 发射器和 NZCV 标志位快照，作为显式参数传入
/// 每个翻译函数。一个块内的翻译调用串行共享同一个上下文。
pub struct ArmContext<'a> {
    /// IR 发射器
    pub ir: Emitter<'a>,
    /// 条件码求值使用的标志位快照
    pub flags: FlagState,
}

impl<'a> ArmContext<'a> {
    pub fn new(block: &'a mut Block, flags: FlagState) -> Self {
        Self {
            ir: Emitter::new(block),
            flags,
        }
    }

    /// 判断条件码在当前快照下是否成立
    pub fn condition_passed(&self, cond: Cond) -> bool {
        cond.passed(self.flags)
    }
}

/// 已解码的 A32 指令，字段由外部解码器按编码格式提取
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmInstruction {
    /// BFC<c> <Rd>, #<lsb>, #<width>
    Bfc { cond: Cond, msb: Imm5, d: Reg, lsb: Imm5 },
    /// BFI<c> <Rd>, <Rn>, #<lsb>, #<width>
    Bfi { cond: Cond, msb: Imm5, d: Reg, lsb: Imm5, n: Reg },
    /// CLZ<c> <Rd>, <Rm>
    Clz { cond: Cond, d: Reg, m: Reg },
    /// SBFX<c> <Rd>, <Rn>, #<lsb>, #<width>
    Sbfx { cond: Cond, widthm1: Imm5, d: Reg, lsb: Imm5, n: Reg },
    /// SEL<c> <Rd>, <Rn>, <Rm>
    Sel { cond: Cond, n: Reg, d: Reg, m: Reg },
    /// UBFX<c> <Rd>, <Rn>, #<lsb>, #<width>
    Ubfx { cond: Cond, widthm1: Imm5, d: Reg, lsb: Imm5, n: Reg },
}

/// 按指令变体分派到对应的翻译函数
///
/// 无论返回哪个结果，调用方都应继续解码后续指令。
pub fn translate(ctx: &mut ArmContext<'_>, inst: ArmInstruction) -> TranslationOutcome {
    match inst {
        ArmInstruction::Bfc { cond, msb, d, lsb } => misc::arm_bfc(ctx, cond, msb, d, lsb),
        ArmInstruction::Bfi { cond, msb, d, lsb, n } => misc::arm_bfi(ctx, cond, msb, d, lsb, n),
        ArmInstruction::Clz { cond, d, m } => misc::arm_clz(ctx, cond, d, m),
        ArmInstruction::Sbfx {
            cond,
            widthm1,
            d,
            lsb,
            n,
        } => misc::arm_sbfx(ctx, cond, widthm1, d, lsb, n),
        ArmInstruction::Sel { cond, n, d, m } => misc::arm_sel(ctx, cond, n, d, m),
        ArmInstruction::Ubfx {
            cond,
            widthm1,
            d,
            lsb,
            n,
        } => misc::arm_ubfx(ctx, cond, widthm1, d, lsb, n),
    }
}
