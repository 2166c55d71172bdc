use vm_core::bits;

use super::{ArmContext, TranslationOutcome};
use crate::cond::Cond;
use crate::types::{Imm5, Reg};

fn unpredictable(mnemonic: &str) -> TranslationOutcome {
    log::trace!("unpredictable {} encoding, skipping", mnemonic);
    TranslationOutcome::UnpredictableInstruction
}

// BFC<c> <Rd>, #<lsb>, #<width>
pub(crate) fn arm_bfc(
    ctx: &mut ArmContext<'_>,
    cond: Cond,
    msb: Imm5,
    d: Reg,
    lsb: Imm5,
) -> TranslationOutcome {
    if d == Reg::PC {
        return unpredictable("BFC");
    }
    if msb < lsb {
        return unpredictable("BFC");
    }

    if !ctx.condition_passed(cond) {
        return TranslationOutcome::Translated;
    }

    let width = u32::from(msb.value() - lsb.value()) + 1;
    let mask = !(bits::ones(width) << lsb.value());
    let operand = ctx.ir.get_register(d.number());
    let result = ctx.ir.and_32(operand, ctx.ir.imm32(mask));

    ctx.ir.set_register(d.number(), result);
    TranslationOutcome::Translated
}

// BFI<c> <Rd>, <Rn>, #<lsb>, #<width>
pub(crate) fn arm_bfi(
    ctx: &mut ArmContext<'_>,
    cond: Cond,
    msb: Imm5,
    d: Reg,
    lsb: Imm5,
    n: Reg,
) -> TranslationOutcome {
    if d == Reg::PC {
        return unpredictable("BFI");
    }
    if msb < lsb {
        return unpredictable("BFI");
    }

    if !ctx.condition_passed(cond) {
        return TranslationOutcome::Translated;
    }

    let width = u32::from(msb.value() - lsb.value()) + 1;
    let inclusion_mask = bits::ones(width) << lsb.value();
    let exclusion_mask = !inclusion_mask;
    let reg_d = ctx.ir.get_register(d.number());
    let operand1 = ctx.ir.and_32(reg_d, ctx.ir.imm32(exclusion_mask));
    let reg_n = ctx.ir.get_register(n.number());
    let shifted = ctx.ir.logical_shift_left_32(reg_n, ctx.ir.imm8(lsb.value()));
    let operand2 = ctx.ir.and_32(shifted, ctx.ir.imm32(inclusion_mask));
    let result = ctx.ir.or_32(operand1, operand2);

    ctx.ir.set_register(d.number(), result);
    TranslationOutcome::Translated
}

// CLZ<c> <Rd>, <Rm>
pub(crate) fn arm_clz(ctx: &mut ArmContext<'_>, cond: Cond, d: Reg, m: Reg) -> TranslationOutcome {
    if d == Reg::PC || m == Reg::PC {
        return unpredictable("CLZ");
    }

    if !ctx.condition_passed(cond) {
        return TranslationOutcome::Translated;
    }

    let operand = ctx.ir.get_register(m.number());
    let result = ctx.ir.count_leading_zeros_32(operand);

    ctx.ir.set_register(d.number(), result);
    TranslationOutcome::Translated
}

// SBFX<c> <Rd>, <Rn>, #<lsb>, #<width>
pub(crate) fn arm_sbfx(
    ctx: &mut ArmContext<'_>,
    cond: Cond,
    widthm1: Imm5,
    d: Reg,
    lsb: Imm5,
    n: Reg,
) -> TranslationOutcome {
    if d == Reg::PC || n == Reg::PC {
        return unpredictable("SBFX");
    }

    let msb = u32::from(lsb.value()) + u32::from(widthm1.value());
    if msb >= u32::BITS {
        return unpredictable("SBFX");
    }

    if !ctx.condition_passed(cond) {
        return TranslationOutcome::Translated;
    }

    // 先左移清掉高位，再算术右移完成符号扩展；两个移位量都小于 32，
    // lsb = 0 与 width = 32 的边界情形由此自然成立。
    let width = u32::from(widthm1.value()) + 1;
    let left_shift_amount = (u32::BITS - width - u32::from(lsb.value())) as u8;
    let right_shift_amount = (u32::BITS - width) as u8;
    let operand = ctx.ir.get_register(n.number());
    let tmp = ctx
        .ir
        .logical_shift_left_32(operand, ctx.ir.imm8(left_shift_amount));
    let result = ctx
        .ir
        .arithmetic_shift_right_32(tmp, ctx.ir.imm8(right_shift_amount));

    ctx.ir.set_register(d.number(), result);
    TranslationOutcome::Translated
}

// SEL<c> <Rd>, <Rn>, <Rm>
pub(crate) fn arm_sel(
    ctx: &mut ArmContext<'_>,
    cond: Cond,
    n: Reg,
    d: Reg,
    m: Reg,
) -> TranslationOutcome {
    if n == Reg::PC || d == Reg::PC || m == Reg::PC {
        return unpredictable("SEL");
    }

    if !ctx.condition_passed(cond) {
        return TranslationOutcome::Translated;
    }

    let to = ctx.ir.get_register(m.number());
    let from = ctx.ir.get_register(n.number());
    let ge = ctx.ir.get_ge_flags();
    let result = ctx.ir.packed_select_bytes(ge, to, from);

    ctx.ir.set_register(d.number(), result);
    TranslationOutcome::Translated
}

// UBFX<c> <Rd>, <Rn>, #<lsb>, #<width>
pub(crate) fn arm_ubfx(
    ctx: &mut ArmContext<'_>,
    cond: Cond,
    widthm1: Imm5,
    d: Reg,
    lsb: Imm5,
    n: Reg,
) -> TranslationOutcome {
    if d == Reg::PC || n == Reg::PC {
        return unpredictable("UBFX");
    }

    let msb = u32::from(lsb.value()) + u32::from(widthm1.value());
    if msb >= u32::BITS {
        return unpredictable("UBFX");
    }

    if !ctx.condition_passed(cond) {
        return TranslationOutcome::Translated;
    }

    let operand = ctx.ir.get_register(n.number());
    let shifted = ctx.ir.logical_shift_right_32(operand, ctx.ir.imm8(lsb.value()));
    let mask = ctx.ir.imm32(bits::ones(u32::from(widthm1.value()) + 1));
    let result = ctx.ir.and_32(shifted, mask);

    ctx.ir.set_register(d.number(), result);
    TranslationOutcome::Translated
}
