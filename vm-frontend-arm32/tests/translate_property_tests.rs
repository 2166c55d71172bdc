//! Property-based tests for the A32 translation stage.
//!
//! These verify the unpredictable-encoding policy, condition gating, and the
//! bit-level semantics of emitted IR against independent reference
//! computations.


use ir_eval::{evaluate, EvalState};
use proptest::prelude::*;
use vm_core::{bits, GuestAddr};
use vm_frontend_arm32::{
    translate, ArmContext, ArmInstruction, Cond, FlagState, Imm5, Reg, TranslationOutcome,
};
use vm_ir::Block;

// ============================================================================
// Strategies
// ============================================================================

fn imm5(v: u8) -> Imm5 {
    Imm5::try_from(v).unwrap()
}

fn any_reg() -> impl Strategy<Value = Reg> {
    (0u8..16).prop_map(|v| Reg::try_from(v).unwrap())
}

fn any_imm5() -> impl Strategy<Value = Imm5> {
    (0u8..32).prop_map(imm5)
}

fn any_cond() -> impl Strategy<Value = Cond> {
    (0u8..16).prop_map(|v| Cond::try_from(v).unwrap())
}

fn any_flags() -> impl Strategy<Value = FlagState> {
    any::<(bool, bool, bool, bool)>().prop_map(|(n, z, c, v)| FlagState { n, z, c, v })
}

fn any_instruction() -> impl Strategy<Value = ArmInstruction> {
    prop_oneof![
        (any_cond(), any_imm5(), any_reg(), any_imm5())
            .prop_map(|(cond, msb, d, lsb)| ArmInstruction::Bfc { cond, msb, d, lsb }),
        (any_cond(), any_imm5(), any_reg(), any_imm5(), any_reg())
            .prop_map(|(cond, msb, d, lsb, n)| ArmInstruction::Bfi { cond, msb, d, lsb, n }),
        (any_cond(), any_reg(), any_reg())
            .prop_map(|(cond, d, m)| ArmInstruction::Clz { cond, d, m }),
        (any_cond(), any_imm5(), any_reg(), any_imm5(), any_reg()).prop_map(
            |(cond, widthm1, d, lsb, n)| ArmInstruction::Sbfx { cond, widthm1, d, lsb, n }
        ),
        (any_cond(), any_reg(), any_reg(), any_reg())
            .prop_map(|(cond, n, d, m)| ArmInstruction::Sel { cond, n, d, m }),
        (any_cond(), any_imm5(), any_reg(), any_imm5(), any_reg()).prop_map(
            |(cond, widthm1, d, lsb, n)| ArmInstruction::Ubfx { cond, widthm1, d, lsb, n }
        ),
    ]
}

// ============================================================================
// Reference model
// ============================================================================

/// Mirror of the per-encoding constraint lists, computed independently of the
/// translator.
fn expected_unpredictable(inst: ArmInstruction) -> bool {
    match inst {
        ArmInstruction::Bfc { msb, d, lsb, .. } | ArmInstruction::Bfi { msb, d, lsb, .. } => {
            d == Reg::PC || msb < lsb
        }
        ArmInstruction::Clz { d, m, .. } => d == Reg::PC || m == Reg::PC,
        ArmInstruction::Sbfx {
            widthm1, d, lsb, n, ..
        }
        | ArmInstruction::Ubfx {
            widthm1, d, lsb, n, ..
        } => {
            d == Reg::PC
                || n == Reg::PC
                || u32::from(lsb.value()) + u32::from(widthm1.value()) >= 32
        }
        ArmInstruction::Sel { n, d, m, .. } => n == Reg::PC || d == Reg::PC || m == Reg::PC,
    }
}

fn cond_of(inst: ArmInstruction) -> Cond {
    match inst {
        ArmInstruction::Bfc { cond, .. }
        | ArmInstruction::Bfi { cond, .. }
        | ArmInstruction::Clz { cond, .. }
        | ArmInstruction::Sbfx { cond, .. }
        | ArmInstruction::Sel { cond, .. }
        | ArmInstruction::Ubfx { cond, .. } => cond,
    }
}

fn translate_one(inst: ArmInstruction, flags: FlagState) -> (TranslationOutcome, Block) {
    let mut block = Block::new(GuestAddr(0x100));
    let mut ctx = ArmContext::new(&mut block, flags);
    let outcome = translate(&mut ctx, inst);
    (outcome, block)
}

fn translate_al(inst: ArmInstruction) -> Block {
    translate_one(inst, FlagState::default()).1
}

// ============================================================================
// Policy properties
// ============================================================================

proptest! {
    /// Property: the outcome matches the constraint list exactly, and a
    /// rejected encoding never emits IR.
    #[test]
    fn prop_unpredictable_policy(inst in any_instruction(), flags in any_flags()) {
        let (outcome, block) = translate_one(inst, flags);
        if expected_unpredictable(inst) {
            prop_assert_eq!(outcome, TranslationOutcome::UnpredictableInstruction);
            prop_assert!(block.is_empty());
        } else {
            prop_assert_eq!(outcome, TranslationOutcome::Translated);
        }
    }

    /// Property: for well-formed encodings the block is empty exactly when
    /// the condition fails under the given flag snapshot.
    #[test]
    fn prop_condition_gating(inst in any_instruction(), flags in any_flags()) {
        prop_assume!(!expected_unpredictable(inst));
        let (outcome, block) = translate_one(inst, flags);
        prop_assert_eq!(outcome, TranslationOutcome::Translated);
        prop_assert_eq!(block.is_empty(), !cond_of(inst).passed(flags));
    }

    /// Property: everything the translator emits passes block validation
    /// (arity, argument types, reference ordering, use counts).
    #[test]
    fn prop_emitted_blocks_validate(inst in any_instruction(), flags in any_flags()) {
        let (_, block) = translate_one(inst, flags);
        prop_assert!(block.validate().is_ok());
    }

    /// Property: translation is a pure function of instruction and flags.
    #[test]
    fn prop_translation_deterministic(inst in any_instruction(), flags in any_flags()) {
        let (outcome1, block1) = translate_one(inst, flags);
        let (outcome2, block2) = translate_one(inst, flags);
        prop_assert_eq!(outcome1, outcome2);
        prop_assert_eq!(block1.to_string(), block2.to_string());
    }
}

// ============================================================================
// Semantic properties against reference computations
// ============================================================================

proptest! {
    /// Property: BFC clears exactly the [lsb, msb] field and nothing else.
    #[test]
    fn prop_bfc_reference(value in any::<u32>(), lsb in 0u8..32, msb in 0u8..32) {
        prop_assume!(msb >= lsb);
        let block = translate_al(ArmInstruction::Bfc {
            cond: Cond::AL,
            msb: imm5(msb),
            d: Reg::R0,
            lsb: imm5(lsb),
        });
        let mut state = EvalState::new();
        state.regs[0] = value;
        evaluate(&block, &mut state);

        let expected = value & !bits::bit_range_mask(u32::from(lsb), u32::from(msb));
        prop_assert_eq!(state.regs[0], expected);
    }

    /// Property: BFI replaces the [lsb, msb] field of the destination with
    /// the low bits of the source and leaves the rest untouched.
    #[test]
    fn prop_bfi_reference(
        dst in any::<u32>(),
        src in any::<u32>(),
        lsb in 0u8..32,
        msb in 0u8..32,
    ) {
        prop_assume!(msb >= lsb);
        let block = translate_al(ArmInstruction::Bfi {
            cond: Cond::AL,
            msb: imm5(msb),
            d: Reg::R0,
            lsb: imm5(lsb),
            n: Reg::R1,
        });
        let mut state = EvalState::new();
        state.regs[0] = dst;
        state.regs[1] = src;
        evaluate(&block, &mut state);

        let mask = bits::bit_range_mask(u32::from(lsb), u32::from(msb));
        let expected = (dst & !mask) | ((src << lsb) & mask);
        prop_assert_eq!(state.regs[0], expected);
        prop_assert_eq!(state.regs[1], src);
    }

    /// Property: CLZ agrees with the host count over the full input range.
    #[test]
    fn prop_clz_reference(value in any::<u32>()) {
        let block = translate_al(ArmInstruction::Clz {
            cond: Cond::AL,
            d: Reg::R0,
            m: Reg::R1,
        });
        let mut state = EvalState::new();
        state.regs[1] = value;
        evaluate(&block, &mut state);
        prop_assert_eq!(state.regs[0], value.leading_zeros());
    }

    /// Property: SBFX agrees with an arithmetic-shift reference over every
    /// in-range (lsb, widthm1) pair, including the full-width case.
    #[test]
    fn prop_sbfx_reference(value in any::<u32>(), lsb in 0u8..32, widthm1 in 0u8..32) {
        prop_assume!(u32::from(lsb) + u32::from(widthm1) < 32);
        let block = translate_al(ArmInstruction::Sbfx {
            cond: Cond::AL,
            widthm1: imm5(widthm1),
            d: Reg::R0,
            lsb: imm5(lsb),
            n: Reg::R1,
        });
        let mut state = EvalState::new();
        state.regs[1] = value;
        evaluate(&block, &mut state);

        let width = u32::from(widthm1) + 1;
        let left = 32 - width - u32::from(lsb);
        let right = 32 - width;
        let expected = (((value as i32) << left) >> right) as u32;
        prop_assert_eq!(state.regs[0], expected);
    }

    /// Property: UBFX agrees with a mask-based reference and never sign
    /// extends.
    #[test]
    fn prop_ubfx_reference(value in any::<u32>(), lsb in 0u8..32, widthm1 in 0u8..32) {
        prop_assume!(u32::from(lsb) + u32::from(widthm1) < 32);
        let block = translate_al(ArmInstruction::Ubfx {
            cond: Cond::AL,
            widthm1: imm5(widthm1),
            d: Reg::R0,
            lsb: imm5(lsb),
            n: Reg::R1,
        });
        let mut state = EvalState::new();
        state.regs[1] = value;
        evaluate(&block, &mut state);

        let expected = (value >> lsb) & bits::ones(u32::from(widthm1) + 1);
        prop_assert_eq!(state.regs[0], expected);
    }

    /// Property: SEL picks each byte lane from Rn when its GE bit is set and
    /// from Rm otherwise.
    #[test]
    fn prop_sel_reference(n_val in any::<u32>(), m_val in any::<u32>(), ge in 0u8..16) {
        let block = translate_al(ArmInstruction::Sel {
            cond: Cond::AL,
            n: Reg::R1,
            d: Reg::R0,
            m: Reg::R2,
        });
        let mut state = EvalState::new();
        state.regs[1] = n_val;
        state.regs[2] = m_val;
        state.ge = ge;
        evaluate(&block, &mut state);

        let mut expected = 0u32;
        for lane in 0..4 {
            let mask = 0xFFu32 << (lane * 8);
            let source = if ge & (1 << lane) != 0 { n_val } else { m_val };
            expected |= source & mask;
        }
        prop_assert_eq!(state.regs[0], expected);
    }
}
