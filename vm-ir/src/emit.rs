use crate::block::Block;
use crate::inst::Opcode;
use crate::value::Value;
use crate::RegId;

/// Typed builder API over a [`Block`]. Every emission method appends exactly
/// one instruction and returns the handle to its result; immediates are plain
/// values and emit nothing. The returned handles are only meaningful inside
/// the block they came from.
pub struct Emitter<'a> {
    pub block: &'a mut Block,
}

impl<'a> Emitter<'a> {
    pub fn new(block: &'a mut Block) -> Self {
        Self { block }
    }

    fn emit(&mut self, opcode: Opcode, args: &[Value]) -> Value {
        Value::Inst(self.block.append(opcode, args))
    }

    // --- Immediates ---

    pub fn imm8(&self, value: u8) -> Value {
        Value::ImmU8(value)
    }

    pub fn imm32(&self, value: u32) -> Value {
        Value::ImmU32(value)
    }

    // --- Register access ---

    pub fn get_register(&mut self, reg: RegId) -> Value {
        self.emit(Opcode::GetRegister, &[Value::Reg(reg)])
    }

    pub fn set_register(&mut self, reg: RegId, value: Value) {
        self.block.append(Opcode::SetRegister, &[Value::Reg(reg), value]);
    }

    // --- Bitwise ---

    pub fn and_32(&mut self, a: Value, b: Value) -> Value {
        self.emit(Opcode::And32, &[a, b])
    }

    pub fn or_32(&mut self, a: Value, b: Value) -> Value {
        self.emit(Opcode::Or32, &[a, b])
    }

    // --- Shifts ---

    pub fn logical_shift_left_32(&mut self, value: Value, shift: Value) -> Value {
        self.emit(Opcode::LogicalShiftLeft32, &[value, shift])
    }

    pub fn logical_shift_right_32(&mut self, value: Value, shift: Value) -> Value {
        self.emit(Opcode::LogicalShiftRight32, &[value, shift])
    }

    pub fn arithmetic_shift_right_32(&mut self, value: Value, shift: Value) -> Value {
        self.emit(Opcode::ArithmeticShiftRight32, &[value, shift])
    }

    // --- Misc ---

    pub fn count_leading_zeros_32(&mut self, value: Value) -> Value {
        self.emit(Opcode::CountLeadingZeros32, &[value])
    }

    /// Read the per-byte-lane GE flag set (bit i covers byte lane i).
    pub fn get_ge_flags(&mut self) -> Value {
        self.emit(Opcode::GetGEFlags, &[])
    }

    /// For each byte lane take `from` where the GE bit is set, keep `to` where clear.
    pub fn packed_select_bytes(&mut self, ge: Value, to: Value, from: Value) -> Value {
        self.emit(Opcode::PackedSelectBytes, &[ge, to, from])
    }
}
