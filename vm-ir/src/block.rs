use std::fmt;

use vm_core::GuestAddr;

use crate::inst::Inst;
use crate::value::{InstRef, Type, Value};
use crate::{IrError, Opcode};

/// An IR basic block under construction: an arena of instructions indexed by
/// [`InstRef`]. Slots are only ever appended during translation; later
/// pipeline stages own any rewriting.
#[derive(Debug, Clone)]
pub struct Block {
    /// Guest address of the first instruction this block translates.
    pub start_pc: GuestAddr,
    insts: Vec<Inst>,
}

impl Block {
    /// Create a new empty block starting at the given guest address.
    pub fn new(start_pc: GuestAddr) -> Self {
        Self {
            start_pc,
            insts: Vec::new(),
        }
    }

    /// Append a new instruction, bump the use count of every instruction
    /// argument, and return the new slot's reference.
    pub fn append(&mut self, opcode: Opcode, args: &[Value]) -> InstRef {
        for arg in args {
            if let Value::Inst(r) = arg {
                self.insts[r.index()].use_count += 1;
            }
        }
        let idx = self.insts.len();
        self.insts.push(Inst::new(opcode, args));
        InstRef(idx as u32)
    }

    /// Get an instruction by reference.
    pub fn get(&self, r: InstRef) -> &Inst {
        &self.insts[r.index()]
    }

    /// Number of instruction slots in the block.
    pub fn inst_count(&self) -> usize {
        self.insts.len()
    }

    /// Returns true if no instructions have been emitted.
    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }

    /// Iterate over instructions with their references.
    pub fn iter(&self) -> impl Iterator<Item = (InstRef, &Inst)> {
        self.insts
            .iter()
            .enumerate()
            .map(|(i, inst)| (InstRef(i as u32), inst))
    }

    /// Resolve the type a value carries inside this block.
    pub fn value_type(&self, v: Value) -> Type {
        match v {
            Value::Void => Type::Void,
            Value::Inst(r) => self.insts[r.index()].return_type(),
            Value::Reg(_) => Type::Reg,
            Value::ImmU8(_) => Type::U8,
            Value::ImmU32(_) => Type::U32,
        }
    }

    /// Check structural well-formedness: argument arity and types match each
    /// opcode's signature, instruction references precede their uses, and
    /// stored use counts agree with actual uses.
    pub fn validate(&self) -> Result<(), IrError> {
        let mut actual_uses = vec![0u32; self.insts.len()];

        for (index, inst) in self.insts.iter().enumerate() {
            let expected = inst.num_args();
            let found = inst.args.iter().filter(|a| **a != Value::Void).count();
            if found != expected {
                return Err(IrError::ArityMismatch {
                    index,
                    opcode: inst.opcode.name(),
                    expected,
                    found,
                });
            }

            for (arg, (value, want)) in inst.arg_values().zip(inst.opcode.arg_types()).enumerate() {
                let (value, want) = (*value, *want);
                let got = match value {
                    Value::Inst(r) => {
                        if r.index() >= index {
                            return Err(IrError::ForwardReference {
                                index,
                                arg,
                                target: r.0,
                            });
                        }
                        actual_uses[r.index()] += 1;
                        self.insts[r.index()].return_type()
                    }
                    other => self.value_type(other),
                };
                if got != want {
                    return Err(IrError::TypeMismatch {
                        index,
                        arg,
                        expected: want,
                        found: got,
                    });
                }
            }
        }

        for (index, inst) in self.insts.iter().enumerate() {
            if inst.use_count != actual_uses[index] {
                return Err(IrError::UseCountMismatch {
                    index,
                    stored: inst.use_count,
                    actual: actual_uses[index],
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Block {:#x}:", self.start_pc)?;
        for (r, inst) in self.iter() {
            if inst.return_type() != Type::Void {
                writeln!(f, "  {} = {}", r, inst)?;
            } else {
                writeln!(f, "  {}", inst)?;
            }
        }
        Ok(())
    }
}
