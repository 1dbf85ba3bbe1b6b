use crate::config::arch_config::{SignedWordType, WordType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOp {
    Sll,
    Srl,
    Sra,
}

/// Shift amount is the low 5 bits of operand B; SRA replicates the
/// sign bit.
pub fn execute(op: ShiftOp, a: WordType, b: WordType) -> WordType {
    let shamt = b & 0x1F;
    match op {
        ShiftOp::Sll => a << shamt,
        ShiftOp::Srl => a >> shamt,
        ShiftOp::Sra => ((a as SignedWordType) >> shamt) as WordType,
    }
}
