use crate::config::arch_config::WordType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpuOp {
    Add,
    Sub,
    Mul,
}

/// Register words are reinterpreted as IEEE-754 single precision, the
/// operation runs in f32, and the result bits go back to the register
/// file. Operands live in the integer register file.
pub fn execute(op: FpuOp, a: WordType, b: WordType) -> WordType {
    let (x, y) = (f32::from_bits(a), f32::from_bits(b));
    let result = match op {
        FpuOp::Add => x + y,
        FpuOp::Sub => x - y,
        FpuOp::Mul => x * y,
    };
    result.to_bits()
}
