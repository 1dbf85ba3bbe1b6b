use crate::config::arch_config::{SignedWordType, WordType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MduOp {
    /// Low 32 bits of the signed product.
    Mul,
    /// High 32 bits of the signed product.
    Mulh,
    Div,
    Divu,
    Rem,
    Remu,
}

/// Integer multiply/divide with the RISC-V M edge cases: division by
/// zero yields an all-ones quotient and the unmodified dividend as the
/// remainder; i32::MIN / -1 yields the dividend and a zero remainder.
pub fn execute(op: MduOp, a: WordType, b: WordType) -> WordType {
    let (sa, sb) = (a as SignedWordType, b as SignedWordType);
    match op {
        MduOp::Mul => ((sa as i64).wrapping_mul(sb as i64)) as WordType,
        MduOp::Mulh => (((sa as i64).wrapping_mul(sb as i64)) >> 32) as WordType,
        MduOp::Div => {
            if b == 0 {
                WordType::MAX
            } else {
                sa.wrapping_div(sb) as WordType
            }
        }
        MduOp::Divu => {
            if b == 0 {
                WordType::MAX
            } else {
                a / b
            }
        }
        MduOp::Rem => {
            if b == 0 {
                a
            } else {
                sa.wrapping_rem(sb) as WordType
            }
        }
        MduOp::Remu => {
            if b == 0 {
                a
            } else {
                a % b
            }
        }
    }
}
