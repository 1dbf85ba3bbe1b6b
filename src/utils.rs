use crate::config::arch_config::{SignedWordType, WordType, XLEN};

/// Sign-extend the low `from_bits` bits of `value` to a full word.
pub fn sign_extend(value: WordType, from_bits: u32) -> WordType {
    let shift = XLEN as u32 - from_bits;
    (((value << shift) as SignedWordType) >> shift) as WordType
}

/// get the negative of given number of [`WordType`] in 2's complement.
pub fn negative_of(value: WordType) -> WordType {
    (!value).wrapping_add(1)
}

pub fn bit(value: WordType, idx: u32) -> WordType {
    (value >> idx) & 1
}

/// Extract bits `[hi:lo]` of `value`, inclusive on both ends.
pub fn bits(value: WordType, hi: u32, lo: u32) -> WordType {
    (value >> lo) & ((1u64 << (hi - lo + 1)) - 1) as WordType
}
