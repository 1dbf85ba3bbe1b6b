use crate::{
    config::arch_config::WordType,
    utils::{bit, bits, sign_extend},
};

/// Every field a 32-bit RISC-V instruction word can carry, extracted up
/// front. Which immediate is meaningful is decided later by the control
/// unit's immediate selector; decoding itself is total and cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedFields {
    pub opcode: u8,
    pub rd: u8,
    pub rs1: u8,
    pub rs2: u8,
    pub funct3: u8,
    pub funct7: u8,

    pub imm_i: WordType,
    pub imm_s: WordType,
    pub imm_b: WordType,
    pub imm_u: WordType,
    pub imm_j: WordType,
}

pub fn decode(word: u32) -> DecodedFields {
    let imm_i = sign_extend(bits(word, 31, 20), 12);
    let imm_s = sign_extend((bits(word, 31, 25) << 5) | bits(word, 11, 7), 12);

    // B and J scatter their bits; bit 0 is always forced to zero.
    let imm_b = sign_extend(
        (bit(word, 31) << 12) | (bit(word, 7) << 11) | (bits(word, 30, 25) << 5)
            | (bits(word, 11, 8) << 1),
        13,
    );
    let imm_u = bits(word, 31, 12) << 12;
    let imm_j = sign_extend(
        (bit(word, 31) << 20) | (bits(word, 19, 12) << 12) | (bit(word, 20) << 11)
            | (bits(word, 30, 21) << 1),
        21,
    );

    DecodedFields {
        opcode: bits(word, 6, 0) as u8,
        rd: bits(word, 11, 7) as u8,
        rs1: bits(word, 19, 15) as u8,
        rs2: bits(word, 24, 20) as u8,
        funct3: bits(word, 14, 12) as u8,
        funct7: bits(word, 31, 25) as u8,
        imm_i,
        imm_s,
        imm_b,
        imm_u,
        imm_j,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::negative_of;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha12Rng;

    fn instr_r(opcode: u8, funct3: u8, funct7: u8, rd: u8, rs1: u8, rs2: u8) -> u32 {
        (opcode as u32)
            | ((rd as u32) << 7)
            | ((funct3 as u32) << 12)
            | ((rs1 as u32) << 15)
            | ((rs2 as u32) << 20)
            | ((funct7 as u32) << 25)
    }

    fn instr_i(opcode: u8, funct3: u8, rd: u8, rs1: u8, imm: u32) -> u32 {
        (opcode as u32)
            | ((rd as u32) << 7)
            | ((funct3 as u32) << 12)
            | ((rs1 as u32) << 15)
            | (imm << 20)
    }

    #[test]
    fn test_register_fields() {
        let mut rng = ChaCha12Rng::seed_from_u64(0721);

        for _ in 1..=100 {
            let rd = rng.random_range(0..32u8);
            let rs1 = rng.random_range(0..32u8);
            let rs2 = rng.random_range(0..32u8);

            let f = decode(instr_r(0b0110011, 0b000, 0b0100000, rd, rs1, rs2));
            assert_eq!(f.opcode, 0b0110011);
            assert_eq!(f.funct3, 0b000);
            assert_eq!(f.funct7, 0b0100000);
            assert_eq!((f.rd, f.rs1, f.rs2), (rd, rs1, rs2));
        }
    }

    #[test]
    fn test_imm_i_sign() {
        // addi x2, x3, -5
        let f = decode(instr_i(0b0010011, 0b000, 2, 3, 0xFFB));
        assert_eq!(f.imm_i, negative_of(5));

        // source bit 11 clear stays positive
        let f = decode(instr_i(0b0010011, 0b000, 2, 3, 0x7FF));
        assert_eq!(f.imm_i, 0x7FF);
    }

    #[test]
    fn test_imm_s() {
        // sw x1, -8(x2) => 0xfe112c23
        let f = decode(0xfe112c23);
        assert_eq!(f.imm_s, negative_of(8));
        assert_eq!(f.rs1, 2);
        assert_eq!(f.rs2, 1);
    }

    #[test]
    fn test_imm_b() {
        // bne x6, x12, -112 => 0xf8c318e3
        let f = decode(0xf8c318e3);
        assert_eq!(f.imm_b, negative_of(112));

        // beq x3, x4, +8 => 0x00418463
        let f = decode(0x00418463);
        assert_eq!(f.imm_b, 8);
        assert_eq!((f.rs1, f.rs2), (3, 4));
    }

    #[test]
    fn test_imm_u() {
        // lui x3, 0x12345 => 0x123451b7
        let f = decode(0x123451b7);
        assert_eq!(f.imm_u, 0x12345000);
        assert_eq!(f.rd, 3);
    }

    #[test]
    fn test_imm_j() {
        // jal x0, -128 => 0xf81ff06f
        let f = decode(0xf81ff06f);
        assert_eq!(f.imm_j, negative_of(128));
        assert_eq!(f.rd, 0);
    }

    #[test]
    fn test_branch_jump_imm_bit0_clear() {
        let mut rng = ChaCha12Rng::seed_from_u64(0721);

        for _ in 1..=1000 {
            let f = decode(rng.random::<u32>());
            assert_eq!(f.imm_b & 1, 0);
            assert_eq!(f.imm_j & 1, 0);
        }
    }
}
