use bitflags::bitflags;
use num_enum::TryFromPrimitive;

use crate::decoder::DecodedFields;
use crate::exec::{AluOp, ExecOp, FpuOp, MduOp, ShiftOp};

/// Major opcodes the control unit recognizes. Anything that fails the
/// conversion is an undefined encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum Opcode {
    OpReg = 0b0110011,
    OpImm = 0b0010011,
    Load = 0b0000011,
    Store = 0b0100011,
    Branch = 0b1100011,
    Jal = 0b1101111,
    Jalr = 0b1100111,
    Lui = 0b0110111,
    Auipc = 0b0010111,
    OpFp = 0b1010011,
}

bitflags! {
    /// Single-bit enable lines of the datapath.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CtrlFlags: u8 {
        const REG_WRITE  = 1 << 0;
        const MEM_READ   = 1 << 1;
        const MEM_WRITE  = 1 << 2;
        const MEM_TO_REG = 1 << 3;
        const ALU_SRC    = 1 << 4;
    }
}

/// Which decoded immediate feeds operand B when `ALU_SRC` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImmSel {
    #[default]
    None,
    I,
    S,
    B,
    U,
    J,
}

/// Operand A is the rs1 value for everything except AUIPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperandA {
    #[default]
    Reg,
    Pc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchCond {
    Eq,
    Ne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    /// Target is PC + J-immediate.
    Jal,
    /// Target is (rs1 + I-immediate) with bit 0 cleared.
    Jalr,
}

/// The full control bundle for one instruction. Recomputed every cycle,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSignals {
    pub flags: CtrlFlags,
    pub exec: ExecOp,
    pub imm: ImmSel,
    pub a: OperandA,
    pub branch: Option<BranchCond>,
    pub jump: Option<JumpKind>,
}

impl ControlSignals {
    fn new(flags: CtrlFlags, exec: ExecOp, imm: ImmSel) -> Self {
        Self {
            flags,
            exec,
            imm,
            a: OperandA::Reg,
            branch: None,
            jump: None,
        }
    }
}

/// Pure mapping (opcode, funct3, funct7) -> control signals, kept as one
/// flat match so the whole opcode space stays exhaustively testable.
/// `None` means the encoding is undefined; the core decides what an
/// undefined cycle does.
pub fn signals(f: &DecodedFields) -> Option<ControlSignals> {
    use CtrlFlags as C;

    let opcode = Opcode::try_from(f.opcode).ok()?;

    let sig = match opcode {
        Opcode::OpReg if f.funct7 == 0b0000001 => {
            let op = match f.funct3 {
                0b000 => MduOp::Mul,
                0b001 => MduOp::Mulh,
                0b100 => MduOp::Div,
                0b101 => MduOp::Divu,
                0b110 => MduOp::Rem,
                0b111 => MduOp::Remu,
                _ => return None,
            };
            ControlSignals::new(C::REG_WRITE, ExecOp::Mdu(op), ImmSel::None)
        }

        Opcode::OpReg => {
            let sub_or_sra = f.funct7 & 0b0100000 != 0;
            let exec = match f.funct3 {
                0b000 if sub_or_sra => ExecOp::Alu(AluOp::Sub),
                0b000 => ExecOp::Alu(AluOp::Add),
                0b100 => ExecOp::Alu(AluOp::Xor),
                0b110 => ExecOp::Alu(AluOp::Or),
                0b111 => ExecOp::Alu(AluOp::And),
                0b001 => ExecOp::Shift(ShiftOp::Sll),
                0b101 if sub_or_sra => ExecOp::Shift(ShiftOp::Sra),
                0b101 => ExecOp::Shift(ShiftOp::Srl),
                _ => return None,
            };
            ControlSignals::new(C::REG_WRITE, exec, ImmSel::None)
        }

        Opcode::OpImm => {
            let sra = f.funct7 & 0b0100000 != 0;
            let exec = match f.funct3 {
                0b000 => ExecOp::Alu(AluOp::Add),
                0b100 => ExecOp::Alu(AluOp::Xor),
                0b110 => ExecOp::Alu(AluOp::Or),
                0b111 => ExecOp::Alu(AluOp::And),
                // shift-immediates take the shamt from imm[4:0]
                0b001 => ExecOp::Shift(ShiftOp::Sll),
                0b101 if sra => ExecOp::Shift(ShiftOp::Sra),
                0b101 => ExecOp::Shift(ShiftOp::Srl),
                _ => return None,
            };
            ControlSignals::new(C::REG_WRITE | C::ALU_SRC, exec, ImmSel::I)
        }

        Opcode::Load => {
            if f.funct3 != 0b010 {
                return None;
            }
            ControlSignals::new(
                C::REG_WRITE | C::MEM_READ | C::MEM_TO_REG | C::ALU_SRC,
                ExecOp::Alu(AluOp::Add),
                ImmSel::I,
            )
        }

        Opcode::Store => {
            if f.funct3 != 0b010 {
                return None;
            }
            ControlSignals::new(
                C::MEM_WRITE | C::ALU_SRC,
                ExecOp::Alu(AluOp::Add),
                ImmSel::S,
            )
        }

        Opcode::Branch => {
            let cond = match f.funct3 {
                0b000 => BranchCond::Eq,
                0b001 => BranchCond::Ne,
                _ => return None,
            };
            let mut sig =
                ControlSignals::new(C::empty(), ExecOp::Alu(AluOp::Sub), ImmSel::B);
            sig.branch = Some(cond);
            sig
        }

        Opcode::Jal => {
            let mut sig = ControlSignals::new(C::REG_WRITE, ExecOp::Alu(AluOp::Add), ImmSel::J);
            sig.jump = Some(JumpKind::Jal);
            sig
        }

        Opcode::Jalr => {
            if f.funct3 != 0b000 {
                return None;
            }
            let mut sig = ControlSignals::new(
                C::REG_WRITE | C::ALU_SRC,
                ExecOp::Alu(AluOp::Add),
                ImmSel::I,
            );
            sig.jump = Some(JumpKind::Jalr);
            sig
        }

        // LUI bypasses the ALU: the writeback is the U-immediate itself.
        Opcode::Lui => ControlSignals::new(C::REG_WRITE | C::ALU_SRC, ExecOp::PassB, ImmSel::U),

        Opcode::Auipc => {
            let mut sig = ControlSignals::new(
                C::REG_WRITE | C::ALU_SRC,
                ExecOp::Alu(AluOp::Add),
                ImmSel::U,
            );
            sig.a = OperandA::Pc;
            sig
        }

        Opcode::OpFp => {
            let op = match f.funct7 {
                0b0000000 => FpuOp::Add,
                0b0000100 => FpuOp::Sub,
                0b0001000 => FpuOp::Mul,
                _ => return None,
            };
            ControlSignals::new(C::REG_WRITE, ExecOp::Fpu(op), ImmSel::None)
        }
    };

    Some(sig)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;

    fn ctrl(word: u32) -> Option<ControlSignals> {
        signals(&decode(word))
    }

    #[test]
    fn test_r_type() {
        let s = ctrl(0x002081B3).unwrap(); // add x3, x1, x2
        assert_eq!(s.exec, ExecOp::Alu(AluOp::Add));
        assert!(s.flags.contains(CtrlFlags::REG_WRITE));
        assert!(!s.flags.contains(CtrlFlags::ALU_SRC));

        let s = ctrl(0x40110233).unwrap(); // sub x4, x2, x1
        assert_eq!(s.exec, ExecOp::Alu(AluOp::Sub));

        let s = ctrl(0x401152b3).unwrap(); // sra x5, x2, x1
        assert_eq!(s.exec, ExecOp::Shift(ShiftOp::Sra));
    }

    #[test]
    fn test_i_type_arith() {
        let s = ctrl(0x00500093).unwrap(); // addi x1, x0, 5
        assert_eq!(s.exec, ExecOp::Alu(AluOp::Add));
        assert!(s.flags.contains(CtrlFlags::REG_WRITE | CtrlFlags::ALU_SRC));
        assert_eq!(s.imm, ImmSel::I);

        let s = ctrl(0x00311093).unwrap(); // slli x1, x2, 3
        assert_eq!(s.exec, ExecOp::Shift(ShiftOp::Sll));
        assert!(s.flags.contains(CtrlFlags::ALU_SRC));
    }

    #[test]
    fn test_load_store() {
        let s = ctrl(0x0002A203).unwrap(); // lw x4, 0(x5)
        assert!(s.flags.contains(
            CtrlFlags::REG_WRITE | CtrlFlags::MEM_READ | CtrlFlags::MEM_TO_REG | CtrlFlags::ALU_SRC
        ));
        assert_eq!(s.imm, ImmSel::I);

        let s = ctrl(0x0032A023).unwrap(); // sw x3, 0(x5)
        assert!(s.flags.contains(CtrlFlags::MEM_WRITE | CtrlFlags::ALU_SRC));
        assert!(!s.flags.contains(CtrlFlags::REG_WRITE));
        assert_eq!(s.imm, ImmSel::S);
    }

    #[test]
    fn test_branch() {
        let s = ctrl(0x00418463).unwrap(); // beq x3, x4, 8
        assert_eq!(s.branch, Some(BranchCond::Eq));
        assert_eq!(s.imm, ImmSel::B);
        assert!(!s.flags.contains(CtrlFlags::REG_WRITE));

        let s = ctrl(0xf8c318e3).unwrap(); // bne x6, x12, -112
        assert_eq!(s.branch, Some(BranchCond::Ne));
    }

    #[test]
    fn test_jumps() {
        let s = ctrl(0x004000EF).unwrap(); // jal x1, 4
        assert_eq!(s.jump, Some(JumpKind::Jal));
        assert!(s.flags.contains(CtrlFlags::REG_WRITE));

        let s = ctrl(0x000080E7).unwrap(); // jalr x1, 0(x1)
        assert_eq!(s.jump, Some(JumpKind::Jalr));
        assert!(s.flags.contains(CtrlFlags::ALU_SRC));
    }

    #[test]
    fn test_upper_imm() {
        let s = ctrl(0x000102B7).unwrap(); // lui x5, 0x10
        assert_eq!(s.exec, ExecOp::PassB);
        assert_eq!(s.imm, ImmSel::U);

        let s = ctrl(0x00010297).unwrap(); // auipc x5, 0x10
        assert_eq!(s.a, OperandA::Pc);
        assert_eq!(s.exec, ExecOp::Alu(AluOp::Add));
    }

    #[test]
    fn test_mdu_select() {
        let s = ctrl(0x022081B3).unwrap(); // mul x3, x1, x2
        assert_eq!(s.exec, ExecOp::Mdu(MduOp::Mul));

        let s = ctrl(0x0220C1B3).unwrap(); // div x3, x1, x2
        assert_eq!(s.exec, ExecOp::Mdu(MduOp::Div));

        let s = ctrl(0x0220E1B3).unwrap(); // rem x3, x1, x2
        assert_eq!(s.exec, ExecOp::Mdu(MduOp::Rem));
    }

    #[test]
    fn test_fpu_select() {
        let s = ctrl(0x002081D3).unwrap(); // fadd.s f3, f1, f2
        assert_eq!(s.exec, ExecOp::Fpu(FpuOp::Add));

        let s = ctrl(0x082081D3).unwrap(); // fsub.s f3, f1, f2
        assert_eq!(s.exec, ExecOp::Fpu(FpuOp::Sub));

        let s = ctrl(0x102081D3).unwrap(); // fmul.s f3, f1, f2
        assert_eq!(s.exec, ExecOp::Fpu(FpuOp::Mul));
    }

    #[test]
    fn test_undefined_encodings() {
        assert!(ctrl(0x00000000).is_none()); // all-zero word
        assert!(ctrl(0xFFFFFFFF).is_none());
        assert!(ctrl(0x0020A1B3).is_none()); // slt: not in the supported subset
        assert!(ctrl(0x0020C263).is_none()); // blt: unsupported branch funct3
        assert!(ctrl(0x00009083).is_none()); // lh: only word loads exist
    }
}
