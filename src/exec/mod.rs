//! Execution units of the datapath. Each unit is a pure function
//! `(a, b, op) -> result`; the core picks one through the [`ExecOp`]
//! tag, so adding a unit never touches decode or writeback.

pub mod alu;
pub mod fpu;
pub mod mdu;
pub mod shifter;

pub use alu::AluOp;
pub use fpu::FpuOp;
pub use mdu::MduOp;
pub use shifter::ShiftOp;

use crate::config::arch_config::WordType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOp {
    Alu(AluOp),
    Shift(ShiftOp),
    Fpu(FpuOp),
    Mdu(MduOp),
    /// Hand operand B through untouched (LUI).
    PassB,
}

pub fn execute(op: ExecOp, a: WordType, b: WordType) -> WordType {
    match op {
        ExecOp::Alu(op) => alu::execute(op, a, b),
        ExecOp::Shift(op) => shifter::execute(op, a, b),
        ExecOp::Fpu(op) => fpu::execute(op, a, b),
        ExecOp::Mdu(op) => mdu::execute(op, a, b),
        ExecOp::PassB => b,
    }
}
