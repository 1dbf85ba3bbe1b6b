#![cfg(test)]

use crate::{
    config::arch_config::WordType,
    cpu::{Cpu, CpuConfig, HaltReason},
};

pub(crate) struct TestCpuBuilder {
    cpu: Cpu,
}

impl TestCpuBuilder {
    pub(crate) fn new() -> Self {
        Self { cpu: Cpu::new() }
    }

    pub(crate) fn config(mut self, config: CpuConfig) -> Self {
        self.cpu = Cpu::with_config(config);
        self
    }

    pub(crate) fn reg(mut self, idx: u8, value: WordType) -> Self {
        self.cpu.reg_file.write(idx, value);
        self
    }

    pub(crate) fn pc(mut self, value: WordType) -> Self {
        self.cpu.pc = value;
        self
    }

    pub(crate) fn dmem(mut self, addr: WordType, value: WordType) -> Self {
        self.cpu.dmem.write(addr, value).unwrap();
        self
    }

    pub(crate) fn program(mut self, words: &[u32]) -> Self {
        self.cpu.load_program(words).unwrap();
        self
    }

    pub(crate) fn build(self) -> Cpu {
        self.cpu
    }
}

pub(crate) struct CpuChecker<'a> {
    cpu: &'a Cpu,
}

impl<'a> CpuChecker<'a> {
    pub(crate) fn new(cpu: &'a Cpu) -> Self {
        Self { cpu }.reg(0, 0) // x0 is always 0
    }

    pub(crate) fn reg(self, idx: u8, value: WordType) -> Self {
        assert_eq!(
            self.cpu.reg_file.read(idx, 0).0,
            value,
            "Register #{} incorrect",
            idx,
        );
        self
    }

    pub(crate) fn pc(self, value: WordType) -> Self {
        assert_eq!(self.cpu.pc, value, "PC incorrect");
        self
    }

    pub(crate) fn dmem(self, addr: WordType, value: WordType) -> Self {
        assert_eq!(
            self.cpu.dmem.read(addr).unwrap(),
            value,
            "Memory value incorrect at {:#010x}",
            addr
        );
        self
    }

    pub(crate) fn cycles(self, value: u64) -> Self {
        assert_eq!(self.cpu.cycle_count, value, "Cycle count incorrect");
        self
    }

    pub(crate) fn instrs(self, value: u64) -> Self {
        assert_eq!(
            self.cpu.instruction_count, value,
            "Instruction count incorrect"
        );
        self
    }

    pub(crate) fn halted(self, reason: Option<HaltReason>) -> Self {
        assert_eq!(self.cpu.halted, reason, "Halt reason incorrect");
        self
    }
}

/// Load a program, run it to halt (or the cycle limit), then check.
pub(crate) fn run_test_program<F, G>(words: &[u32], build: F, check: G)
where
    F: FnOnce(TestCpuBuilder) -> TestCpuBuilder,
    G: for<'a> FnOnce(CpuChecker<'a>) -> CpuChecker<'a>,
{
    let mut cpu = build(TestCpuBuilder::new().program(words)).build();
    cpu.run();
    check(CpuChecker::new(&cpu));
}
