#![cfg_attr(debug_assertions, allow(dead_code))]

//! Functional simulator of a single-cycle RV32I core with optional
//! f32 FPU and integer multiply/divide execution units.

pub mod config;
pub mod control;
pub mod cpu;
pub mod decoder;
pub mod exec;
pub mod load;
pub mod memory;
pub mod reg_file;

mod cpu_tester;
mod utils;

use std::path::Path;

use crate::{
    cpu::{Cpu, CpuConfig, CpuState, HaltReason},
    load::LoadError,
};

/// Owns one CPU instance and its program. Independent simulators share
/// nothing, so any number can run side by side.
pub struct Simulator {
    cpu: Cpu,
}

impl Simulator {
    pub fn from_words(words: &[u32], config: CpuConfig) -> Result<Self, LoadError> {
        let mut cpu = Cpu::with_config(config);
        cpu.load_program(words)?;
        Ok(Self { cpu })
    }

    pub fn from_hex_file(path: &Path, config: CpuConfig) -> Result<Self, LoadError> {
        Self::from_words(&load::load_hex_file(path)?, config)
    }

    pub fn run(&mut self) -> HaltReason {
        self.cpu.run()
    }

    pub fn step(&mut self) {
        self.cpu.step();
    }

    pub fn state(&self) -> CpuState {
        self.cpu.state()
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }
}
