use crate::{
    config::{
        arch_config::{REGFILE_CNT, WordType},
        dmem_config, imem_config, sim_config,
    },
    control::{self, BranchCond, CtrlFlags, ImmSel, JumpKind, OperandA},
    decoder,
    memory::{MemError, WordMemory},
    reg_file::RegFile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// The designated halt idiom (JAL x0 with zero offset).
    ExplicitHalt,
    /// Misaligned or out-of-bounds instruction or data access.
    MemoryFault,
    /// The configured cycle limit was reached.
    CycleLimitExceeded,
    /// Undefined encoding under [`UndefinedOpcode::Halt`].
    UndefinedInstruction,
}

/// What an undefined encoding does. The reference behavior is a silent
/// no-op cycle; halting is available for stricter runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndefinedOpcode {
    #[default]
    Nop,
    Halt,
}

#[derive(Debug, Clone, Copy)]
pub struct CpuConfig {
    pub cycle_limit: u64,
    pub undefined_opcode: UndefinedOpcode,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            cycle_limit: sim_config::DEFAULT_CYCLE_LIMIT,
            undefined_opcode: UndefinedOpcode::default(),
        }
    }
}

/// Immutable snapshot of everything observable about a core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuState {
    pub pc: WordType,
    pub cycle_count: u64,
    pub instruction_count: u64,
    pub halted: Option<HaltReason>,
    pub registers: [WordType; REGFILE_CNT],
    pub data_memory: Vec<WordType>,
}

/// The single-cycle core: one `step` runs fetch, decode, control,
/// register read, execute, memory access, writeback and the PC update
/// as an indivisible unit. Nothing persists between stages.
pub struct Cpu {
    pub(crate) reg_file: RegFile,
    pub(crate) imem: WordMemory,
    pub(crate) dmem: WordMemory,
    pub(crate) pc: WordType,

    pub(crate) halted: Option<HaltReason>,
    pub(crate) cycle_count: u64,
    pub(crate) instruction_count: u64,

    config: CpuConfig,
}

impl Cpu {
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Self {
        Self {
            reg_file: RegFile::new(),
            imem: WordMemory::new(imem_config::BASE_ADDR, imem_config::SIZE_WORDS),
            dmem: WordMemory::new(dmem_config::BASE_ADDR, dmem_config::SIZE_WORDS),
            pc: imem_config::DEFAULT_PC_VALUE,
            halted: None,
            cycle_count: 0,
            instruction_count: 0,
            config,
        }
    }

    /// Write a program image into instruction memory, word by word from
    /// the base address, and point the PC at it.
    pub fn load_program(&mut self, words: &[WordType]) -> Result<(), MemError> {
        self.imem.load_program(words)?;
        self.pc = self.imem.base();
        Ok(())
    }

    pub fn pc(&self) -> WordType {
        self.pc
    }

    pub fn halted(&self) -> Option<HaltReason> {
        self.halted
    }

    /// Execute one cycle. Does nothing once halted; a halted core is
    /// frozen, counters included.
    pub fn step(&mut self) {
        if self.halted.is_some() {
            return;
        }

        // IF
        let word = match self.imem.read(self.pc) {
            Ok(w) => w,
            Err(err) => {
                log::warn!("instruction fetch fault: {err}");
                self.halted = Some(HaltReason::MemoryFault);
                return;
            }
        };

        // ID
        let f = decoder::decode(word);
        log::trace!(
            "cycle {}: pc = {:#010x}, instr = {:#010x}",
            self.cycle_count,
            self.pc,
            word
        );

        // JAL x0 with zero offset is the halt idiom: it consumes a
        // cycle but the PC stays on the halt word.
        if f.opcode == 0b1101111 && f.rd == 0 && f.imm_j == 0 {
            self.retire();
            self.halted = Some(HaltReason::ExplicitHalt);
            return;
        }

        let Some(ctrl) = control::signals(&f) else {
            log::warn!("undefined instruction {:#010x} at {:#010x}", word, self.pc);
            match self.config.undefined_opcode {
                UndefinedOpcode::Nop => {
                    self.pc = self.pc.wrapping_add(4);
                    self.retire();
                }
                UndefinedOpcode::Halt => {
                    self.halted = Some(HaltReason::UndefinedInstruction);
                }
            }
            return;
        };

        let (rs1, rs2) = self.reg_file.read(f.rs1, f.rs2);

        let imm = match ctrl.imm {
            ImmSel::None => 0,
            ImmSel::I => f.imm_i,
            ImmSel::S => f.imm_s,
            ImmSel::B => f.imm_b,
            ImmSel::U => f.imm_u,
            ImmSel::J => f.imm_j,
        };

        // EX
        let a = match ctrl.a {
            OperandA::Reg => rs1,
            OperandA::Pc => self.pc,
        };
        let b = if ctrl.flags.contains(CtrlFlags::ALU_SRC) {
            imm
        } else {
            rs2
        };
        let exec_result = crate::exec::execute(ctrl.exec, a, b);

        // MEM: a fault abandons the cycle before any architectural
        // update, so registers, PC and counters stay untouched.
        let mut mem_data = 0;
        if ctrl.flags.contains(CtrlFlags::MEM_READ) {
            match self.dmem.read(exec_result) {
                Ok(v) => mem_data = v,
                Err(err) => {
                    log::warn!("data access fault: {err}");
                    self.halted = Some(HaltReason::MemoryFault);
                    return;
                }
            }
        }
        if ctrl.flags.contains(CtrlFlags::MEM_WRITE) {
            if let Err(err) = self.dmem.write(exec_result, rs2) {
                log::warn!("data access fault: {err}");
                self.halted = Some(HaltReason::MemoryFault);
                return;
            }
        }

        // WB
        if ctrl.flags.contains(CtrlFlags::REG_WRITE) {
            let value = if ctrl.flags.contains(CtrlFlags::MEM_TO_REG) {
                mem_data
            } else if ctrl.jump.is_some() {
                self.pc.wrapping_add(4)
            } else {
                exec_result
            };
            self.reg_file.write(f.rd, value);
        }

        // PC update
        let taken = match ctrl.branch {
            Some(BranchCond::Eq) => rs1 == rs2,
            Some(BranchCond::Ne) => rs1 != rs2,
            None => false,
        };
        self.pc = match ctrl.jump {
            Some(JumpKind::Jal) => self.pc.wrapping_add(f.imm_j),
            Some(JumpKind::Jalr) => rs1.wrapping_add(f.imm_i) & !1,
            None if taken => self.pc.wrapping_add(f.imm_b),
            None => self.pc.wrapping_add(4),
        };

        self.retire();
    }

    fn retire(&mut self) {
        self.cycle_count += 1;
        self.instruction_count += 1;
        if self.cycle_count >= self.config.cycle_limit {
            self.halted = Some(HaltReason::CycleLimitExceeded);
        }
    }

    /// Step until the core halts and report why.
    pub fn run(&mut self) -> HaltReason {
        while self.halted.is_none() {
            self.step();
        }
        self.halted.unwrap_or(HaltReason::CycleLimitExceeded)
    }

    /// Non-zero data-memory words with their addresses, for reports.
    pub fn dmem_nonzero(&self) -> Vec<(WordType, WordType)> {
        self.dmem.nonzero_words().collect()
    }

    pub fn state(&self) -> CpuState {
        CpuState {
            pc: self.pc,
            cycle_count: self.cycle_count,
            instruction_count: self.instruction_count,
            halted: self.halted,
            registers: self.reg_file.dump(),
            data_memory: self.dmem.dump(),
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
