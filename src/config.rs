#![allow(unused)]

pub mod imem_config {
    pub const BASE_ADDR: u32 = 0x0000_0000;
    pub const SIZE_WORDS: usize = 1024;

    pub const DEFAULT_PC_VALUE: u32 = BASE_ADDR;
}

pub mod dmem_config {
    pub const BASE_ADDR: u32 = 0x0001_0000;
    pub const SIZE_WORDS: usize = 1024;
}

pub mod arch_config {
    pub type WordType = u32;
    pub type SignedWordType = i32;

    pub const XLEN: usize = 32;
    pub const REGFILE_CNT: usize = 32;

    pub const REG_NAME: [&str; REGFILE_CNT] = [
        "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3",
        "a4", "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11",
        "t3", "t4", "t5", "t6",
    ];
}

pub mod sim_config {
    pub const DEFAULT_CYCLE_LIMIT: u64 = 1000;
}
