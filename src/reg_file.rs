use std::{fmt::Debug, ops::Index};

use crate::config::arch_config::{REG_NAME, REGFILE_CNT, WordType};

/// 32 general-purpose registers; x0 is hardwired to zero.
pub struct RegFile {
    data: [WordType; REGFILE_CNT],
}

impl Index<usize> for RegFile {
    type Output = WordType;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl Debug for RegFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "reg_file {{")?;
        for (i, val) in self.data.iter().enumerate() {
            if i % 8 == 0 {
                write!(f, "  ")?;
            }
            write!(f, "{:>4}: 0x{:08x}  ", REG_NAME[i], val)?;
            if i % 8 == 7 {
                writeln!(f)?;
            }
        }
        write!(f, "}}")
    }
}

impl RegFile {
    pub fn new() -> Self {
        Self {
            data: [0; REGFILE_CNT],
        }
    }

    pub fn read(&self, id1: u8, id2: u8) -> (WordType, WordType) {
        (self.data[id1 as usize], self.data[id2 as usize])
    }

    /// id == 0 is ignored; instructions without a writeback use rd = 0.
    pub fn write(&mut self, id: u8, data: WordType) {
        if id == 0u8 {
            return;
        }

        self.data[id as usize] = data
    }

    pub fn dump(&self) -> [WordType; REGFILE_CNT] {
        self.data
    }
}

impl Default for RegFile {
    fn default() -> Self {
        Self::new()
    }
}
