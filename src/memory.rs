use thiserror::Error;

use crate::config::arch_config::WordType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemError {
    #[error("misaligned load at {0:#010x}")]
    LoadMisaligned(WordType),
    #[error("load out of bounds at {0:#010x}")]
    LoadFault(WordType),
    #[error("misaligned store at {0:#010x}")]
    StoreMisaligned(WordType),
    #[error("store out of bounds at {0:#010x}")]
    StoreFault(WordType),
}

/// One word-addressable memory space with a fixed base and bound. The
/// simulator owns two of these: instruction memory and data memory.
pub struct WordMemory {
    base: WordType,
    words: Box<[WordType]>,
}

impl WordMemory {
    pub fn new(base: WordType, size_words: usize) -> Self {
        Self {
            base,
            words: vec![0; size_words].into_boxed_slice(),
        }
    }

    pub fn base(&self) -> WordType {
        self.base
    }

    pub fn size_bytes(&self) -> WordType {
        (self.words.len() * 4) as WordType
    }

    fn index_of(&self, addr: WordType) -> Option<usize> {
        if addr < self.base || addr >= self.base.wrapping_add(self.size_bytes()) {
            return None;
        }
        Some(((addr - self.base) / 4) as usize)
    }

    pub fn read(&self, addr: WordType) -> Result<WordType, MemError> {
        if addr % 4 != 0 {
            return Err(MemError::LoadMisaligned(addr));
        }
        let idx = self.index_of(addr).ok_or(MemError::LoadFault(addr))?;
        Ok(self.words[idx])
    }

    pub fn write(&mut self, addr: WordType, data: WordType) -> Result<(), MemError> {
        if addr % 4 != 0 {
            return Err(MemError::StoreMisaligned(addr));
        }
        let idx = self.index_of(addr).ok_or(MemError::StoreFault(addr))?;
        self.words[idx] = data;
        Ok(())
    }

    /// Place a program image word by word, starting at the base address.
    pub fn load_program(&mut self, words: &[WordType]) -> Result<(), MemError> {
        let mut addr = self.base;
        for &w in words {
            self.write(addr, w)?;
            addr += 4;
        }
        Ok(())
    }

    pub fn dump(&self) -> Vec<WordType> {
        self.words.to_vec()
    }

    /// Non-zero words with their byte addresses, for state reports.
    pub fn nonzero_words(&self) -> impl Iterator<Item = (WordType, WordType)> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter(|(_, &w)| w != 0)
            .map(|(i, &w)| (self.base + (i as WordType) * 4, w))
    }
}
