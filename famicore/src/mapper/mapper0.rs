use super::{
    Mapper, CHR_HI_END, PRG_ROM_HI_END, PRG_ROM_HI_START, PRG_ROM_LO_END, PRG_ROM_LO_START,
};
use crate::rom::{Rom, PRG_ROM_SIZE};

/// NROM: no banking hardware at all. Two fixed 16 KiB PRG windows; the high
/// window is pinned to the last bank so a single-bank image shows up in both.
pub struct Mapper0 {
    prg_bank_lo: usize,
    prg_bank_hi: usize,
}

impl Mapper0 {
    pub fn new(rom: &Rom) -> Self {
        Self {
            prg_bank_lo: 0,
            prg_bank_hi: rom.prg_len().saturating_sub(PRG_ROM_SIZE),
        }
    }
}

impl Mapper for Mapper0 {
    fn get(&mut self, rom: &Rom, addr: u16) -> u8 {
        match addr {
            0x0000..=CHR_HI_END => rom.get_chr(addr as usize),
            PRG_ROM_LO_START..=PRG_ROM_LO_END => {
                rom.get_prg(self.prg_bank_lo + (addr - PRG_ROM_LO_START) as usize)
            }
            PRG_ROM_HI_START..=PRG_ROM_HI_END => {
                rom.get_prg(self.prg_bank_hi + (addr - PRG_ROM_HI_START) as usize)
            }
            _ => 0,
        }
    }

    // CHR writes pass straight through; PRG space has nothing writable.
    fn set(&mut self, rom: &mut Rom, addr: u16, byte: u8) {
        if addr <= CHR_HI_END {
            rom.set_chr(addr as usize, byte);
        }
    }
}
