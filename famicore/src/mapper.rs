mod mapper0;
mod mapper1;
#[cfg(test)]
mod testmapper;

use crate::rom::{Mirroring, Rom};

pub use self::mapper0::Mapper0;
pub use self::mapper1::Mapper1;

#[cfg(test)]
pub use self::testmapper::TestMapper;

pub const CHR_LO_START: u16 = 0x0000;
pub const CHR_LO_END: u16 = 0x0FFF;
pub const CHR_HI_START: u16 = 0x1000;
pub const CHR_HI_END: u16 = 0x1FFF;

pub const PRG_RAM_START: u16 = 0x6000;
pub const PRG_RAM_END: u16 = 0x7FFF;
pub const PRG_ROM_LO_START: u16 = 0x8000;
pub const PRG_ROM_LO_END: u16 = 0xBFFF;
pub const PRG_ROM_HI_START: u16 = 0xC000;
pub const PRG_ROM_HI_END: u16 = 0xFFFF;

/// Address translation policy for one cartridge board. A mapper owns only its
/// bank-select state; PRG/CHR storage lives in the `Rom` and is passed in per
/// call. One address space covers both sides: pattern reads arrive below
/// 0x2000, CPU-side cartridge traffic arrives at 0x4020 and up.
pub trait Mapper {
    fn get(&mut self, rom: &Rom, addr: u16) -> u8;

    fn set(&mut self, rom: &mut Rom, addr: u16, byte: u8);

    /// Some boards can switch mirroring mode during execution
    fn mirroring(&self) -> Option<Mirroring> {
        None
    }

    /// Resets bank-select state, NOT including memory
    fn reset(&mut self) {}
}
