use std::io;
use std::path::Path;
use std::fs;

use crate::mapper::{Mapper, Mapper0, Mapper1};
#[cfg(test)]
use crate::mapper::TestMapper;
use crate::rom::{Mirroring, Rom};
use crate::SystemControl;

/// A loaded cartridge: the parsed image plus the board's mapper. All bus
/// traffic aimed at cartridge space funnels through the mapper's address
/// translation.
pub struct CartridgeNes {
    rom: Rom,
    mapper: Box<dyn Mapper>,
}

impl CartridgeNes {
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let data = fs::read(path)?;

        CartridgeNes::from_ines_bytes(&data).map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }

    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, String> {
        let rom = Rom::from_ines_bytes(data)?;

        // Unrecognized mapper ids fall back to NROM.
        let mapper: Box<dyn Mapper> = match rom.mapper_id {
            1 => Box::new(Mapper1::new(&rom)),
            _ => Box::new(Mapper0::new(&rom)),
        };

        Ok(CartridgeNes { rom, mapper })
    }

    pub fn get(&mut self, addr: u16) -> u8 {
        self.mapper.get(&self.rom, addr)
    }

    pub fn set(&mut self, addr: u16, byte: u8) {
        self.mapper.set(&mut self.rom, addr, byte);
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mapper.mirroring().unwrap_or(self.rom.mirroring)
    }

    pub fn mapper_id(&self) -> u8 {
        self.rom.mapper_id
    }

    pub fn battery_backed(&self) -> bool {
        self.rom.battery_backed
    }

    pub fn prg_len(&self) -> usize {
        self.rom.prg_len()
    }

    pub fn chr_len(&self) -> usize {
        self.rom.chr_len()
    }
}

impl SystemControl for CartridgeNes {
    fn reset(&mut self) {
        self.mapper.reset();
    }
}

#[cfg(test)]
impl CartridgeNes {
    // Bankless flat-memory cartridge for bus and CPU tests.
    pub fn test_new() -> Self {
        let header = [0x4E, 0x45, 0x53, 0x1A, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let rom = Rom::from_ines_bytes(&header).unwrap();

        CartridgeNes {
            rom,
            mapper: Box::new(TestMapper::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::PRG_ROM_SIZE;

    fn ines_image(prg_banks: u8, flags6: u8, flags7: u8) -> Vec<u8> {
        let mut data = vec![0x4E, 0x45, 0x53, 0x1A, prg_banks, 0, flags6, flags7];
        data.resize(16, 0x00);
        data.resize(16 + prg_banks as usize * PRG_ROM_SIZE, 0x00);
        data
    }

    #[test]
    fn test_bad_image_is_an_error() {
        assert!(CartridgeNes::from_ines_bytes(&[0xFF; 32]).is_err());
    }

    #[test]
    fn test_factory_selects_mmc1() {
        let mut data = ines_image(2, 0x10, 0x00);
        data[16] = 0x77;

        let mut cartridge = CartridgeNes::from_ines_bytes(&data).unwrap();
        assert_eq!(cartridge.mapper_id(), 1);

        // The serial port responds, so this really is the MMC1 board.
        for _ in 0..5 {
            cartridge.set(0x8000, 0x01);
        }
        assert_eq!(cartridge.mirroring(), Mirroring::HORIZONTAL);
        for value in [0, 1, 0, 0, 0] {
            cartridge.set(0x8000, value);
        }
        assert_eq!(cartridge.mirroring(), Mirroring::VERTICAL);
    }

    #[test]
    fn test_unknown_mapper_falls_back_to_nrom() {
        let mut data = ines_image(1, 0x00, 0x40);
        data[16] = 0x77;

        let mut cartridge = CartridgeNes::from_ines_bytes(&data).unwrap();
        assert_eq!(cartridge.mapper_id(), 0x40);
        assert_eq!(cartridge.get(0x8000), 0x77);
        assert_eq!(cartridge.get(0xC000), 0x77);
    }
}
