pub const PRG_ROM_SIZE: usize = 0x4000;
pub const CHR_ROM_SIZE: usize = 0x2000;

const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;
const INES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mirroring {
    HORIZONTAL,
    VERTICAL,
    FOUR_SCREEN,
    ONESCREEN_LO,
    ONESCREEN_HI,
}

/// A parsed iNES image: PRG/CHR storage plus the header fields the rest of
/// the system cares about. Indexed access is bounds-checked; reads past the
/// end yield 0 and writes past the end are dropped.
pub struct Rom {
    pub mapper_id: u8,
    pub mirroring: Mirroring,
    pub battery_backed: bool,
    prg: Vec<u8>,
    chr: Vec<u8>,
}

impl Rom {
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, String> {
        if data.len() < HEADER_SIZE || data[0..4] != INES_MAGIC {
            return Err(String::from("Not an iNES file"));
        }

        let prg_banks = data[4] as usize;
        let chr_banks = data[5] as usize;
        let flags6 = data[6];
        let flags7 = data[7];

        let mirroring = if flags6 & 0b1000 != 0 {
            Mirroring::FOUR_SCREEN
        } else if flags6 & 0b0001 != 0 {
            Mirroring::VERTICAL
        } else {
            Mirroring::HORIZONTAL
        };

        let battery_backed = flags6 & 0b0010 != 0;
        let mapper_id = (flags7 & 0xF0) | (flags6 >> 4);

        let mut offset = HEADER_SIZE;
        if flags6 & 0b0100 != 0 {
            offset += TRAINER_SIZE;
        }

        let prg = copy_section(data, offset, prg_banks * PRG_ROM_SIZE);
        offset += prg_banks * PRG_ROM_SIZE;
        let chr = copy_section(data, offset, chr_banks * CHR_ROM_SIZE);

        Ok(Rom {
            mapper_id,
            mirroring,
            battery_backed,
            prg,
            chr,
        })
    }

    pub fn prg_len(&self) -> usize {
        self.prg.len()
    }

    pub fn chr_len(&self) -> usize {
        self.chr.len()
    }

    pub fn prg_banks(&self) -> usize {
        self.prg.len() / PRG_ROM_SIZE
    }

    pub fn get_prg(&self, index: usize) -> u8 {
        if index < self.prg.len() {
            self.prg[index]
        } else {
            0
        }
    }

    pub fn set_prg(&mut self, index: usize, byte: u8) {
        if index < self.prg.len() {
            self.prg[index] = byte;
        }
    }

    pub fn get_chr(&self, index: usize) -> u8 {
        if index < self.chr.len() {
            self.chr[index]
        } else {
            0
        }
    }

    pub fn set_chr(&mut self, index: usize, byte: u8) {
        if index < self.chr.len() {
            self.chr[index] = byte;
        }
    }
}

// Truncated images zero-fill the missing tail instead of failing the load.
fn copy_section(data: &[u8], offset: usize, size: usize) -> Vec<u8> {
    let mut section = vec![0u8; size];
    if offset < data.len() {
        let len = size.min(data.len() - offset);
        section[..len].copy_from_slice(&data[offset..offset + len]);
    }
    section
}
