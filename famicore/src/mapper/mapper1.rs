use super::{
    Mapper, CHR_HI_END, CHR_HI_START, CHR_LO_END, CHR_LO_START, PRG_RAM_END, PRG_RAM_START,
    PRG_ROM_HI_END, PRG_ROM_HI_START, PRG_ROM_LO_END, PRG_ROM_LO_START,
};
use crate::rom::{Mirroring, Rom, CHR_ROM_SIZE, PRG_ROM_SIZE};

const SAVE_RAM_SIZE: usize = 0x2000;

/// MMC1. Banking registers are written one bit at a time through a serial
/// load port covering 0x8000-0xFFFF; the fifth write latches into the
/// register selected by address bits 13-14.
pub struct Mapper1 {
    save_ram: [u8; SAVE_RAM_SIZE],
    mirroring: Mirroring,
    prg_rom_banks: usize,

    chr_bank_lo4: usize,
    chr_bank_hi4: usize,
    chr_bank_full8: usize,

    prg_bank_lo16: usize,
    prg_bank_hi16: usize,
    prg_bank_full32: usize,

    load_reg: u8,
    control_reg: u8,
    load_count: u8,
}

impl Mapper for Mapper1 {
    fn get(&mut self, rom: &Rom, addr: u16) -> u8 {
        match addr {
            CHR_LO_START..=CHR_LO_END => {
                if self.control_reg & 0b10000 != 0 {
                    rom.get_chr(self.chr_bank_lo4 * (CHR_ROM_SIZE >> 1) + (addr & 0x0FFF) as usize)
                } else {
                    rom.get_chr(self.chr_bank_full8 * CHR_ROM_SIZE + (addr & 0x1FFF) as usize)
                }
            }
            CHR_HI_START..=CHR_HI_END => {
                if self.control_reg & 0b10000 != 0 {
                    rom.get_chr(self.chr_bank_hi4 * (CHR_ROM_SIZE >> 1) + (addr & 0x0FFF) as usize)
                } else {
                    rom.get_chr(self.chr_bank_full8 * CHR_ROM_SIZE + (addr & 0x1FFF) as usize)
                }
            }
            PRG_RAM_START..=PRG_RAM_END => self.save_ram[(addr & 0x1FFF) as usize],
            PRG_ROM_LO_START..=PRG_ROM_LO_END => {
                if self.control_reg & 0b01000 != 0 {
                    rom.get_prg(self.prg_bank_lo16 * PRG_ROM_SIZE + (addr & 0x3FFF) as usize)
                } else {
                    rom.get_prg(self.prg_bank_full32 * (PRG_ROM_SIZE << 1) + (addr & 0x7FFF) as usize)
                }
            }
            PRG_ROM_HI_START..=PRG_ROM_HI_END => {
                if self.control_reg & 0b01000 != 0 {
                    rom.get_prg(self.prg_bank_hi16 * PRG_ROM_SIZE + (addr & 0x3FFF) as usize)
                } else {
                    rom.get_prg(self.prg_bank_full32 * (PRG_ROM_SIZE << 1) + (addr & 0x7FFF) as usize)
                }
            }
            _ => 0,
        }
    }

    fn set(&mut self, rom: &mut Rom, addr: u16, byte: u8) {
        match addr {
            CHR_LO_START..=CHR_LO_END => {
                if self.control_reg & 0b10000 != 0 {
                    rom.set_chr(
                        self.chr_bank_lo4 * (CHR_ROM_SIZE >> 1) + (addr & 0x0FFF) as usize,
                        byte,
                    );
                } else {
                    rom.set_chr(
                        self.chr_bank_full8 * CHR_ROM_SIZE + (addr & 0x1FFF) as usize,
                        byte,
                    );
                }
            }
            CHR_HI_START..=CHR_HI_END => {
                if self.control_reg & 0b10000 != 0 {
                    rom.set_chr(
                        self.chr_bank_hi4 * (CHR_ROM_SIZE >> 1) + (addr & 0x0FFF) as usize,
                        byte,
                    );
                } else {
                    rom.set_chr(
                        self.chr_bank_full8 * CHR_ROM_SIZE + (addr & 0x1FFF) as usize,
                        byte,
                    );
                }
            }
            PRG_RAM_START..=PRG_RAM_END => {
                self.save_ram[(addr & 0x1FFF) as usize] = byte;
            }
            PRG_ROM_LO_START..=PRG_ROM_HI_END => self.load_port_write(addr, byte),
            _ => {}
        }
    }

    fn mirroring(&self) -> Option<Mirroring> {
        Some(self.mirroring)
    }

    fn reset(&mut self) {
        self.chr_bank_lo4 = 0;
        self.chr_bank_hi4 = 0;
        self.chr_bank_full8 = 0;

        self.prg_bank_lo16 = 0;
        self.prg_bank_hi16 = self.prg_rom_banks.saturating_sub(1);
        self.prg_bank_full32 = 0;

        self.load_reg = 0x00;
        self.control_reg = 0x1C;
        self.load_count = 0;
    }
}

impl Mapper1 {
    pub fn new(rom: &Rom) -> Self {
        Self {
            save_ram: [0; SAVE_RAM_SIZE],
            mirroring: rom.mirroring,
            prg_rom_banks: rom.prg_banks(),

            chr_bank_lo4: 0,
            chr_bank_hi4: 0,
            chr_bank_full8: 0,

            prg_bank_lo16: 0,
            prg_bank_hi16: rom.prg_banks().saturating_sub(1),
            prg_bank_full32: 0,

            load_reg: 0x00,
            control_reg: 0x1C,
            load_count: 0,
        }
    }

    fn load_port_write(&mut self, addr: u16, byte: u8) {
        if byte & 0b10000000 != 0 {
            self.load_reg = 0x00;
            self.load_count = 0;
            self.control_reg |= 0b00001100;
            return;
        }

        self.load_reg >>= 1;
        self.load_reg |= (byte & 0x01) << 4;
        self.load_count += 1;

        if self.load_count < 5 {
            return;
        }

        match (addr >> 13) & 0b00000011 {
            0 => {
                self.control_reg = self.load_reg & 0b00011111;

                self.mirroring = match self.control_reg & 0b00000011 {
                    0 => Mirroring::ONESCREEN_LO,
                    1 => Mirroring::ONESCREEN_HI,
                    2 => Mirroring::VERTICAL,
                    _ => Mirroring::HORIZONTAL,
                };
            }
            1 => {
                if self.control_reg & 0b10000 != 0 {
                    self.chr_bank_lo4 = (self.load_reg & 0b00011111) as usize;
                } else {
                    self.chr_bank_full8 = ((self.load_reg & 0b00011110) >> 1) as usize;
                }
            }
            2 => {
                if self.control_reg & 0b10000 != 0 {
                    self.chr_bank_hi4 = (self.load_reg & 0b00011111) as usize;
                }
            }
            _ => match (self.control_reg >> 2) & 0b00000011 {
                0 | 1 => self.prg_bank_full32 = ((self.load_reg & 0b00001110) >> 1) as usize,
                2 => {
                    self.prg_bank_lo16 = 0;
                    self.prg_bank_hi16 = (self.load_reg & 0b00001111) as usize;
                }
                _ => {
                    self.prg_bank_lo16 = (self.load_reg & 0b00001111) as usize;
                    self.prg_bank_hi16 = self.prg_rom_banks.saturating_sub(1);
                }
            },
        }

        self.load_reg = 0x00;
        self.load_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rom(prg_banks: u8, chr_banks: u8) -> Rom {
        let mut data = vec![0x4E, 0x45, 0x53, 0x1A, prg_banks, chr_banks, 0x10, 0];
        data.resize(16, 0x00);
        data.resize(
            16 + prg_banks as usize * PRG_ROM_SIZE + chr_banks as usize * CHR_ROM_SIZE,
            0x00,
        );
        Rom::from_ines_bytes(&data).unwrap()
    }

    // One register load is five writes, least significant bit first.
    fn serial_write(mapper: &mut Mapper1, rom: &mut Rom, addr: u16, value: u8) {
        for i in 0..5 {
            mapper.set(rom, addr, (value >> i) & 1);
        }
    }

    #[test]
    fn test_serial_load_sets_control() {
        let mut rom = test_rom(2, 1);
        let mut mapper = Mapper1::new(&rom);

        serial_write(&mut mapper, &mut rom, 0x8000, 0b01110);
        assert_eq!(mapper.control_reg, 0b01110);
        assert_eq!(mapper.mirroring(), Some(Mirroring::VERTICAL));

        serial_write(&mut mapper, &mut rom, 0x8000, 0b00011);
        assert_eq!(mapper.control_reg, 0b00011);
        assert_eq!(mapper.mirroring(), Some(Mirroring::HORIZONTAL));
    }

    #[test]
    fn test_reset_bit_clears_shifter() {
        let mut rom = test_rom(2, 1);
        let mut mapper = Mapper1::new(&rom);

        mapper.set(&mut rom, 0x8000, 1);
        mapper.set(&mut rom, 0x8000, 1);
        mapper.set(&mut rom, 0x8000, 0x80);
        assert_eq!(mapper.load_count, 0);
        assert_eq!(mapper.control_reg & 0b01100, 0b01100);

        serial_write(&mut mapper, &mut rom, 0x8000, 0b00010);
        assert_eq!(mapper.control_reg, 0b00010);
    }

    #[test]
    fn test_prg_fix_last_mode() {
        let mut rom = test_rom(4, 1);
        rom.set_prg(0, 0x11);
        rom.set_prg(PRG_ROM_SIZE, 0x22);
        rom.set_prg(2 * PRG_ROM_SIZE, 0x33);
        rom.set_prg(3 * PRG_ROM_SIZE, 0x44);
        let mut mapper = Mapper1::new(&rom);

        serial_write(&mut mapper, &mut rom, 0x8000, 0b01100);
        serial_write(&mut mapper, &mut rom, 0xE000, 2);

        assert_eq!(mapper.get(&rom, 0x8000), 0x33);
        assert_eq!(mapper.get(&rom, 0xC000), 0x44);
    }

    #[test]
    fn test_prg_32k_mode() {
        let mut rom = test_rom(4, 1);
        rom.set_prg(2 * PRG_ROM_SIZE, 0x33);
        rom.set_prg(3 * PRG_ROM_SIZE, 0x44);
        let mut mapper = Mapper1::new(&rom);

        serial_write(&mut mapper, &mut rom, 0x8000, 0b00000);
        serial_write(&mut mapper, &mut rom, 0xE000, 2);

        assert_eq!(mapper.get(&rom, 0x8000), 0x33);
        assert_eq!(mapper.get(&rom, 0xC000), 0x44);
    }

    #[test]
    fn test_chr_4k_banks() {
        let mut rom = test_rom(2, 2);
        rom.set_chr(0x1000, 0xAA);
        rom.set_chr(0x2000, 0xBB);
        let mut mapper = Mapper1::new(&rom);

        serial_write(&mut mapper, &mut rom, 0x8000, 0b10000);
        serial_write(&mut mapper, &mut rom, 0xA000, 1);
        serial_write(&mut mapper, &mut rom, 0xC000, 2);

        assert_eq!(mapper.get(&rom, 0x0000), 0xAA);
        assert_eq!(mapper.get(&rom, 0x1000), 0xBB);
    }

    #[test]
    fn test_chr_8k_bank() {
        let mut rom = test_rom(2, 4);
        rom.set_chr(CHR_ROM_SIZE, 0xCC);
        let mut mapper = Mapper1::new(&rom);

        serial_write(&mut mapper, &mut rom, 0x8000, 0b00000);
        serial_write(&mut mapper, &mut rom, 0xA000, 2);

        assert_eq!(mapper.get(&rom, 0x0000), 0xCC);
    }

    #[test]
    fn test_save_ram() {
        let mut rom = test_rom(2, 1);
        let mut mapper = Mapper1::new(&rom);

        mapper.set(&mut rom, 0x6123, 0xAB);
        assert_eq!(mapper.get(&rom, 0x6123), 0xAB);
        assert_eq!(mapper.get(&rom, 0x6124), 0x00);
    }

    #[test]
    fn test_reset_restores_power_on_banks() {
        let mut rom = test_rom(4, 1);
        rom.set_prg(3 * PRG_ROM_SIZE, 0x44);
        let mut mapper = Mapper1::new(&rom);

        serial_write(&mut mapper, &mut rom, 0x8000, 0b01100);
        serial_write(&mut mapper, &mut rom, 0xE000, 2);
        mapper.reset();

        assert_eq!(mapper.control_reg, 0x1C);
        assert_eq!(mapper.get(&rom, 0xC000), 0x44);
        assert_eq!(mapper.get(&rom, 0x8000), rom.get_prg(0));
    }
}
