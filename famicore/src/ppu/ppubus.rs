use super::registers::{PpuCtrl, PpuMask, PpuStatus};
use crate::cartridge::CartridgeNes;
use crate::SystemControl;

pub const OAM_SIZE: usize = 0x100;

// Nametable space folds into a single stretch of VRAM; mirroring beyond this
// fold is not modeled.
const VRAM_SIZE: usize = 0xF00;
const PALETTE_TABLE_SIZE: usize = 0x20;

const PATTERN_TABLE_END: u16 = 0x1FFF;
pub const NAME_TABLE_START: u16 = 0x2000;
const NAME_TABLE_MIRROR_END: u16 = 0x3EFF;
pub const PALETTE_TABLE_START: u16 = 0x3F00;
const PALETTE_TABLE_END: u16 = 0x3FFF;

/// PPU-side memories and the CPU-visible register file, including the shared
/// scroll/address write latch.
pub struct PpuBus {
    pub ctrl: PpuCtrl,
    pub mask: PpuMask,
    pub status: PpuStatus,

    vram: [u8; VRAM_SIZE],
    palette_table: [u8; PALETTE_TABLE_SIZE],
    oam: [u8; OAM_SIZE],

    oam_addr_reg: u8,
    vram_addr: u16,
    addr_latch: [u8; 2],
    addr_latch_toggle: bool,
}

impl PpuBus {
    pub fn new() -> Self {
        Self {
            ctrl: PpuCtrl::empty(),
            mask: PpuMask::empty(),
            status: PpuStatus::empty(),

            vram: [0; VRAM_SIZE],
            palette_table: [0; PALETTE_TABLE_SIZE],
            oam: [0; OAM_SIZE],

            oam_addr_reg: 0,
            vram_addr: 0,
            addr_latch: [0; 2],
            addr_latch_toggle: false,
        }
    }

    /// CPU-visible register reads, 0x2000 to 0x2007. Write-only registers
    /// read back 0.
    pub fn cpu_read_reg(&mut self, addr: u16, cartridge: &mut CartridgeNes) -> u8 {
        match addr & 0x0007 {
            0x0000 => self.ctrl.bits(),
            0x0001 => self.mask.bits(),
            0x0002 => {
                let byte = self.status.bits();
                self.status.remove(PpuStatus::IN_VBLANK);
                self.addr_latch_toggle = false;
                byte
            }
            0x0004 => self.oam[self.oam_addr_reg as usize],
            0x0007 => {
                let byte = self.ppu_read(self.vram_addr, cartridge);
                self.vram_addr = self.vram_addr.wrapping_add(self.ctrl.vram_addr_increment());
                byte
            }
            _ => 0,
        }
    }

    pub fn cpu_write_reg(&mut self, addr: u16, byte: u8, cartridge: &mut CartridgeNes) {
        match addr & 0x0007 {
            0x0000 => self.ctrl = PpuCtrl::from_bits_truncate(byte),
            0x0001 => self.mask = PpuMask::from_bits_truncate(byte),
            0x0003 => self.oam_addr_reg = byte,
            0x0004 => {
                self.oam[self.oam_addr_reg as usize] = byte;
                self.oam_addr_reg = self.oam_addr_reg.wrapping_add(1);
            }
            0x0005 => {
                self.addr_latch[self.addr_latch_toggle as usize] = byte;
                self.addr_latch_toggle = !self.addr_latch_toggle;
            }
            0x0006 => {
                self.addr_latch[self.addr_latch_toggle as usize] = byte;
                self.addr_latch_toggle = !self.addr_latch_toggle;

                // Second write completes the address, high byte first.
                if !self.addr_latch_toggle {
                    self.vram_addr =
                        ((self.addr_latch[0] as u16) << 8) | self.addr_latch[1] as u16;
                }
            }
            0x0007 => {
                self.ppu_write(self.vram_addr, byte, cartridge);
                self.vram_addr = self.vram_addr.wrapping_add(self.ctrl.vram_addr_increment());
            }
            _ => {}
        }
    }

    /// PPU-side address space: pattern tables on the cartridge, then VRAM,
    /// then palette RAM.
    pub fn ppu_read(&self, addr: u16, cartridge: &mut CartridgeNes) -> u8 {
        match addr {
            0x0000..=PATTERN_TABLE_END => cartridge.get(addr),
            NAME_TABLE_START..=NAME_TABLE_MIRROR_END => {
                self.vram[(addr - NAME_TABLE_START) as usize % VRAM_SIZE]
            }
            PALETTE_TABLE_START..=PALETTE_TABLE_END => {
                self.palette_table[(addr - PALETTE_TABLE_START) as usize % PALETTE_TABLE_SIZE]
            }
            _ => cartridge.get(addr),
        }
    }

    pub fn ppu_write(&mut self, addr: u16, byte: u8, cartridge: &mut CartridgeNes) {
        match addr {
            0x0000..=PATTERN_TABLE_END => cartridge.set(addr, byte),
            NAME_TABLE_START..=NAME_TABLE_MIRROR_END => {
                self.vram[(addr - NAME_TABLE_START) as usize % VRAM_SIZE] = byte;
            }
            PALETTE_TABLE_START..=PALETTE_TABLE_END => {
                self.palette_table[(addr - PALETTE_TABLE_START) as usize % PALETTE_TABLE_SIZE] =
                    byte;
            }
            _ => cartridge.set(addr, byte),
        }
    }

    pub fn read_oam(&self, index: usize) -> u8 {
        self.oam[index % OAM_SIZE]
    }

    pub fn write_oam(&mut self, index: usize, byte: u8) {
        self.oam[index % OAM_SIZE] = byte;
    }
}

impl SystemControl for PpuBus {
    fn reset(&mut self) {
        self.ctrl = PpuCtrl::empty();
        self.mask = PpuMask::empty();
        self.status = PpuStatus::empty();

        self.vram = [0; VRAM_SIZE];
        self.palette_table = [0; PALETTE_TABLE_SIZE];
        self.oam = [0; OAM_SIZE];

        self.oam_addr_reg = 0;
        self.vram_addr = 0;
        self.addr_latch = [0; 2];
        self.addr_latch_toggle = false;
    }
}
