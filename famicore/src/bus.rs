use crate::apu::Apu2A03;
use crate::cartridge::CartridgeNes;
use crate::dma;
use crate::ppu::PpuBus;
use crate::SystemControl;

const CPU_RAM_SIZE: usize = 0x800;

const CPU_RAM_START: u16 = 0x0000;
const CPU_RAM_END: u16 = 0x1FFF;
const PPU_REG_START: u16 = 0x2000;
const PPU_REG_END: u16 = 0x2007;
const APU_REG_START: u16 = 0x4000;
const APU_REG_END: u16 = 0x4013;
const DMA_REG_ADDR: u16 = 0x4014;
const APU_STATUS_REG: u16 = 0x4015;
const JOYPAD1_REG: u16 = 0x4016;
const APU_FRAME_COUNTER_REG: u16 = 0x4017;

/// CPU-side address decode. Every 16-bit address routes somewhere; there are
/// no faults.
pub struct SystemBus {
    pub cartridge: CartridgeNes,
    pub ppu_bus: PpuBus,
    pub apu: Apu2A03,
    cpu_ram: [u8; CPU_RAM_SIZE],
}

impl SystemBus {
    pub fn new(cartridge: CartridgeNes) -> Self {
        Self {
            cartridge,
            ppu_bus: PpuBus::new(),
            apu: Apu2A03::new(),
            cpu_ram: [0; CPU_RAM_SIZE],
        }
    }

    pub fn get(&mut self, addr: u16) -> u8 {
        match addr {
            CPU_RAM_START..=CPU_RAM_END => self.cpu_ram[addr as usize % CPU_RAM_SIZE],
            PPU_REG_START..=PPU_REG_END => self.ppu_bus.cpu_read_reg(addr, &mut self.cartridge),
            APU_REG_START..=APU_REG_END => 0,
            DMA_REG_ADDR => 0,
            APU_STATUS_REG => self.apu.status,
            JOYPAD1_REG => 0,
            APU_FRAME_COUNTER_REG => self.apu.frame_counter,
            _ => self.cartridge.get(addr),
        }
    }

    pub fn set(&mut self, addr: u16, byte: u8) {
        match addr {
            CPU_RAM_START..=CPU_RAM_END => self.cpu_ram[addr as usize % CPU_RAM_SIZE] = byte,
            PPU_REG_START..=PPU_REG_END => {
                self.ppu_bus.cpu_write_reg(addr, byte, &mut self.cartridge)
            }
            APU_REG_START..=APU_REG_END => self.apu.write_register(addr, byte),
            DMA_REG_ADDR => dma::transfer(self, (byte as u16) << 8),
            APU_STATUS_REG => self.apu.status = byte,
            JOYPAD1_REG => {}
            APU_FRAME_COUNTER_REG => self.apu.frame_counter = byte,
            _ => self.cartridge.set(addr, byte),
        }
    }

    /// PPU-side access, for the renderer and for seeding pattern/nametable
    /// data from outside.
    pub fn ppu_get(&mut self, addr: u16) -> u8 {
        self.ppu_bus.ppu_read(addr, &mut self.cartridge)
    }

    pub fn ppu_set(&mut self, addr: u16, byte: u8) {
        self.ppu_bus.ppu_write(addr, byte, &mut self.cartridge)
    }
}

impl SystemControl for SystemBus {
    fn reset(&mut self) {
        self.cartridge.reset();
        self.ppu_bus.reset();
        self.apu.reset();
    }
}

#[cfg(test)]
impl SystemBus {
    pub fn test_new() -> Self {
        SystemBus::new(CartridgeNes::test_new())
    }

    // Lay a byte slice down from a start address, through the normal decode.
    pub fn load_ram(&mut self, start: u16, data: &[u8]) {
        for (i, byte) in data.iter().enumerate() {
            self.set(start.wrapping_add(i as u16), *byte);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ram_is_mirrored_four_times() {
        let mut bus = SystemBus::test_new();

        bus.set(0x0000, 0xAB);
        assert_eq!(bus.get(0x0800), 0xAB);
        assert_eq!(bus.get(0x1000), 0xAB);
        assert_eq!(bus.get(0x1800), 0xAB);

        bus.set(0x1FFF, 0xCD);
        assert_eq!(bus.get(0x07FF), 0xCD);
    }

    #[test]
    fn test_apu_registers_store_writes() {
        let mut bus = SystemBus::test_new();

        bus.set(0x4002, 0x5F);
        assert_eq!(bus.apu.pulse[2], 0x5F);
        assert_eq!(bus.get(0x4002), 0);

        bus.set(0x4015, 0x1F);
        assert_eq!(bus.get(0x4015), 0x1F);
        bus.set(0x4017, 0x40);
        assert_eq!(bus.get(0x4017), 0x40);
    }

    #[test]
    fn test_joypad_stub_reads_zero() {
        let mut bus = SystemBus::test_new();

        bus.set(0x4016, 0xFF);
        assert_eq!(bus.get(0x4016), 0);
    }

    #[test]
    fn test_unmapped_space_routes_to_cartridge() {
        let mut bus = SystemBus::test_new();

        bus.set(0x5000, 0x11);
        bus.set(0x8000, 0x22);
        assert_eq!(bus.get(0x5000), 0x11);
        assert_eq!(bus.get(0x8000), 0x22);

        // 0x2008-0x3FFF is not a PPU register mirror here.
        bus.set(0x2108, 0x33);
        assert_eq!(bus.get(0x2108), 0x33);
    }
}
