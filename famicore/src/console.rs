use crate::bus::SystemBus;
use crate::cartridge::CartridgeNes;
use crate::cpu::{Cpu6502, Interrupt};
use crate::ppu::{Ppu2C02, Screen};
use crate::SystemControl;

const PPU_DOTS_PER_CPU_TICK: u32 = 3;

/// Owns the whole machine and keeps the fixed 1:3 instruction-to-dot
/// ratio. Pacing against wall time is the frame loop's business, so no
/// sleeping happens here.
pub struct Console {
    cpu: Cpu6502,
    ppu: Ppu2C02,
    bus: SystemBus,
}

impl Console {
    pub fn new(cartridge: CartridgeNes) -> Self {
        Console {
            cpu: Cpu6502::new(),
            ppu: Ppu2C02::new(),
            bus: SystemBus::new(cartridge),
        }
    }

    pub fn power_on(&mut self) {
        self.bus.reset();
        self.ppu.reset();
        self.cpu.power_on(&mut self.bus);
    }

    pub fn reset(&mut self) {
        self.bus.reset();
        self.ppu.reset();
        self.cpu.reset(&mut self.bus);
    }

    /// Runs one CPU instruction, then three PPU dots, then forwards any
    /// NMI the pixel pipeline raised. Returns the CPU cycles consumed.
    pub fn tick(&mut self, screen: &mut dyn Screen) -> u32 {
        let cycles = self.cpu.tick(&mut self.bus);

        for _ in 0..PPU_DOTS_PER_CPU_TICK {
            self.ppu.clock(&mut self.bus, screen);
        }

        if self.ppu.nmi_requested() {
            self.cpu.trigger_interrupt(Interrupt::NMI);
        }

        cycles
    }

    /// Ticks until the pixel pipeline finishes its current frame.
    pub fn run_frame(&mut self, screen: &mut dyn Screen) {
        loop {
            self.tick(screen);

            if self.ppu.frame_completed() {
                break;
            }
        }
    }
}
