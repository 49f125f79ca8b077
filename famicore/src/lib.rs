#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate bitflags;

mod cpu;
mod bus;
mod cartridge;
mod rom;
mod ppu;
mod mapper;
mod apu;
mod dma;
mod console;

pub use apu::Apu2A03;
pub use bus::SystemBus;
pub use cartridge::CartridgeNes;
pub use console::Console;
pub use cpu::Cpu6502;
pub use ppu::{Colour, FrameBuffer, Ppu2C02, Screen, DISPLAY_PALETTE};
pub use rom::{Mirroring, Rom};

pub const DISPLAY_WIDTH: usize = 256;
pub const DISPLAY_HEIGHT: usize = 240;

pub trait SystemControl {
    fn reset(&mut self);
}
