use super::Mapper;
use crate::rom::Rom;

/// Flat 64 KiB of RAM over the whole cartridge address space, so tests can
/// place code, vectors, and pattern data anywhere without a real image.
pub struct TestMapper {
    mem: [u8; 0x10000],
}

impl TestMapper {
    pub fn new() -> Self {
        Self { mem: [0; 0x10000] }
    }
}

impl Mapper for TestMapper {
    fn get(&mut self, _rom: &Rom, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    fn set(&mut self, _rom: &mut Rom, addr: u16, byte: u8) {
        self.mem[addr as usize] = byte;
    }
}
