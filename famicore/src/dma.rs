use crate::bus::SystemBus;

const OAM_SIZE: usize = 0x100;

/// Copy one 256-byte page from CPU address space into OAM, lowest address
/// first. Each byte is fetched through the bus so reads keep their side
/// effects (mirrored RAM, PPU data port).
pub fn transfer(bus: &mut SystemBus, source: u16) {
    for i in 0..OAM_SIZE {
        let byte = bus.get(source + i as u16);
        bus.ppu_bus.write_oam(i, byte);
    }
}
