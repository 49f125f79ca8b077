use crate::SystemControl;

const PULSE_REG_SIZE: usize = 8;
const TRIANGLE_REG_SIZE: usize = 4;
const NOISE_REG_SIZE: usize = 4;
const DMC_REG_SIZE: usize = 4;

/// Register storage for the 2A03 audio hardware. Games poke these freely, so
/// the banks accept and hold writes; no synthesis happens.
pub struct Apu2A03 {
    pub pulse: [u8; PULSE_REG_SIZE],
    pub triangle: [u8; TRIANGLE_REG_SIZE],
    pub noise: [u8; NOISE_REG_SIZE],
    pub dmc: [u8; DMC_REG_SIZE],
    pub status: u8,
    pub frame_counter: u8,
}

impl Apu2A03 {
    pub fn new() -> Self {
        Self {
            pulse: [0; PULSE_REG_SIZE],
            triangle: [0; TRIANGLE_REG_SIZE],
            noise: [0; NOISE_REG_SIZE],
            dmc: [0; DMC_REG_SIZE],
            status: 0,
            frame_counter: 0,
        }
    }

    pub fn write_register(&mut self, addr: u16, byte: u8) {
        match addr {
            0x4000..=0x4007 => self.pulse[(addr - 0x4000) as usize] = byte,
            0x4008..=0x400B => self.triangle[(addr - 0x4008) as usize] = byte,
            0x400C..=0x400F => self.noise[(addr - 0x400C) as usize] = byte,
            0x4010..=0x4013 => self.dmc[(addr - 0x4010) as usize] = byte,
            _ => {}
        }
    }
}

impl SystemControl for Apu2A03 {
    fn reset(&mut self) {
        self.pulse = [0; PULSE_REG_SIZE];
        self.triangle = [0; TRIANGLE_REG_SIZE];
        self.noise = [0; NOISE_REG_SIZE];
        self.dmc = [0; DMC_REG_SIZE];
        self.status = 0;
        self.frame_counter = 0;
    }
}
