bitflags! {
    #[derive(Clone, Copy)]
    pub struct PpuCtrl: u8 {
        const NAME_TABLE1    = 0b00000001;
        const NAME_TABLE2    = 0b00000010;
        const VRAM_ADDR_INC  = 0b00000100;
        const SPR_TABLE_ADDR = 0b00001000;
        const BG_TABLE_ADDR  = 0b00010000;
        const SPR_SIZE       = 0b00100000;
        const MASTER_SLAVE   = 0b01000000;
        const NMI_ENABLED    = 0b10000000;
    }
}

impl PpuCtrl {
    #[inline]
    pub fn name_table_select(&self) -> u16 {
        (self.bits() & 0b11) as u16
    }

    #[inline]
    pub fn vram_addr_increment(&self) -> u16 {
        if self.contains(PpuCtrl::VRAM_ADDR_INC) {
            32
        } else {
            1
        }
    }

    #[inline]
    pub fn spr_pattern_table_addr(&self) -> u16 {
        if self.contains(PpuCtrl::SPR_TABLE_ADDR) {
            0x1000
        } else {
            0x0000
        }
    }

    #[inline]
    pub fn bg_pattern_table_addr(&self) -> u16 {
        if self.contains(PpuCtrl::BG_TABLE_ADDR) {
            0x1000
        } else {
            0x0000
        }
    }

    #[inline]
    pub fn nmi_enabled(&self) -> bool {
        self.contains(PpuCtrl::NMI_ENABLED)
    }
}

bitflags! {
    #[derive(Clone, Copy)]
    pub struct PpuMask: u8 {
        const GREYSCALE    = 0b00000001;
        const LEFTMOST_BG  = 0b00000010;
        const LEFTMOST_SPR = 0b00000100;
        const SHOW_BG      = 0b00001000;
        const SHOW_SPR     = 0b00010000;
        const EMPH_RED     = 0b00100000;
        const EMPH_GREEN   = 0b01000000;
        const EMPH_BLUE    = 0b10000000;
    }
}

// Rendering does not consult the mask yet; the register is storage so games
// can read back what they wrote.
#[allow(dead_code)]
impl PpuMask {
    #[inline]
    pub fn show_background(&self) -> bool {
        self.contains(PpuMask::SHOW_BG)
    }

    #[inline]
    pub fn show_sprites(&self) -> bool {
        self.contains(PpuMask::SHOW_SPR)
    }
}

bitflags! {
    #[derive(Clone, Copy)]
    pub struct PpuStatus: u8 {
        const SPR_OVERFLOW = 0b00100000;
        const SPR_0_HIT    = 0b01000000;
        const IN_VBLANK    = 0b10000000;
    }
}
