mod palette;
mod ppubus;
mod registers;
mod screen;

pub use self::palette::{Colour, DISPLAY_PALETTE};
pub use self::ppubus::PpuBus;
pub use self::screen::{FrameBuffer, Screen};

use self::ppubus::{NAME_TABLE_START, PALETTE_TABLE_START};
use self::registers::PpuStatus;
use crate::bus::SystemBus;
use crate::SystemControl;

const VISIBLE_DOTS: usize = 256;
const VISIBLE_SCANLINES: usize = 240;
const DOT_HBLANK_END: usize = 340;
const VBLANK_START_SCANLINE: usize = 241;
const FRAME_END_SCANLINE: usize = 261;

const TILE_SIZE: usize = 8;
const TILE_BYTES: u16 = 16;
const NAME_TABLE_SIZE: u16 = 0x400;
const ATTR_TABLE_OFFSET: u16 = 0x3C0;
const SPR_PALETTE_START: u16 = 0x3F10;

const SPRITE_COUNT: usize = 64;
const OAM_ENTRY_BYTES: usize = 4;

/// Tile-at-a-time renderer. One `clock` call is one dot; background tiles
/// are fetched whole when the dot lands on a tile corner, and a sprite is
/// drawn whole on the dot that equals its OAM position.
pub struct Ppu2C02 {
    dot: usize,
    scanline: usize,
    nmi_request: bool,
    frame_complete: bool,
}

impl Ppu2C02 {
    pub fn new() -> Self {
        Self {
            dot: 0,
            scanline: 0,
            nmi_request: false,
            frame_complete: false,
        }
    }

    pub fn clock(&mut self, bus: &mut SystemBus, screen: &mut dyn Screen) {
        if self.scanline < VISIBLE_SCANLINES && self.dot < VISIBLE_DOTS {
            if self.dot % TILE_SIZE == 0 && self.scanline % TILE_SIZE == 0 {
                self.draw_background_tile(bus, screen);
            }
            self.draw_matching_sprites(bus, screen);
        }

        self.dot += 1;
        if self.dot > DOT_HBLANK_END {
            self.dot = 0;
            self.scanline += 1;

            if self.scanline == VBLANK_START_SCANLINE {
                bus.ppu_bus.status.insert(PpuStatus::IN_VBLANK);
                if bus.ppu_bus.ctrl.nmi_enabled() {
                    self.nmi_request = true;
                }
            }

            if self.scanline > FRAME_END_SCANLINE {
                bus.ppu_bus.status.remove(PpuStatus::IN_VBLANK);
                bus.ppu_bus.status.remove(PpuStatus::SPR_0_HIT);
                self.scanline = 0;
                screen.draw_frame();
                self.frame_complete = true;
            }
        }
    }

    /// True once per latched NMI; reading consumes the request.
    pub fn nmi_requested(&mut self) -> bool {
        let nmi_request = self.nmi_request;
        self.nmi_request = false;
        nmi_request
    }

    /// True once per finished frame; reading consumes the flag.
    pub fn frame_completed(&mut self) -> bool {
        let frame_complete = self.frame_complete;
        self.frame_complete = false;
        frame_complete
    }

    fn draw_background_tile(&mut self, bus: &mut SystemBus, screen: &mut dyn Screen) {
        let tile_col = self.dot / TILE_SIZE;
        let tile_row = self.scanline / TILE_SIZE;

        let name_table_base =
            NAME_TABLE_START + bus.ppu_bus.ctrl.name_table_select() * NAME_TABLE_SIZE;
        let tile_id = bus.ppu_get(name_table_base + (tile_row * 32 + tile_col) as u16) as u16;

        let attr_addr =
            name_table_base + ATTR_TABLE_OFFSET + ((tile_row / 2) * 16 + tile_col / 2) as u16;
        let attr = bus.ppu_get(attr_addr);
        let shift = ((tile_row % 2) * 2 + tile_col % 2) * 2;
        let palette_select = ((attr >> shift) & 0b11) as u16;

        let pattern_addr = bus.ppu_bus.ctrl.bg_pattern_table_addr() + tile_id * TILE_BYTES;

        for row in 0..TILE_SIZE {
            let plane_lo = bus.ppu_get(pattern_addr + row as u16);
            let plane_hi = bus.ppu_get(pattern_addr + row as u16 + 8);

            for col in 0..TILE_SIZE {
                let pixel = (((plane_hi >> (7 - col)) & 1) << 1) | ((plane_lo >> (7 - col)) & 1);
                let colour = self.resolve_colour(bus, PALETTE_TABLE_START, palette_select, pixel);
                screen.place_pixel(self.dot + col, self.scanline + row, colour);
            }
        }
    }

    fn draw_matching_sprites(&mut self, bus: &mut SystemBus, screen: &mut dyn Screen) {
        for entry in 0..SPRITE_COUNT {
            let sprite_y = bus.ppu_bus.read_oam(entry * OAM_ENTRY_BYTES) as usize;
            let sprite_x = bus.ppu_bus.read_oam(entry * OAM_ENTRY_BYTES + 3) as usize;
            if sprite_x != self.dot || sprite_y != self.scanline {
                continue;
            }

            let tile_id = bus.ppu_bus.read_oam(entry * OAM_ENTRY_BYTES + 1) as u16;
            let attr = bus.ppu_bus.read_oam(entry * OAM_ENTRY_BYTES + 2);
            let palette_select = (attr & 0b11) as u16;
            let pattern_addr = bus.ppu_bus.ctrl.spr_pattern_table_addr() + tile_id * TILE_BYTES;

            for row in 0..TILE_SIZE {
                let plane_lo = bus.ppu_get(pattern_addr + row as u16);
                let plane_hi = bus.ppu_get(pattern_addr + row as u16 + 8);

                for col in 0..TILE_SIZE {
                    let pixel =
                        (((plane_hi >> (7 - col)) & 1) << 1) | ((plane_lo >> (7 - col)) & 1);
                    if pixel == 0 {
                        continue;
                    }

                    let colour =
                        self.resolve_colour(bus, SPR_PALETTE_START, palette_select, pixel);
                    screen.place_pixel(sprite_x + col, sprite_y + row, colour);
                }
            }
        }
    }

    fn resolve_colour(
        &mut self,
        bus: &mut SystemBus,
        palette_base: u16,
        palette_select: u16,
        pixel: u8,
    ) -> Colour {
        let index = bus.ppu_get(palette_base + palette_select * 4 + pixel as u16);
        DISPLAY_PALETTE[(index & 0x3F) as usize]
    }
}

impl SystemControl for Ppu2C02 {
    fn reset(&mut self) {
        self.dot = 0;
        self.scanline = 0;
        self.nmi_request = false;
        self.frame_complete = false;
    }
}
