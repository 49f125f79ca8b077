/// One displayed pixel as (red, green, blue).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colour(pub u8, pub u8, pub u8);

/// The 64-entry system palette. Palette RAM bytes index into this table.
pub const DISPLAY_PALETTE: [Colour; 64] = [
    Colour(0x7C, 0x7C, 0x7C), Colour(0x00, 0x00, 0xFC), Colour(0x00, 0x00, 0xBC), Colour(0x44, 0x28, 0xBC),
    Colour(0x94, 0x00, 0x84), Colour(0xA8, 0x00, 0x20), Colour(0xA8, 0x10, 0x00), Colour(0x88, 0x14, 0x00),
    Colour(0x50, 0x30, 0x00), Colour(0x00, 0x78, 0x00), Colour(0x00, 0x68, 0x00), Colour(0x00, 0x58, 0x00),
    Colour(0x00, 0x40, 0x58), Colour(0x00, 0x00, 0x00), Colour(0x00, 0x00, 0x00), Colour(0x00, 0x00, 0x00),
    Colour(0xBC, 0xBC, 0xBC), Colour(0x00, 0x78, 0xF8), Colour(0x00, 0x58, 0xF8), Colour(0x68, 0x44, 0xFC),
    Colour(0xD8, 0x00, 0xCC), Colour(0xE4, 0x00, 0x58), Colour(0xF8, 0x38, 0x00), Colour(0xE4, 0x5C, 0x10),
    Colour(0xAC, 0x7C, 0x00), Colour(0x00, 0xB8, 0x00), Colour(0x00, 0xA8, 0x00), Colour(0x00, 0xA8, 0x44),
    Colour(0x00, 0x88, 0x88), Colour(0x00, 0x00, 0x00), Colour(0x00, 0x00, 0x00), Colour(0x00, 0x00, 0x00),
    Colour(0xF8, 0xF8, 0xF8), Colour(0x3C, 0xBC, 0xFC), Colour(0x68, 0x88, 0xFC), Colour(0x98, 0x78, 0xF8),
    Colour(0xF8, 0x78, 0xF8), Colour(0xF8, 0x58, 0x98), Colour(0xF8, 0x78, 0x58), Colour(0xFC, 0xA0, 0x44),
    Colour(0xF8, 0xB8, 0x00), Colour(0xB8, 0xF8, 0x18), Colour(0x58, 0xD8, 0x54), Colour(0x58, 0xF8, 0x98),
    Colour(0x00, 0xE8, 0xD8), Colour(0x78, 0x78, 0x78), Colour(0x00, 0x00, 0x00), Colour(0x00, 0x00, 0x00),
    Colour(0xFC, 0xFC, 0xFC), Colour(0xA4, 0xE4, 0xFC), Colour(0xB8, 0xB8, 0xF8), Colour(0xD8, 0xB8, 0xF8),
    Colour(0xF8, 0xB8, 0xF8), Colour(0xF8, 0xA4, 0xC0), Colour(0xF0, 0xD0, 0xB0), Colour(0xFC, 0xE0, 0xA8),
    Colour(0xF8, 0xD8, 0x78), Colour(0xD8, 0xF8, 0x78), Colour(0xB8, 0xF8, 0xB8), Colour(0xB8, 0xF8, 0xD8),
    Colour(0x00, 0xFC, 0xFC), Colour(0xF8, 0xD8, 0xF8), Colour(0x00, 0x00, 0x00), Colour(0x00, 0x00, 0x00),
];
