//! Indexed color palette
//!
//! Widgets refer to colors by a 4-bit index into a fixed 16-entry palette,
//! the same scheme used by small handheld consoles. The palette is resolved
//! to RGB565 only at draw time.
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

/// Index into [`PALETTE`].
pub type ColorIndex = u8;

/// Index 0 is treated as "transparent" by drawing helpers.
pub const TRANSPARENT: ColorIndex = 0;
pub const WHITE: ColorIndex = 1;
pub const RED: ColorIndex = 2;
pub const PINK: ColorIndex = 3;
pub const ORANGE: ColorIndex = 4;
pub const YELLOW: ColorIndex = 5;
pub const TEAL: ColorIndex = 6;
pub const GREEN: ColorIndex = 7;
pub const BLUE: ColorIndex = 8;
pub const LIGHT_BLUE: ColorIndex = 9;
pub const PURPLE: ColorIndex = 10;
pub const LIGHT_PURPLE: ColorIndex = 11;
pub const DARK_PURPLE: ColorIndex = 12;
pub const TAN: ColorIndex = 13;
pub const BROWN: ColorIndex = 14;
pub const BLACK: ColorIndex = 15;

const fn rgb(r: u8, g: u8, b: u8) -> Rgb565 {
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

/// The 16-entry palette.
pub const PALETTE: [Rgb565; 16] = [
    rgb(0, 0, 0),
    rgb(255, 255, 255),
    rgb(255, 33, 33),
    rgb(255, 147, 196),
    rgb(255, 129, 53),
    rgb(255, 246, 9),
    rgb(36, 156, 163),
    rgb(120, 220, 82),
    rgb(0, 63, 173),
    rgb(135, 242, 255),
    rgb(142, 46, 196),
    rgb(164, 131, 159),
    rgb(92, 64, 108),
    rgb(229, 205, 196),
    rgb(145, 70, 61),
    rgb(0, 0, 0),
];

/// Resolve a palette index. Only the low four bits are used.
pub const fn indexed(index: ColorIndex) -> Rgb565 {
    PALETTE[(index & 0x0f) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_wraps_to_low_bits() {
        assert_eq!(indexed(WHITE), indexed(WHITE + 16));
        assert_eq!(indexed(WHITE), Rgb565::new(31, 63, 31));
    }
}
