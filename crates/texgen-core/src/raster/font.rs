//! 8x8 ASCII bitmap font (public domain glyphs from opengameart.org).
//!
//! Each glyph is a `u64`; the most significant byte is the top row and the most
//! significant bit of each byte is the leftmost column.

use image::{Rgba, RgbaImage};

use super::fill_rect;

pub const GLYPH_SIZE: u32 = 8;

const DIGITS: [u64; 10] = [
    0x1824_4242_2418_0000,
    0x0818_0808_081C_0000,
    0x3C42_0418_207E_0000,
    0x3C42_0418_423C_0000,
    0x0818_2848_7C08_0000,
    0x7E40_7C02_423C_0000,
    0x3C40_7C42_423C_0000,
    0x7E04_0810_2040_0000,
    0x3C42_3C42_423C_0000,
    0x3C42_423E_023C_0000,
];

const UPPER: [u64; 26] = [
    0x1818_243C_4242_0000,
    0x7844_7844_4478_0000,
    0x3844_8080_4438_0000,
    0x7844_4444_4478_0000,
    0x7C40_7840_407C_0000,
    0x7C40_7840_4040_0000,
    0x3844_809C_4438_0000,
    0x4242_7E42_4242_0000,
    0x3E08_0808_083E_0000,
    0x1C04_0404_4438_0000,
    0x4448_5070_4844_0000,
    0x4040_4040_407E_0000,
    0x4163_5549_4141_0000,
    0x4262_524A_4642_0000,
    0x1C22_2222_221C_0000,
    0x7844_7840_4040_0000,
    0x1C22_2222_221C_0200,
    0x7844_7850_4844_0000,
    0x1C22_100C_221C_0000,
    0x7F08_0808_0808_0000,
    0x4242_4242_423C_0000,
    0x8142_4224_2418_0000,
    0x4141_4955_6341_0000,
    0x4224_1818_2442_0000,
    0x4122_1408_0808_0000,
    0x7E04_0810_207E_0000,
];

const LOWER: [u64; 26] = [
    0x003C_023E_463A_0000,
    0x4040_7C42_625C_0000,
    0x0000_1C20_201C_0000,
    0x0202_3E42_463A_0000,
    0x003C_427E_403C_0000,
    0x0018_1038_1010_0000,
    0x0000_344C_4434_0438,
    0x2020_3824_2424_0000,
    0x0800_0808_0808_0000,
    0x0800_1808_0808_0870,
    0x2020_2428_302C_0000,
    0x1010_1010_1018_0000,
    0x0000_665A_4242_0000,
    0x0000_2E32_2222_0000,
    0x0000_3C42_423C_0000,
    0x0000_5C62_427C_4040,
    0x0000_3A46_423E_0202,
    0x0000_2C32_2020_0000,
    0x001C_2018_0438_0000,
    0x0010_3C10_1018_0000,
    0x0000_2222_261A_0000,
    0x0000_4242_2418_0000,
    0x0000_8181_5A66_0000,
    0x0000_4224_1866_0000,
    0x0000_4222_1408_1060,
    0x0000_3C08_103C_0000,
];

const EXCLAMATION: u64 = 0x0808_0808_0008_0000;
const UNKNOWN: u64 = 0x0000_542A_542A_542A;

/// Bitmap for `ch`; unsupported characters map to a hatched box.
pub fn glyph(ch: char) -> u64 {
    match ch {
        ' ' => 0,
        '!' => EXCLAMATION,
        '0'..='9' => DIGITS[ch as usize - '0' as usize],
        'A'..='Z' => UPPER[ch as usize - 'A' as usize],
        'a'..='z' => LOWER[ch as usize - 'a' as usize],
        _ => UNKNOWN,
    }
}

fn lit(bits: u64, row: u32, col: u32) -> bool {
    (bits >> (63 - (row * GLYPH_SIZE + col))) & 1 == 1
}

/// Draws `text` with its top-left corner at `origin`, each font pixel `scale` pixels wide.
/// Clipped to the image.
pub fn draw_text(image: &mut RgbaImage, origin: (i64, i64), text: &str, color: Rgba<u8>, scale: u32) {
    let advance = i64::from(GLYPH_SIZE * scale);
    let mut x = origin.0;

    for ch in text.chars() {
        let bits = glyph(ch);
        for row in 0..GLYPH_SIZE {
            for col in 0..GLYPH_SIZE {
                if lit(bits, row, col) {
                    let px = x + i64::from(col * scale);
                    let py = origin.1 + i64::from(row * scale);
                    fill_rect(image, (px, py), (scale, scale), color);
                }
            }
        }
        x += advance;
    }
}

/// Pixel width of `text` at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let count = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
    count.saturating_mul(GLYPH_SIZE * scale)
}
