use crate::ppu::{FrameBuffer, WriteBuffer};

/* the 2C02's 64 output colours as RGBA; the last two columns of each row are black */
const HUES: [[u8; 4]; 64] = [
    /* 0x00 */
    [84, 84, 84, 0xff],
    [0, 30, 116, 0xff],
    [8, 16, 144, 0xff],
    [48, 0, 136, 0xff],
    [68, 0, 100, 0xff],
    [92, 0, 48, 0xff],
    [84, 4, 0, 0xff],
    [60, 24, 0, 0xff],
    [32, 42, 0, 0xff],
    [8, 58, 0, 0xff],
    [0, 64, 0, 0xff],
    [0, 60, 0, 0xff],
    [0, 50, 60, 0xff],
    [0, 0, 0, 0xff],
    [0, 0, 0, 0xff],
    [0, 0, 0, 0xff],
    /* 0x10 */
    [152, 150, 152, 0xff],
    [8, 76, 196, 0xff],
    [48, 50, 236, 0xff],
    [92, 30, 228, 0xff],
    [136, 20, 176, 0xff],
    [160, 20, 100, 0xff],
    [152, 34, 32, 0xff],
    [120, 60, 0, 0xff],
    [84, 90, 0, 0xff],
    [40, 114, 0, 0xff],
    [8, 124, 0, 0xff],
    [0, 118, 40, 0xff],
    [0, 102, 120, 0xff],
    [0, 0, 0, 0xff],
    [0, 0, 0, 0xff],
    [0, 0, 0, 0xff],
    /* 0x20 */
    [236, 238, 236, 0xff],
    [76, 154, 236, 0xff],
    [120, 124, 236, 0xff],
    [176, 98, 236, 0xff],
    [228, 84, 236, 0xff],
    [236, 88, 180, 0xff],
    [236, 106, 100, 0xff],
    [212, 136, 32, 0xff],
    [160, 170, 0, 0xff],
    [116, 196, 0, 0xff],
    [76, 208, 32, 0xff],
    [56, 204, 108, 0xff],
    [56, 180, 204, 0xff],
    [60, 60, 60, 0xff],
    [0, 0, 0, 0xff],
    [0, 0, 0, 0xff],
    /* 0x30 */
    [236, 238, 236, 0xff],
    [168, 204, 236, 0xff],
    [188, 188, 236, 0xff],
    [212, 178, 236, 0xff],
    [236, 174, 236, 0xff],
    [236, 174, 212, 0xff],
    [236, 180, 176, 0xff],
    [228, 196, 144, 0xff],
    [204, 210, 120, 0xff],
    [180, 222, 120, 0xff],
    [168, 226, 144, 0xff],
    [152, 226, 180, 0xff],
    [160, 214, 228, 0xff],
    [160, 162, 160, 0xff],
    [0, 0, 0, 0xff],
    [0, 0, 0, 0xff],
];

pub struct Palette;

impl Palette {
    /* high order bits of the hue are ignored */
    pub fn hue_lookup(hue: usize) -> &'static [u8; 4] {
        &HUES[hue & 0x3f]
    }
}

/* translates a frame of palette indices into RGBA pixels for display */
pub fn render_frame(frame: &FrameBuffer, write_buffer: &mut WriteBuffer) {
    for (pixel, hue) in write_buffer.chunks_exact_mut(4).zip(frame.iter()) {
        pixel.copy_from_slice(Palette::hue_lookup(*hue as usize));
    }
}
