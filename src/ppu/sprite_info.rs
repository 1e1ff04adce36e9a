use crate::ppu::PPUCtrl;

/* one OAM entry, plus the pattern row fetched for the scanline it was evaluated on */
#[derive(Debug, Clone)]
pub struct SpriteInfo {
    /* NB: this is one less than the top of the sprite; sprites are evaluated on the line before
     * they're drawn, so comparing it against the evaluating scanline works out */
    y: u8,
    tile_index: u8,
    attrs: u8,
    pub(super) x: u8,
    pub(super) sprite_index: usize,
    pattern_lo: u8,
    pattern_hi: u8,
}

impl SpriteInfo {
    /* create a SpriteInfo from memory */
    pub(super) fn from_memory(sprite_index: usize, src_slice: &[u8]) -> SpriteInfo {
        SpriteInfo {
            y: src_slice[0],
            tile_index: src_slice[1],
            attrs: src_slice[2],
            x: src_slice[3],
            sprite_index,
            pattern_lo: 0,
            pattern_hi: 0,
        }
    }

    pub(super) fn in_scanline(&self, scanline: u8, sprite_height: u8) -> bool {
        self.y <= scanline && scanline - self.y < sprite_height
    }

    pub fn is_foreground(&self) -> bool {
        self.attrs & 0x20 == 0
    }

    fn flipped_horizontally(&self) -> bool {
        self.attrs & 0x40 != 0
    }

    fn flipped_vertically(&self) -> bool {
        self.attrs & 0x80 != 0
    }

    /* CHR address of the low plane for this sprite's row on the scanline; the high plane is 8
     * bytes on */
    pub(super) fn pattern_row_addr(&self, scanline: u8, ctrl: PPUCtrl) -> u16 {
        let height = ctrl.sprite_height();
        let mut row = scanline - self.y;
        if self.flipped_vertically() {
            row = (height - 1) - row;
        }

        if height == 16 {
            /* double tall sprites are two regular 8x8 tiles glued together; bit 0 of the index
             * picks the pattern table instead */
            let table = (self.tile_index as u16 & 1) * 0x1000;
            let mut tile = (self.tile_index & !1) as u16;
            if row > 7 {
                tile += 1;
                row -= 8;
            }
            table + tile * 16 + row as u16
        } else {
            ctrl.sprite_pattern_table() + self.tile_index as u16 * 16 + row as u16
        }
    }

    pub(super) fn load_pattern(&mut self, lo: u8, hi: u8) {
        self.pattern_lo = lo;
        self.pattern_hi = hi;
    }

    /* 4-bit palette RAM offset (palette in bits 2-3, colour in bits 0-1) if the sprite has an
     * opaque pixel at x */
    pub(super) fn pixel_at(&self, x: u8) -> Option<u8> {
        let column = x.wrapping_sub(self.x);
        if column >= 8 {
            return None;
        }
        /* memory stores the leftmost pixel in the high bit */
        let bit = if self.flipped_horizontally() { column } else { 7 - column };
        let color = (((self.pattern_hi >> bit) & 1) << 1) | ((self.pattern_lo >> bit) & 1);
        if color == 0 {
            None
        } else {
            Some(((self.attrs & 0x3) << 2) | color)
        }
    }
}
