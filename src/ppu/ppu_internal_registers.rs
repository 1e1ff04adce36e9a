use crate::ppu::PPUCtrl;

/**
 * The "loopy" registers. v is the current VRAM address and t the temporary one, both 15 bits:
 *
 *   yyy NN YYYYY XXXXX
 *   ||| || ||||| +++++-- coarse X scroll
 *   ||| || +++++-------- coarse Y scroll
 *   ||| ++-------------- nametable select
 *   +++----------------- fine Y scroll
 *
 * x is the fine X scroll and w the shared write toggle for PPUSCROLL/PPUADDR.
 */
#[derive(Debug, Default, Clone)]
pub struct PPUInternalRegisters {
    pub v: u16,
    pub t: u16,
    pub x: u8,
    pub w: bool,
}

/* (mask, shift) of each packed field */
const COARSE_X: (u16, u16) = (0x001f, 0);
const COARSE_Y: (u16, u16) = (0x03e0, 5);
const NAMETABLE: (u16, u16) = (0x0c00, 10);
const FINE_Y: (u16, u16) = (0x7000, 12);

/* the bits copied from t at dot 257 and during the pre-render line respectively */
const HORIZONTAL_BITS: u16 = 0x041f;
const VERTICAL_BITS: u16 = 0x7be0;

fn field(reg: u16, (mask, shift): (u16, u16)) -> u8 {
    ((reg & mask) >> shift) as u8
}

fn with_field(reg: u16, (mask, shift): (u16, u16), data: u8) -> u16 {
    (reg & !mask) | (((data as u16) << shift) & mask)
}

impl PPUInternalRegisters {
    pub fn get_coarse_x(&self) -> u8 {
        field(self.v, COARSE_X)
    }

    pub fn get_coarse_x_tmp(&self) -> u8 {
        field(self.t, COARSE_X)
    }

    pub fn set_coarse_x(&mut self, data: u8) {
        self.v = with_field(self.v, COARSE_X, data);
    }

    pub fn get_coarse_y(&self) -> u8 {
        field(self.v, COARSE_Y)
    }

    pub fn set_coarse_y(&mut self, data: u8) {
        self.v = with_field(self.v, COARSE_Y, data);
    }

    pub fn get_nametable(&self) -> u8 {
        field(self.v, NAMETABLE)
    }

    pub fn get_nametable_t(&self) -> u8 {
        field(self.t, NAMETABLE)
    }

    pub fn set_nametable(&mut self, data: u8) {
        self.v = with_field(self.v, NAMETABLE, data);
    }

    pub fn get_fine_y(&self) -> u8 {
        field(self.v, FINE_Y)
    }

    pub fn set_fine_y(&mut self, data: u8) {
        self.v = with_field(self.v, FINE_Y, data);
    }

    pub fn get_fine_x(&self) -> u8 {
        self.x
    }

    pub fn set_fine_x(&mut self, data: u8) {
        self.x = data & 0x7
    }

    pub fn is_first_write(&self) -> bool {
        !self.w
    }

    /* PPUSTATUS reads reset the toggle */
    pub fn reset_write_toggle(&mut self) {
        self.w = false;
    }

    /* PPUCTRL: only the base nametable lands in t */
    pub fn write_ctrl(&mut self, ctrl: PPUCtrl) {
        self.t = with_field(self.t, NAMETABLE, ctrl.nametable());
    }

    /* PPUSCROLL: X first (coarse into t, fine into x), then Y (coarse and fine into t) */
    pub fn write_scroll(&mut self, value: u8) {
        if self.is_first_write() {
            self.t = with_field(self.t, COARSE_X, value >> 3);
            self.set_fine_x(value);
        } else {
            self.t = with_field(self.t, COARSE_Y, value >> 3);
            self.t = with_field(self.t, FINE_Y, value);
        }
        self.w = !self.w;
    }

    /* PPUADDR: high byte first (only six bits fit, and bit 14 is cleared), then low byte, which
     * also copies t into v */
    pub fn write_addr(&mut self, value: u8) {
        if self.is_first_write() {
            self.t = (self.t & 0x00ff) | ((value as u16 & 0x3f) << 8);
        } else {
            self.t = (self.t & 0xff00) | value as u16;
            self.v = self.t;
        }
        self.w = !self.w;
    }

    /* the 14-bit address PPUDATA goes through */
    pub fn vram_addr(&self) -> u16 {
        self.v & 0x3fff
    }

    pub fn increment_vram_addr(&mut self, amount: u16) {
        self.v = self.v.wrapping_add(amount) & 0x7fff;
    }

    /* the nametable byte for the tile v points at */
    pub fn tile_addr(&self) -> u16 {
        0x2000 | (self.v & 0x0fff)
    }

    /* the attribute byte covering that tile: each covers a 4x4 tile block, 8 blocks per row */
    pub fn attribute_addr(&self) -> u16 {
        0x23c0 | (self.v & 0x0c00) | ((self.v >> 4) & 0x38) | ((self.v >> 2) & 0x07)
    }

    /* end of a line: next pixel row, rolling over into the next tile row and then the
     * nametable below. rows 30 and 31 hold attributes, so a v pointed there by PPUADDR wraps to
     * row 0 without changing nametable */
    pub fn y_increment(&mut self) {
        let fine_y = self.get_fine_y();
        if fine_y < 7 {
            self.set_fine_y(fine_y + 1);
            return;
        }

        self.set_fine_y(0);
        match self.get_coarse_y() {
            29 => {
                self.set_coarse_y(0);
                self.set_nametable(self.get_nametable() ^ 0x2);
            }
            31 => self.set_coarse_y(0),
            coarse_y => self.set_coarse_y(coarse_y + 1),
        }
    }

    /* next tile across, into the neighbouring nametable after column 31 */
    pub fn coarse_x_increment(&mut self) {
        match self.get_coarse_x() {
            31 => {
                self.set_coarse_x(0);
                self.set_nametable(self.get_nametable() ^ 0x1);
            }
            coarse_x => self.set_coarse_x(coarse_x + 1),
        }
    }

    pub fn copy_x_bits(&mut self) {
        self.v = (self.v & !HORIZONTAL_BITS) | (self.t & HORIZONTAL_BITS);
    }

    pub fn copy_y_bits(&mut self) {
        self.v = (self.v & !VERTICAL_BITS) | (self.t & VERTICAL_BITS);
    }
}
