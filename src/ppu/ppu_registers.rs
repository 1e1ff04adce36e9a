#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PPURegister {
    PPUCTRL,
    PPUMASK,
    PPUSTATUS,
    OAMADDR,
    OAMDATA,
    PPUSCROLL,
    PPUADDR,
    PPUDATA,
}

impl PPURegister {
    /* the eight registers repeat every 8 bytes through 0x3fff */
    pub fn from_mirrored_addr(addr: u16) -> PPURegister {
        match addr & 0x7 {
            0 => PPURegister::PPUCTRL,
            1 => PPURegister::PPUMASK,
            2 => PPURegister::PPUSTATUS,
            3 => PPURegister::OAMADDR,
            4 => PPURegister::OAMDATA,
            5 => PPURegister::PPUSCROLL,
            6 => PPURegister::PPUADDR,
            _ => PPURegister::PPUDATA,
        }
    }
}

/**
 * PPUCTRL ($2000)
 * VPHB SINN: NMI enable, master/slave (unused), sprite height, background pattern table,
 * sprite pattern table, VRAM increment, base nametable.
 */
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PPUCtrl(pub u8);

impl PPUCtrl {
    pub fn nametable(&self) -> u8 {
        self.0 & 0x3
    }

    pub fn vram_increment(&self) -> u16 {
        if self.0 & 0x04 != 0 {
            32
        } else {
            1
        }
    }

    /* ignored for 8x16 sprites, which pick a table from the tile index */
    pub fn sprite_pattern_table(&self) -> u16 {
        if self.0 & 0x08 != 0 {
            0x1000
        } else {
            0x0000
        }
    }

    pub fn background_pattern_table(&self) -> u16 {
        if self.0 & 0x10 != 0 {
            0x1000
        } else {
            0x0000
        }
    }

    pub fn sprite_height(&self) -> u8 {
        if self.0 & 0x20 != 0 {
            16
        } else {
            8
        }
    }

    pub fn nmi_enabled(&self) -> bool {
        self.0 & 0x80 != 0
    }
}

/**
 * PPUMASK ($2001)
 * BGRs bMmG: colour emphasis (ignored), show sprites, show background, show sprites in the
 * leftmost 8 pixels, show background in the leftmost 8 pixels, greyscale.
 */
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PPUMask(pub u8);

impl PPUMask {
    pub fn greyscale(&self) -> bool {
        self.0 & 0x01 != 0
    }

    pub fn show_background_left(&self) -> bool {
        self.0 & 0x02 != 0
    }

    pub fn show_sprites_left(&self) -> bool {
        self.0 & 0x04 != 0
    }

    pub fn show_background(&self) -> bool {
        self.0 & 0x08 != 0
    }

    pub fn show_sprites(&self) -> bool {
        self.0 & 0x10 != 0
    }

    pub fn rendering_enabled(&self) -> bool {
        self.0 & 0x18 != 0
    }
}

/* PPUSTATUS ($2002): vblank, sprite 0 hit, sprite overflow; the low five bits are open bus */
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PPUStatus(pub u8);

impl PPUStatus {
    const VBLANK: u8 = 0x80;
    const SPRITE_ZERO_HIT: u8 = 0x40;
    const SPRITE_OVERFLOW: u8 = 0x20;

    pub fn vblank(&self) -> bool {
        self.0 & Self::VBLANK != 0
    }

    pub fn set_vblank(&mut self, on: bool) {
        self.set(Self::VBLANK, on);
    }

    pub fn sprite_zero_hit(&self) -> bool {
        self.0 & Self::SPRITE_ZERO_HIT != 0
    }

    pub fn set_sprite_zero_hit(&mut self, on: bool) {
        self.set(Self::SPRITE_ZERO_HIT, on);
    }

    pub fn sprite_overflow(&self) -> bool {
        self.0 & Self::SPRITE_OVERFLOW != 0
    }

    pub fn set_sprite_overflow(&mut self, on: bool) {
        self.set(Self::SPRITE_OVERFLOW, on);
    }

    fn set(&mut self, mask: u8, on: bool) {
        if on {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }
}
