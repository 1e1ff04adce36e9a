use crate::mapper::Mapper;
use crate::ppu::sprite_info::SpriteInfo;
use crate::ppu::{
    FrameBuffer, PPUCtrl, PPUInternalRegisters, PPUMask, PPURegister, PPUStatus, DISPLAY_WIDTH,
    FRAME_BUFFER_SIZE, OAM, OAM_SIZE, PALETTE_MEMORY_SIZE, VRAM_SIZE,
};

const DOTS_PER_SCANLINE: u16 = 341;
const VISIBLE_SCANLINES: u16 = 240;
const VBLANK_SCANLINE: u16 = 241;
const PRERENDER_SCANLINE: u16 = 261;
const MAX_SPRITES_PER_SCANLINE: usize = 8;

pub struct PPU {
    vram: Box<[u8; VRAM_SIZE]>,
    palette_memory: [u8; PALETTE_MEMORY_SIZE],
    pub(super) oam: OAM,
    oam_addr: u8,
    /* shared registers */
    pub(super) ppu_ctrl: PPUCtrl,
    pub(super) ppu_mask: PPUMask,
    pub(super) ppu_status: PPUStatus,
    pub(super) internal_regs: PPUInternalRegisters,
    read_buffer: u8, /* PPUDATA reads lag one access behind */
    open_bus: u8,    /* last value written to any register */
    /* timing */
    scanline: u16,
    dot: u16,
    is_odd_frame: bool,
    frame_count: u64,
    nmi_output: bool,
    frame_complete: bool,
    /* background pipeline */
    name_table_byte: u8,
    attribute_table_byte: u8,
    low_tile_byte: u8,
    high_tile_byte: u8,
    tile_data: u64, /* two tiles, 4 bits per pixel: palette in the top two, colour in the bottom */
    scanline_sprites: Vec<SpriteInfo>,
    frame_buffer: Box<FrameBuffer>,
}

impl Default for PPU {
    fn default() -> Self {
        PPU::new()
    }
}

impl PPU {
    pub fn new() -> PPU {
        PPU {
            vram: Box::new([0; VRAM_SIZE]),
            palette_memory: [0; PALETTE_MEMORY_SIZE],
            oam: [0; OAM_SIZE],
            oam_addr: 0,
            ppu_ctrl: PPUCtrl::default(),
            ppu_mask: PPUMask::default(),
            ppu_status: PPUStatus::default(),
            internal_regs: PPUInternalRegisters::default(),
            read_buffer: 0,
            open_bus: 0,
            scanline: PRERENDER_SCANLINE,
            dot: 0,
            is_odd_frame: false,
            frame_count: 0,
            nmi_output: false,
            frame_complete: false,
            name_table_byte: 0,
            attribute_table_byte: 0,
            low_tile_byte: 0,
            high_tile_byte: 0,
            tile_data: 0,
            scanline_sprites: Vec::with_capacity(MAX_SPRITES_PER_SCANLINE),
            frame_buffer: Box::new([0; FRAME_BUFFER_SIZE]),
        }
    }

    /* back to the power-up register state; memory contents survive, as on hardware */
    pub fn reset(&mut self) {
        self.ppu_ctrl = PPUCtrl::default();
        self.ppu_mask = PPUMask::default();
        self.ppu_status = PPUStatus::default();
        self.internal_regs = PPUInternalRegisters::default();
        self.read_buffer = 0;
        self.scanline = PRERENDER_SCANLINE;
        self.dot = 0;
        self.is_odd_frame = false;
        self.nmi_output = false;
        self.frame_complete = false;
        self.tile_data = 0;
        self.scanline_sprites.clear();
    }

    pub fn scanline(&self) -> u16 {
        self.scanline
    }

    pub fn dot(&self) -> u16 {
        self.dot
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /* true once per vblank NMI; the caller forwards it to the CPU */
    pub fn poll_nmi(&mut self) -> bool {
        std::mem::take(&mut self.nmi_output)
    }

    /* true once per frame, at the start of vblank */
    pub fn take_frame_complete(&mut self) -> bool {
        std::mem::take(&mut self.frame_complete)
    }

    /* advances one dot, then does whatever work happens on it */
    pub fn tick(&mut self, mapper: &dyn Mapper) {
        if !self.advance_counters() {
            return;
        }

        let rendering_on = self.ppu_mask.rendering_enabled();
        let visible_line = self.scanline < VISIBLE_SCANLINES;
        let prerender_line = self.scanline == PRERENDER_SCANLINE;

        if visible_line && (1..=256).contains(&self.dot) {
            self.render_pixel(rendering_on);
        }

        if rendering_on && (visible_line || prerender_line) {
            self.background_pipeline(mapper, prerender_line);
            if self.dot == 257 {
                if visible_line {
                    self.sprite_evaluation(mapper);
                } else {
                    self.scanline_sprites.clear();
                }
            }
        }

        if self.scanline == VBLANK_SCANLINE && self.dot == 1 {
            self.start_vblank();
        } else if prerender_line && self.dot == 1 {
            self.ppu_status.set_vblank(false);
            self.ppu_status.set_sprite_zero_hit(false);
            self.ppu_status.set_sprite_overflow(false);
        }
    }

    /* returns false when the dot was skipped and there's nothing to do */
    fn advance_counters(&mut self) -> bool {
        /* odd frames skip the last dot of the pre-render line when rendering */
        if self.ppu_mask.rendering_enabled()
            && self.is_odd_frame
            && self.scanline == PRERENDER_SCANLINE
            && self.dot == 339
        {
            self.dot = 0;
            self.scanline = 0;
            self.next_frame();
            return false;
        }

        self.dot += 1;
        if self.dot == DOTS_PER_SCANLINE {
            self.dot = 0;
            self.scanline += 1;
            if self.scanline > PRERENDER_SCANLINE {
                self.scanline = 0;
                self.next_frame();
            }
        }
        true
    }

    fn next_frame(&mut self) {
        self.is_odd_frame = !self.is_odd_frame;
        self.frame_count = self.frame_count.wrapping_add(1);
    }

    fn start_vblank(&mut self) {
        self.ppu_status.set_vblank(true);
        self.frame_complete = true;
        if self.ppu_ctrl.nmi_enabled() {
            self.nmi_output = true;
        }
    }

    /* fetch windows are dots 1-256 (this line) and 321-336 (first two tiles of the next) */
    fn background_pipeline(&mut self, mapper: &dyn Mapper, prerender_line: bool) {
        let dot = self.dot;
        let fetch_dot = (1..=256).contains(&dot) || (321..=336).contains(&dot);

        if fetch_dot {
            self.tile_data <<= 4;
            match dot % 8 {
                1 => self.fetch_name_table_byte(mapper),
                3 => self.fetch_attribute_table_byte(mapper),
                5 => self.low_tile_byte = mapper.read_chr(self.pattern_addr()),
                7 => self.high_tile_byte = mapper.read_chr(self.pattern_addr() + 8),
                0 => self.store_tile_data(),
                _ => {}
            }
            if dot % 8 == 0 {
                self.internal_regs.coarse_x_increment();
            }
        }

        if prerender_line && (280..=304).contains(&dot) {
            self.internal_regs.copy_y_bits();
        }
        if dot == 256 {
            self.internal_regs.y_increment();
        } else if dot == 257 {
            self.internal_regs.copy_x_bits();
        }
    }

    fn fetch_name_table_byte(&mut self, mapper: &dyn Mapper) {
        self.name_table_byte = self.read_vram(self.internal_regs.tile_addr(), mapper);
    }

    fn fetch_attribute_table_byte(&mut self, mapper: &dyn Mapper) {
        let attr_table_value = self.read_vram(self.internal_regs.attribute_addr(), mapper);
        /* each attribute byte stores 2-bit palettes for four 16x16 blocks. in order from the lowest
         * bits they are: upper left, upper right, bottom left, bottom right
         */
        let v = self.internal_regs.v;
        let shift = ((v >> 4) & 4) | (v & 2);
        self.attribute_table_byte = ((attr_table_value >> shift) & 3) << 2;
    }

    fn pattern_addr(&self) -> u16 {
        self.ppu_ctrl.background_pattern_table()
            + self.name_table_byte as u16 * 16
            + self.internal_regs.get_fine_y() as u16
    }

    /* unpacks the two bit planes into eight 4-bit pixels in the low half of tile_data */
    fn store_tile_data(&mut self) {
        let mut data: u32 = 0;
        for _ in 0..8 {
            let p1 = (self.low_tile_byte & 0x80) >> 7;
            let p2 = (self.high_tile_byte & 0x80) >> 6;
            self.low_tile_byte <<= 1;
            self.high_tile_byte <<= 1;
            data <<= 4;
            data |= (self.attribute_table_byte | p1 | p2) as u32;
        }
        self.tile_data |= data as u64;
    }

    fn background_pixel(&self) -> u8 {
        let current_tile = (self.tile_data >> 32) as u32;
        ((current_tile >> ((7 - self.internal_regs.get_fine_x()) * 4)) & 0x0f) as u8
    }

    /* first opaque sprite pixel in OAM order: (OAM index, in front of background, palette offset) */
    fn sprite_pixel(&self, x: u8) -> Option<(usize, bool, u8)> {
        self.scanline_sprites.iter().find_map(|sprite| {
            sprite
                .pixel_at(x)
                .map(|color| (sprite.sprite_index, sprite.is_foreground(), color))
        })
    }

    fn render_pixel(&mut self, rendering_on: bool) {
        let x = (self.dot - 1) as u8;
        let mut color = 0;

        if rendering_on {
            let mask = self.ppu_mask;
            let show_background = mask.show_background() && (x > 7 || mask.show_background_left());
            let show_sprites = mask.show_sprites() && (x > 7 || mask.show_sprites_left());

            let background = if show_background { self.background_pixel() } else { 0 };
            let sprite = if show_sprites { self.sprite_pixel(x) } else { None };
            let background_opaque = background & 0x3 != 0;

            color = match sprite {
                Some((sprite_index, is_foreground, sprite_color)) => {
                    if sprite_index == 0 && background_opaque && x != 0xff {
                        self.ppu_status.set_sprite_zero_hit(true);
                    }
                    if is_foreground || !background_opaque {
                        0x10 | sprite_color
                    } else {
                        background
                    }
                }
                None if background_opaque => background,
                None => 0,
            };
        }

        let mut hue = self.palette_memory[palette_index(color as u16)];
        if self.ppu_mask.greyscale() {
            hue &= 0x30;
        }
        let index = self.scanline as usize * DISPLAY_WIDTH + x as usize;
        self.frame_buffer[index] = hue & 0x3f;
    }

    /* Finds the first eight sprites on the next scanline, determined by position in the OAM,
     * and fetches their pattern rows. Takes into account whether sprites are 8 or 16 pixels
     * tall. Also sets the sprite overflow bit if there are more than eight.
     */
    fn sprite_evaluation(&mut self, mapper: &dyn Mapper) {
        let scanline = self.scanline as u8;
        let sprite_height = self.ppu_ctrl.sprite_height();
        self.scanline_sprites.clear();

        for i in 0..OAM_SIZE / 4 {
            let mut sprite = SpriteInfo::from_memory(i, &self.oam[i * 4..i * 4 + 4]);
            if !sprite.in_scanline(scanline, sprite_height) {
                continue;
            }
            if self.scanline_sprites.len() == MAX_SPRITES_PER_SCANLINE {
                self.ppu_status.set_sprite_overflow(true);
                break;
            }
            let addr = sprite.pattern_row_addr(scanline, self.ppu_ctrl);
            sprite.load_pattern(mapper.read_chr(addr), mapper.read_chr(addr + 8));
            self.scanline_sprites.push(sprite);
        }
    }

    pub fn read_register(&mut self, register: PPURegister, mapper: &dyn Mapper) -> u8 {
        match register {
            PPURegister::PPUSTATUS => {
                let result = (self.ppu_status.0 & 0xe0) | (self.open_bus & 0x1f);
                self.ppu_status.set_vblank(false);
                self.internal_regs.reset_write_toggle();
                result
            }
            PPURegister::OAMDATA => self.oam[self.oam_addr as usize],
            PPURegister::PPUDATA => {
                let addr = self.internal_regs.vram_addr();
                let result = if addr < 0x3f00 {
                    let buffered = self.read_buffer;
                    self.read_buffer = self.read_vram(addr, mapper);
                    buffered
                } else {
                    /* palettes come back immediately; the buffer picks up the nametable
                     * underneath */
                    self.read_buffer = self.read_vram(addr - 0x1000, mapper);
                    self.read_vram(addr, mapper)
                };
                self.internal_regs
                    .increment_vram_addr(self.ppu_ctrl.vram_increment());
                result
            }
            /* write-only registers */
            _ => self.open_bus,
        }
    }

    pub fn write_register(&mut self, register: PPURegister, value: u8, mapper: &mut dyn Mapper) {
        self.open_bus = value;
        match register {
            PPURegister::PPUCTRL => {
                let was_enabled = self.ppu_ctrl.nmi_enabled();
                self.ppu_ctrl = PPUCtrl(value);
                self.internal_regs.write_ctrl(self.ppu_ctrl);
                /* turning NMIs on during vblank raises one right away */
                if !was_enabled && self.ppu_ctrl.nmi_enabled() && self.ppu_status.vblank() {
                    self.nmi_output = true;
                }
            }
            PPURegister::PPUMASK => self.ppu_mask = PPUMask(value),
            PPURegister::PPUSTATUS => {}
            PPURegister::OAMADDR => self.oam_addr = value,
            PPURegister::OAMDATA => {
                self.oam[self.oam_addr as usize] = value;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }
            PPURegister::PPUSCROLL => self.internal_regs.write_scroll(value),
            PPURegister::PPUADDR => self.internal_regs.write_addr(value),
            PPURegister::PPUDATA => {
                let addr = self.internal_regs.vram_addr();
                self.write_vram(addr, value, mapper);
                self.internal_regs
                    .increment_vram_addr(self.ppu_ctrl.vram_increment());
            }
        }
    }

    /* 256 bytes from the CPU bus, starting at the current OAM address and wrapping */
    pub fn write_oam_dma(&mut self, data: &[u8; OAM_SIZE]) {
        for (i, byte) in data.iter().enumerate() {
            self.oam[self.oam_addr.wrapping_add(i as u8) as usize] = *byte;
        }
    }

    pub fn read_vram(&self, addr: u16, mapper: &dyn Mapper) -> u8 {
        let addr = addr & 0x3fff;
        match addr {
            /* pattern tables (CHR data) */
            0x0000..=0x1fff => mapper.read_chr(addr),
            /* nametables and attribute tables */
            0x2000..=0x3eff => self.vram[nametable_index(addr, mapper)],
            /* palettes */
            _ => self.palette_memory[palette_index(addr)],
        }
    }

    pub fn write_vram(&mut self, addr: u16, value: u8, mapper: &mut dyn Mapper) {
        let addr = addr & 0x3fff;
        match addr {
            0x0000..=0x1fff => mapper.write_chr(addr, value),
            0x2000..=0x3eff => self.vram[nametable_index(addr, &*mapper)] = value,
            /* only six bits of colour */
            _ => self.palette_memory[palette_index(addr)] = value & 0x3f,
        }
    }
}

/* 0x3000-0x3eff repeats the nametables; the mapper folds the four logical tables onto two */
fn nametable_index(addr: u16, mapper: &dyn Mapper) -> usize {
    let folded = mapper.translate_vram_mirror(0x2000 | (addr & 0x0fff));
    (folded & 0x07ff) as usize
}

/* palettes are repeated above 0x3f1f, and the first colour of each sprite palette is shared
 * with the matching background palette */
fn palette_index(addr: u16) -> usize {
    let index = (addr & 0x1f) as usize;
    if index >= 0x10 && index % 4 == 0 {
        index - 0x10
    } else {
        index
    }
}
