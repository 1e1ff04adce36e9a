pub mod palette;
#[allow(clippy::module_inception)]
mod ppu;
mod ppu_internal_registers;
mod ppu_registers;
mod sprite_info;

#[cfg(test)]
mod tests;

pub use palette::{render_frame, Palette};
pub use ppu::PPU;
pub use ppu_internal_registers::PPUInternalRegisters;
pub use ppu_registers::{PPUCtrl, PPUMask, PPURegister, PPUStatus};

pub const OAM_SIZE: usize = 256;
pub const VRAM_SIZE: usize = 0x800; /* 2kb, two physical nametables */
pub const PALETTE_MEMORY_SIZE: usize = 0x20;
pub const DISPLAY_WIDTH: usize = 256;
pub const DISPLAY_HEIGHT: usize = 240;
pub const FRAME_BUFFER_SIZE: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;
pub const WRITE_BUFFER_SIZE: usize = FRAME_BUFFER_SIZE * 4;

type OAM = [u8; OAM_SIZE];

/* one palette index (0-63) per pixel */
pub type FrameBuffer = [u8; FRAME_BUFFER_SIZE];
/* RGBA, ready for the window */
pub type WriteBuffer = [u8; WRITE_BUFFER_SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NametableMirroring {
    Horizontal, /* pages are mirrored horizontally (appropriate for vertical games) */
    Vertical,   /* pages are mirrored vertically (appropriate for horizontal games) */
}
