use crate::ppu::NametableMirroring;

/**
 * Cartridge hardware as seen from both buses. The CPU side covers 0x6000-0xffff (PRG-RAM and
 * PRG-ROM); the PPU side covers the pattern tables at 0x0000-0x1fff and decides how the four
 * logical nametables fold onto the console's 2kb of VRAM.
 */
pub trait Mapper: Send {
    fn read_prg(&self, address: u16) -> u8;

    fn write_prg(&mut self, address: u16, value: u8);

    fn read_chr(&self, address: u16) -> u8;

    fn write_chr(&mut self, address: u16, value: u8) {
        log::warn!("write to CHR-ROM ignored: 0x{address:04x} <- 0x{value:02x}");
    }

    fn get_nametable_mirroring(&self) -> NametableMirroring;

    /**
     * Folds a nametable address (0x2000-0x2fff) onto the two physical nametables, returning an
     * address in 0x2000-0x27ff. Vertical mirroring shares by bit 10 (0x2000/0x2800 alias), and
     * horizontal mirroring shares by bit 11 (0x2000/0x2400 alias).
     */
    fn translate_vram_mirror(&self, address: u16) -> u16 {
        let offset = address & 0x3ff;
        match self.get_nametable_mirroring() {
            NametableMirroring::Vertical => 0x2000 | (address & 0x7ff),
            NametableMirroring::Horizontal => 0x2000 | ((address >> 1) & 0x400) | offset,
        }
    }
}
