use crate::cpu::tests::test_mapper::TestMapper;
use crate::mapper::Mapper;
use crate::ppu::tests::{ppu_for_testing, run_until_vblank, write_vram};
use crate::ppu::NametableMirroring;
use crate::ppu::PPURegister::*;
use crate::ppu::{PPURegister, PPU};

#[test]
fn test_register_mirrors() {
    assert_eq!(PPURegister::from_mirrored_addr(0x2000), PPUCTRL);
    assert_eq!(PPURegister::from_mirrored_addr(0x2002), PPUSTATUS);
    assert_eq!(PPURegister::from_mirrored_addr(0x2007), PPUDATA);
    assert_eq!(PPURegister::from_mirrored_addr(0x3ffa), PPUSCROLL); // repeats every 8 bytes
    assert_eq!(PPURegister::from_mirrored_addr(0x2e0b), OAMADDR);
}

#[test]
fn test_ctrl_selects_nametable() {
    let (mut ppu, mut mapper) = ppu_for_testing();
    ppu.write_register(PPUCTRL, 0x02, &mut mapper);
    assert_eq!(ppu.internal_regs.get_nametable_t(), 2);
    ppu.write_register(PPUCTRL, 0xfd, &mut mapper); // other bits leave t alone
    assert_eq!(ppu.internal_regs.get_nametable_t(), 1);
    assert_eq!(ppu.internal_regs.t & !0x0c00, 0);
}

#[test]
fn test_vblank_flag_read_once() {
    let (mut ppu, mapper) = ppu_for_testing();
    while !(ppu.scanline() == 241 && ppu.dot() == 1) {
        ppu.tick(&mapper);
    }
    assert_eq!(ppu.read_register(PPUSTATUS, &mapper) & 0x80, 0x80); // vblank started
    assert_eq!(ppu.read_register(PPUSTATUS, &mapper) & 0x80, 0); // cleared by the first read

    /* and stays clear through the end of vblank, cleared for good on the pre-render line */
    while !(ppu.scanline() == 261 && ppu.dot() == 1) {
        ppu.tick(&mapper);
    }
    assert_eq!(ppu.read_register(PPUSTATUS, &mapper) & 0x80, 0);
}

#[test]
fn test_vblank_cleared_on_prerender_line() {
    let (mut ppu, mapper) = ppu_for_testing();
    run_until_vblank(&mut ppu, &mapper);
    while !(ppu.scanline() == 261 && ppu.dot() == 0) {
        ppu.tick(&mapper);
    }
    assert_eq!(ppu.read_register(PPUSTATUS, &mapper) & 0x80, 0x80); // not read yet, still set
    run_until_vblank(&mut ppu, &mapper);
    while !(ppu.scanline() == 261 && ppu.dot() == 1) {
        ppu.tick(&mapper);
    }
    assert_eq!(ppu.read_register(PPUSTATUS, &mapper) & 0x80, 0); // cleared without a read
}

#[test]
fn test_status_open_bus_and_write_toggle() {
    let (mut ppu, mut mapper) = ppu_for_testing();
    ppu.write_register(PPUSCROLL, 0x1f, &mut mapper); // first write
    assert_eq!(ppu.read_register(PPUSTATUS, &mapper), 0x1f); // low bits from the last write
    /* status read reset the toggle, so this is a first write again */
    ppu.write_register(PPUSCROLL, 0x08, &mut mapper);
    assert_eq!(ppu.internal_regs.get_coarse_x_tmp(), 1);
    assert_eq!(ppu.read_register(PPUMASK, &mapper), 0x08); // write-only register reads open bus
}

#[test]
fn test_nmi() {
    let (mut ppu, mut mapper) = ppu_for_testing();
    ppu.write_register(PPUCTRL, 0x80, &mut mapper);
    run_until_vblank(&mut ppu, &mapper);
    assert_eq!(ppu.poll_nmi(), true); // raised at vblank
    assert_eq!(ppu.poll_nmi(), false); // only once

    /* no NMI with it disabled */
    ppu.write_register(PPUCTRL, 0x00, &mut mapper);
    run_until_vblank(&mut ppu, &mapper);
    assert_eq!(ppu.poll_nmi(), false);

    /* but enabling it during vblank raises one immediately */
    ppu.write_register(PPUCTRL, 0x80, &mut mapper);
    assert_eq!(ppu.poll_nmi(), true);
    ppu.write_register(PPUCTRL, 0x80, &mut mapper); // already enabled, nothing new
    assert_eq!(ppu.poll_nmi(), false);

    /* nor after vblank has been acknowledged */
    ppu.write_register(PPUCTRL, 0x00, &mut mapper);
    ppu.read_register(PPUSTATUS, &mapper);
    ppu.write_register(PPUCTRL, 0x80, &mut mapper);
    assert_eq!(ppu.poll_nmi(), false);
}

#[test]
fn test_oam_registers() {
    let (mut ppu, mut mapper) = ppu_for_testing();
    ppu.write_register(OAMADDR, 0xfe, &mut mapper);
    ppu.write_register(OAMDATA, 0x11, &mut mapper);
    ppu.write_register(OAMDATA, 0x22, &mut mapper);
    ppu.write_register(OAMDATA, 0x33, &mut mapper); // wraps to 0x00
    assert_eq!(ppu.oam[0xfe], 0x11);
    assert_eq!(ppu.oam[0xff], 0x22);
    assert_eq!(ppu.oam[0x00], 0x33);

    ppu.write_register(OAMADDR, 0xff, &mut mapper);
    assert_eq!(ppu.read_register(OAMDATA, &mapper), 0x22);
    assert_eq!(ppu.read_register(OAMDATA, &mapper), 0x22); // reads don't increment
}

#[test]
fn test_oam_dma_starts_at_oam_addr() {
    let (mut ppu, mut mapper) = ppu_for_testing();
    let mut data = [0u8; 256];
    for (i, byte) in data.iter_mut().enumerate() {
        *byte = i as u8;
    }
    ppu.write_register(OAMADDR, 0x10, &mut mapper);
    ppu.write_oam_dma(&data);
    assert_eq!(ppu.oam[0x10], 0x00); // first byte lands at the OAM address
    assert_eq!(ppu.oam[0xff], 0xef);
    assert_eq!(ppu.oam[0x00], 0xf0); // and wraps around
    assert_eq!(ppu.oam[0x0f], 0xff);
}

#[test]
fn test_ppudata_buffered_reads() {
    let (mut ppu, mut mapper) = ppu_for_testing();
    write_vram(&mut ppu, &mut mapper, 0x2005, &[0xab, 0xcd]);

    write_vram(&mut ppu, &mut mapper, 0x2005, &[]);
    ppu.read_register(PPUDATA, &mapper); // stale buffer contents
    assert_eq!(ppu.read_register(PPUDATA, &mapper), 0xab);
    assert_eq!(ppu.read_register(PPUDATA, &mapper), 0xcd);

    /* CHR goes through the mapper, and is buffered too */
    mapper.write_chr(0x0010, 0x5a);
    write_vram(&mut ppu, &mut mapper, 0x0010, &[]);
    ppu.read_register(PPUDATA, &mapper);
    assert_eq!(ppu.read_register(PPUDATA, &mapper), 0x5a);
}

#[test]
fn test_ppudata_palette_reads_are_immediate() {
    let (mut ppu, mut mapper) = ppu_for_testing();
    write_vram(&mut ppu, &mut mapper, 0x2f01, &[0x77]); // underneath the palette
    write_vram(&mut ppu, &mut mapper, 0x3f01, &[0x21]);

    write_vram(&mut ppu, &mut mapper, 0x3f01, &[]);
    assert_eq!(ppu.read_register(PPUDATA, &mapper), 0x21); // no lag
    write_vram(&mut ppu, &mut mapper, 0x2000, &[]);
    assert_eq!(ppu.read_register(PPUDATA, &mapper), 0x77); // buffer filled from the nametable
}

#[test]
fn test_vram_increment() {
    let (mut ppu, mut mapper) = ppu_for_testing();
    ppu.write_register(PPUCTRL, 0x04, &mut mapper); // increment by 32
    write_vram(&mut ppu, &mut mapper, 0x2000, &[0x01, 0x02]);
    assert_eq!(ppu.read_vram(0x2000, &mapper), 0x01);
    assert_eq!(ppu.read_vram(0x2020, &mapper), 0x02); // next row down
    assert_eq!(ppu.read_vram(0x2001, &mapper), 0x00);
}

#[test]
fn test_palette_mirroring() {
    let (mut ppu, mut mapper) = ppu_for_testing();
    write_vram(&mut ppu, &mut mapper, 0x3f10, &[0x2c]);
    assert_eq!(ppu.read_vram(0x3f00, &mapper), 0x2c); // 0x10 shares with 0x00
    write_vram(&mut ppu, &mut mapper, 0x3f0c, &[0x15]);
    assert_eq!(ppu.read_vram(0x3f1c, &mapper), 0x15); // and the other way round
    write_vram(&mut ppu, &mut mapper, 0x3f11, &[0x30]);
    assert_eq!(ppu.read_vram(0x3f01, &mapper), 0x00); // non-zero colours are separate
    assert_eq!(ppu.read_vram(0x3f31, &mapper), 0x30); // repeats every 32 bytes
    write_vram(&mut ppu, &mut mapper, 0x3f02, &[0xff]);
    assert_eq!(ppu.read_vram(0x3f02, &mapper), 0x3f); // six bits of colour
}

fn nametable_ppu(mirroring: NametableMirroring) -> (PPU, TestMapper) {
    let (mut ppu, _) = ppu_for_testing();
    let mut mapper = TestMapper::with_mirroring(mirroring);
    write_vram(&mut ppu, &mut mapper, 0x2000, &[0x11]);
    write_vram(&mut ppu, &mut mapper, 0x2400, &[0x22]);
    (ppu, mapper)
}

#[test]
fn test_vertical_mirroring() {
    let (ppu, mapper) = nametable_ppu(NametableMirroring::Vertical);
    assert_eq!(ppu.read_vram(0x2800, &mapper), 0x11);
    assert_eq!(ppu.read_vram(0x2c00, &mapper), 0x22);
    assert_eq!(ppu.read_vram(0x3000, &mapper), 0x11); // 0x3000-0x3eff repeats 0x2000-0x2eff
}

#[test]
fn test_horizontal_mirroring() {
    let (ppu, mapper) = nametable_ppu(NametableMirroring::Horizontal);
    /* 0x2400 went into the same table as 0x2000 */
    assert_eq!(ppu.read_vram(0x2000, &mapper), 0x22);
    assert_eq!(ppu.read_vram(0x2800, &mapper), 0x00); // second table untouched
    assert_eq!(ppu.read_vram(0x3400, &mapper), 0x22);
}
