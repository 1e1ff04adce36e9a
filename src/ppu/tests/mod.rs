use crate::cpu::tests::test_mapper::TestMapper;
use crate::ppu::PPURegister::*;
use crate::ppu::PPU;

mod register_tests;

fn ppu_for_testing() -> (PPU, TestMapper) {
    (PPU::new(), TestMapper::new())
}

/* sets the address through PPUADDR and streams bytes in through PPUDATA */
fn write_vram(ppu: &mut PPU, mapper: &mut TestMapper, addr: u16, bytes: &[u8]) {
    ppu.read_register(PPUSTATUS, &*mapper);
    ppu.write_register(PPUADDR, (addr >> 8) as u8, mapper);
    ppu.write_register(PPUADDR, addr as u8, mapper);
    for byte in bytes {
        ppu.write_register(PPUDATA, *byte, mapper);
    }
}

/* PPUADDR writes leave t pointing wherever they went; put the scroll back at the origin */
fn reset_scroll(ppu: &mut PPU, mapper: &mut TestMapper) {
    ppu.read_register(PPUSTATUS, &*mapper);
    ppu.write_register(PPUCTRL, 0, mapper);
    ppu.write_register(PPUSCROLL, 0, mapper);
    ppu.write_register(PPUSCROLL, 0, mapper);
}

/* returns the number of dots it took */
fn run_until_vblank(ppu: &mut PPU, mapper: &TestMapper) -> u32 {
    let mut dots = 0;
    loop {
        ppu.tick(mapper);
        dots += 1;
        if ppu.take_frame_complete() {
            return dots;
        }
    }
}
