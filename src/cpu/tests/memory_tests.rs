use crate::config::CONTROLLER_COUNT;
use crate::cpu::tests::test_mapper::TestMapper;
use crate::cpu::{Button, Controller, CoreMemory, MemoryBus, SharedItems};
use crate::mapper::{load_mapper, Mapper};
use crate::ppu::PPU;
use crate::rom::tests::ines_image;
use crate::rom::Rom;

/* everything the bus routes to, owned here so each test can borrow a fresh bus */
struct BusParts {
    memory: CoreMemory,
    ppu: PPU,
    mapper: Box<dyn Mapper>,
    controllers: [Controller; CONTROLLER_COUNT],
}

impl BusParts {
    fn new() -> Self {
        BusParts::with_mapper(Box::new(TestMapper::new()))
    }

    fn with_mapper(mapper: Box<dyn Mapper>) -> Self {
        BusParts {
            memory: CoreMemory::new(),
            ppu: PPU::new(),
            mapper,
            controllers: [Controller::new(), Controller::new()],
        }
    }

    fn bus(&mut self) -> impl MemoryBus + '_ {
        self.memory.bus(SharedItems {
            ppu: &mut self.ppu,
            mapper: &mut *self.mapper,
            controllers: &mut self.controllers,
        })
    }
}

#[test]
fn test_wram_mirroring() {
    let mut parts = BusParts::new();
    let mut bus = parts.bus();
    bus.write(0x0001, 0x42);
    assert_eq!(bus.read(0x0801), 0x42); // 0x0800-0x1fff repeat the first 2kb
    assert_eq!(bus.read(0x1801), 0x42);
    bus.write(0x1fff, 0x24);
    assert_eq!(bus.read(0x07ff), 0x24);

    assert_eq!(CoreMemory::map_address(0x1801), 0x0001);
    /* PPU registers repeated up to 0x3fff */
    assert_eq!(CoreMemory::map_address(0x30ba), 0x2002);
}

#[test]
fn test_ppu_registers_mirrored() {
    let mut parts = BusParts::new();
    {
        let mut bus = parts.bus();
        bus.write(0x3ffb, 0x20); // OAMADDR, eight bytes at a time up to 0x3fff
        bus.write(0x2c04, 0x99); // OAMDATA
        bus.write(0x2003, 0x20);
        assert_eq!(bus.read(0x2004), 0x99);

        bus.write(0x3456, 0x3f); // PPUADDR
        bus.write(0x2006, 0x00);
        bus.write(0x2007, 0x16); // PPUDATA
    }
    assert_eq!(parts.ppu.read_vram(0x3f00, &*parts.mapper), 0x16);
}

#[test]
fn test_oam_dma() {
    let mut parts = BusParts::new();
    let mut bus = parts.bus();
    for i in 0..0x100u16 {
        bus.write(0x0300 + i, i as u8);
    }
    bus.write(0x2003, 0x04); // OAM address to start at
    bus.write(0x4014, 0x03);
    assert_eq!(bus.take_stall_cycles(), 513);
    assert_eq!(bus.take_stall_cycles(), 0); // taken

    bus.write(0x2003, 0x04);
    assert_eq!(bus.read(0x2004), 0x00); // page byte 0 went to the OAM address
    bus.write(0x2003, 0x03);
    assert_eq!(bus.read(0x2004), 0xff); // and the last one wrapped around
    bus.write(0x2003, 0x80);
    assert_eq!(bus.read(0x2004), 0x7c);
}

#[test]
fn test_oam_dma_from_prg() {
    let mut mapper = TestMapper::new();
    mapper.write_prg(0x8010, 0xab);
    let mut parts = BusParts::with_mapper(Box::new(mapper));
    let mut bus = parts.bus();
    bus.write(0x4014, 0x80); // copies 0x8000-0x80ff
    bus.write(0x2003, 0x10);
    assert_eq!(bus.read(0x2004), 0xab);
}

#[test]
fn test_controller_ports() {
    let mut parts = BusParts::new();
    parts.controllers[0].set_button(Button::B, true);
    parts.controllers[1].set_button(Button::A, true);
    let mut bus = parts.bus();

    /* one strobe write reaches both controllers */
    bus.write(0x4016, 1);
    bus.write(0x4016, 0);
    assert_eq!(bus.read(0x4016), 0); // port 1: A
    assert_eq!(bus.read(0x4016), 1); // port 1: B
    assert_eq!(bus.read(0x4017), 1); // port 2: A
    assert_eq!(bus.read(0x4017), 0); // port 2: B

    /* a write to 0x4017 goes to the APU frame counter, not the controllers */
    bus.write(0x4017, 1);
    assert_eq!(bus.read(0x4017), 0); // port 2: select, still shifting
}

#[test]
fn test_apu_stub_and_unmapped() {
    let mut parts = BusParts::new();
    let mut bus = parts.bus();
    bus.write(0x4000, 0xff);
    assert_eq!(bus.read(0x4000), 0);
    assert_eq!(bus.read(0x4015), 0);

    /* writing to the FDS/expansion ports has no effect, and reads give back 0 */
    bus.write(0x4030, 0xff);
    assert_eq!(bus.read(0x4030), 0);
    bus.write(0x5000, 0xff);
    assert_eq!(bus.read(0x5000), 0);
    assert_eq!(bus.take_stall_cycles(), 0);
}

#[test]
fn test_memory_from_rom() {
    /* simple test for basic NROM case: one 16kb bank */
    let rom = Rom::from_bytes(&ines_image(1, 1, 0, 0)).unwrap();
    let mut parts = BusParts::with_mapper(load_mapper(rom).unwrap());
    let mut bus = parts.bus();
    assert_eq!(bus.read(0x8000), bus.read(0xc000)); // mirrored bank
    assert_eq!(bus.read(0x8012), 0x12);
    assert_eq!(bus.read(0xc012), 0x12);
    assert_eq!(bus.read(0xffff), 0xff);

    /* no PRG-RAM on this cartridge */
    bus.write(0x6000, 0x55);
    assert_eq!(bus.read(0x6000), 0);

    /* with a battery it has 8kb of it */
    let rom = Rom::from_bytes(&ines_image(1, 1, 0x02, 0)).unwrap();
    let mut parts = BusParts::with_mapper(load_mapper(rom).unwrap());
    let mut bus = parts.bus();
    bus.write(0x6000, 0x55);
    bus.write(0x7fff, 0x66);
    assert_eq!(bus.read(0x6000), 0x55);
    assert_eq!(bus.read(0x7fff), 0x66);
}

#[test]
fn test_read16() {
    let mut parts = BusParts::new();
    let mut bus = parts.bus();
    bus.write(0x00ff, 0x34);
    bus.write(0x0100, 0x12);
    bus.write(0x0000, 0x56);
    assert_eq!(bus.read16(0x00ff), 0x1234); // crosses into the next page
    assert_eq!(bus.read16_wrap_page(0x00ff), 0x5634); // stays on the same page
    assert_eq!(bus.read16_wrap_page(0x0100), 0x0012); // nothing odd away from a page end
}
