use crate::config::CONTROLLER_COUNT;
use crate::cpu::controller::{CONTROLLER_1_ADDRESS, CONTROLLER_2_ADDRESS};
use crate::cpu::{addr, Controller};
use crate::mapper::Mapper;
use crate::ppu::{PPURegister, OAM_SIZE, PPU};
use std::mem::take;

const RAM_SIZE: usize = 0x800;

pub const OAM_DMA_ADDRESS: u16 = 0x4014;
/* cycles the CPU is halted while OAM DMA runs; one more if it starts on an odd cycle */
pub const OAM_DMA_CYCLES: u16 = 513;

/**
 * Everything the CPU can see on its side of the address space. The real decoder is SystemBus;
 * tests substitute a flat 64kb array.
 */
pub trait MemoryBus {
    fn read(&mut self, address: u16) -> u8;

    fn write(&mut self, address: u16, value: u8);

    fn read16(&mut self, address: u16) -> u16 {
        let lo_byte = self.read(address);
        let hi_byte = self.read(address.wrapping_add(1));
        addr(lo_byte, hi_byte)
    }

    /* reproduces the JMP ($xxFF) bug: the high byte comes from the start of the same page */
    fn read16_wrap_page(&mut self, address: u16) -> u16 {
        let hi_byte_addr = (address & 0xff00) | (address.wrapping_add(1) & 0x00ff);
        let lo_byte = self.read(address);
        let hi_byte = self.read(hi_byte_addr);
        addr(lo_byte, hi_byte)
    }

    /* cycles the last write(s) halted the CPU for, reset to zero by the call */
    fn take_stall_cycles(&mut self) -> u16 {
        0
    }
}

/* the parts of the console the bus routes to but doesn't own */
pub struct SharedItems<'a> {
    pub ppu: &'a mut PPU,
    pub mapper: &'a mut dyn Mapper,
    pub controllers: &'a mut [Controller; CONTROLLER_COUNT],
}

/* on-board work RAM, plus bus state that outlives a single step */
pub struct CoreMemory {
    ram: Box<[u8; RAM_SIZE]>,
    stall_cycles: u16,
}

pub struct SystemBus<'a> {
    memory: &'a mut CoreMemory,
    shared: SharedItems<'a>,
}

impl CoreMemory {
    pub fn new() -> CoreMemory {
        CoreMemory {
            ram: Box::new([0; RAM_SIZE]),
            stall_cycles: 0,
        }
    }

    pub fn bus<'a>(&'a mut self, shared: SharedItems<'a>) -> SystemBus<'a> {
        SystemBus {
            memory: self,
            shared,
        }
    }

    /* folds the mirrored ranges: RAM repeats every 0x800, PPU registers every 8 bytes */
    pub fn map_address(address: u16) -> u16 {
        match address {
            0x0000..=0x1fff => address & 0x7ff,
            0x2000..=0x3fff => 0x2000 | (address & 0x7),
            _ => address,
        }
    }
}

impl Default for CoreMemory {
    fn default() -> Self {
        CoreMemory::new()
    }
}

impl SystemBus<'_> {
    fn oam_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        let mut data = [0u8; OAM_SIZE];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = self.read(base + i as u16);
        }
        self.shared.ppu.write_oam_dma(&data);
        self.memory.stall_cycles += OAM_DMA_CYCLES;
    }
}

impl MemoryBus for SystemBus<'_> {
    fn read(&mut self, address: u16) -> u8 {
        match address {
            0x0000..=0x1fff => self.memory.ram[CoreMemory::map_address(address) as usize],
            0x2000..=0x3fff => {
                let register = PPURegister::from_mirrored_addr(address);
                self.shared.ppu.read_register(register, &*self.shared.mapper)
            }
            CONTROLLER_1_ADDRESS => self.shared.controllers[0].read_state(),
            CONTROLLER_2_ADDRESS => self.shared.controllers[1].read_state(),
            /* APU and the other I/O registers read back nothing */
            0x4000..=0x4015 => 0,
            0x6000..=0xffff => self.shared.mapper.read_prg(address),
            _ => {
                log::warn!("read from unmapped address 0x{address:04x}");
                0
            }
        }
    }

    fn write(&mut self, address: u16, value: u8) {
        match address {
            0x0000..=0x1fff => {
                self.memory.ram[CoreMemory::map_address(address) as usize] = value;
            }
            0x2000..=0x3fff => {
                let register = PPURegister::from_mirrored_addr(address);
                self.shared
                    .ppu
                    .write_register(register, value, &mut *self.shared.mapper);
            }
            OAM_DMA_ADDRESS => self.oam_dma(value),
            /* one strobe line feeds both ports */
            CONTROLLER_1_ADDRESS => {
                for controller in self.shared.controllers.iter_mut() {
                    controller.write_strobe(value);
                }
            }
            /* APU registers, including the frame counter at 0x4017 */
            0x4000..=0x4017 => {}
            0x6000..=0xffff => self.shared.mapper.write_prg(address, value),
            _ => {
                log::warn!("write to unmapped address 0x{address:04x} <- 0x{value:02x}");
            }
        }
    }

    fn take_stall_cycles(&mut self) -> u16 {
        take(&mut self.memory.stall_cycles)
    }
}
