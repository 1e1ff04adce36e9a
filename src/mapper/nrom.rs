use crate::mapper::Mapper;
use crate::ppu::NametableMirroring;
use crate::rom::{Rom, PRG_RAM_UNIT_SIZE};

const PRG_RAM_START: u16 = 0x6000;
const PRG_ROM_START: u16 = 0x8000;

/**
 * Mapper 0. 16kb or 32kb of PRG-ROM at 0x8000 (a 16kb image shows up twice), 8kb of CHR-ROM or
 * CHR-RAM, and optionally 8kb of PRG-RAM at 0x6000.
 */
pub struct NROM {
    prg_rom: Vec<u8>,
    prg_ram: Option<Vec<u8>>,
    chr: Vec<u8>,
    chr_is_ram: bool,
    nametable_mirroring: NametableMirroring,
}

impl NROM {
    pub fn new(rom: Rom) -> NROM {
        let prg_ram = if rom.prg_ram_size > 0 {
            Some(vec![0; PRG_RAM_UNIT_SIZE])
        } else {
            None
        };

        NROM {
            prg_rom: rom.prg_data,
            prg_ram,
            chr: rom.chr_data,
            chr_is_ram: rom.chr_is_ram,
            nametable_mirroring: rom.mirroring,
        }
    }

    /* PRG reads wrap modulo the image length, which is what mirrors a 16kb image */
    fn map_address(&self, address: u16) -> usize {
        (address - PRG_ROM_START) as usize % self.prg_rom.len()
    }
}

impl Mapper for NROM {
    fn read_prg(&self, address: u16) -> u8 {
        if address >= PRG_ROM_START {
            return self.prg_rom[self.map_address(address)];
        }
        match (&self.prg_ram, address >= PRG_RAM_START) {
            (Some(ram), true) => ram[(address - PRG_RAM_START) as usize % ram.len()],
            _ => {
                log::warn!("NROM: read from unmapped address 0x{address:04x}");
                0
            }
        }
    }

    fn write_prg(&mut self, address: u16, value: u8) {
        if address >= PRG_ROM_START {
            log::warn!("NROM: write to PRG-ROM ignored: 0x{address:04x} <- 0x{value:02x}");
            return;
        }
        match (&mut self.prg_ram, address >= PRG_RAM_START) {
            (Some(ram), true) => {
                let len = ram.len();
                ram[(address - PRG_RAM_START) as usize % len] = value;
            }
            _ => log::warn!("NROM: no PRG-RAM for write 0x{address:04x} <- 0x{value:02x}"),
        }
    }

    fn read_chr(&self, address: u16) -> u8 {
        self.chr[address as usize % self.chr.len()]
    }

    fn write_chr(&mut self, address: u16, value: u8) {
        if self.chr_is_ram {
            let len = self.chr.len();
            self.chr[address as usize % len] = value;
        } else {
            log::warn!("NROM: write to CHR-ROM ignored: 0x{address:04x} <- 0x{value:02x}");
        }
    }

    fn get_nametable_mirroring(&self) -> NametableMirroring {
        self.nametable_mirroring
    }
}
