use crate::ppu::NametableMirroring;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;
const PRG_UNIT_SIZE: usize = 1 << 14; /* 16kb */
const CHR_UNIT_SIZE: usize = 1 << 13; /* 8kb */
pub const PRG_RAM_UNIT_SIZE: usize = 1 << 13;

#[derive(Debug, Error)]
pub enum RomError {
    #[error("unable to read ROM file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not an iNES image; header starts with {0:02X?}")]
    BadMagic([u8; 4]),
    #[error("ROM is {0} bytes, shorter than the 16-byte iNES header")]
    TooShort(usize),
    #[error("ROM truncated in {section}: expected {expected} bytes, found {actual}")]
    Truncated {
        section: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("ROM declares no PRG data")]
    MissingPrg,
    #[error("unsupported mapper {0}")]
    UnsupportedMapper(u8),
}

/**
 * A decoded iNES image. The header flags have been split out; the trainer, if any, has been
 * skipped. When the cartridge has CHR-RAM instead of CHR-ROM, chr_data is an 8kb block of zeroes
 * and chr_is_ram is set.
 */
#[derive(Debug, Clone)]
pub struct Rom {
    pub prg_data: Vec<u8>,
    pub chr_data: Vec<u8>,
    pub chr_is_ram: bool,
    pub mapper_id: u8,
    pub mirroring: NametableMirroring,
    pub four_screen: bool,
    pub has_battery: bool,
    pub prg_ram_size: usize,
    pub is_nes2: bool,
}

impl Rom {
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Rom, RomError> {
        let path = path.as_ref();
        log::info!("Loading ROM from {}", path.display());
        let rom_data = fs::read(path).map_err(|source| RomError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Rom::from_bytes(&rom_data)
    }

    pub fn from_bytes(rom_data: &[u8]) -> Result<Rom, RomError> {
        if rom_data.len() < HEADER_SIZE {
            return Err(RomError::TooShort(rom_data.len()));
        }

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&rom_data[0..4]);
        if &magic != b"NES\x1A" {
            return Err(RomError::BadMagic(magic));
        }

        let prg_size = rom_data[4] as usize * PRG_UNIT_SIZE;
        let chr_size = rom_data[5] as usize * CHR_UNIT_SIZE;
        let flags_6 = rom_data[6];
        let flags_7 = rom_data[7];

        if prg_size == 0 {
            return Err(RomError::MissingPrg);
        }

        let has_trainer = flags_6 & 0x04 != 0;
        let prg_start = HEADER_SIZE + if has_trainer { TRAINER_SIZE } else { 0 };
        let chr_start = prg_start + prg_size;

        let prg_data = Self::section(rom_data, "PRG", prg_start, prg_size)?.to_vec();
        let (chr_data, chr_is_ram) = if chr_size == 0 {
            (vec![0; CHR_UNIT_SIZE], true)
        } else {
            (Self::section(rom_data, "CHR", chr_start, chr_size)?.to_vec(), false)
        };

        let mirroring = if flags_6 & 0x01 != 0 {
            NametableMirroring::Vertical
        } else {
            NametableMirroring::Horizontal
        };
        let four_screen = flags_6 & 0x08 != 0;
        let is_nes2 = flags_7 & 0x0c == 0x08;
        let has_battery = flags_6 & 0x02 != 0;

        /* byte 8 counts 8kb units; zero is read as "one unit" only when something else implies RAM */
        let prg_ram_size = match rom_data[8] {
            0 if has_battery => PRG_RAM_UNIT_SIZE,
            units => units as usize * PRG_RAM_UNIT_SIZE,
        };

        let rom = Rom {
            prg_data,
            chr_data,
            chr_is_ram,
            mapper_id: (flags_7 & 0xf0) | (flags_6 >> 4),
            mirroring,
            four_screen,
            has_battery,
            prg_ram_size,
            is_nes2,
        };

        log::info!(
            "ROM: mapper {}, {}kb PRG, {}kb CHR{}, {:?} mirroring, battery: {}",
            rom.mapper_id,
            rom.prg_data.len() / 1024,
            rom.chr_data.len() / 1024,
            if rom.chr_is_ram { " RAM" } else { "" },
            rom.mirroring,
            rom.has_battery
        );
        if is_nes2 {
            log::debug!("NES 2.0 header detected; extended fields are ignored");
        }
        if four_screen {
            log::debug!("four-screen flag set; falling back to {:?} mirroring", rom.mirroring);
        }
        if has_trainer {
            log::debug!("skipping 512-byte trainer");
        }

        Ok(rom)
    }

    fn section<'a>(
        rom_data: &'a [u8],
        section: &'static str,
        start: usize,
        size: usize,
    ) -> Result<&'a [u8], RomError> {
        rom_data
            .get(start..start + size)
            .ok_or(RomError::Truncated {
                section,
                expected: size,
                actual: rom_data.len().saturating_sub(start),
            })
    }
}
