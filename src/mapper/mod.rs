mod mapper;
mod nrom;


use nrom::NROM;

pub use mapper::Mapper;
use crate::rom::{Rom, RomError};

/* new cartridge boards register here */
pub fn load_mapper(rom: Rom) -> Result<Box<dyn Mapper>, RomError> {
    match rom.mapper_id {
        0 => Ok(Box::new(NROM::new(rom))), /* nrom */
        mapper_id => Err(RomError::UnsupportedMapper(mapper_id)),
    }
}
