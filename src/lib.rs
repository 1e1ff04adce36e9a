pub mod config;
pub mod console;
pub mod cpu;
pub mod mapper;
pub mod ppu;
pub mod rom;
pub mod simulator;

pub use console::Console;
pub use rom::{Rom, RomError};
