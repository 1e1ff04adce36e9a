/* the 2A03's 6502 core, its address space, and the controller ports hanging off it */
mod addressing_mode;
mod controller;
mod core_memory;
#[allow(clippy::module_inception)]
mod cpu;
mod instruction;
mod status_flag;

#[cfg(test)]
pub(crate) mod tests;

pub use addressing_mode::{AddressingMode, Operand};
pub use controller::{Button, Controller};
pub use core_memory::{CoreMemory, MemoryBus, SharedItems, SystemBus};
pub use cpu::CPU;
pub use instruction::{from_opcode, Instruction, RealizedInstruction};
pub use status_flag::StatusFlag;

pub const NMI_HANDLER_LOCATION: u16 = 0xfffa;
pub const INITIAL_PC_LOCATION: u16 = 0xfffc;
pub const IRQ_HANDLER_LOCATION: u16 = 0xfffe;

const STACK_PAGE: u8 = 0x01;

/**
 * Converts a pair of bytes into a u16 to look up an address in memory.
 * The 6502 is little-endian, so this expects the low-order byte first.
 * addr(0xCD, 0xAB) returns 0xABCD.
 */
pub fn addr(lo_byte: u8, hi_byte: u8) -> u16 {
    ((hi_byte as u16) << 8) | (lo_byte as u16)
}

/**
 * Zero-page address operations take a single-byte and result in an
 * address on the first page of memory, which has addresses that begin
 * with 0x00. If this is passed in 0xAB, it returns 0x00AB. In effect this
 * is just a cast, but wrapping it as a function makes the goal clearer.
 */
fn zero_page_addr(b1: u8) -> u16 {
    b1 as u16
}
