use crate::cpu::{addr, zero_page_addr, MemoryBus, CPU};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implicit,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
}

/* where an instruction's operand lives, resolved before the program counter moves */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Operand {
    pub address: u16,
    /* indexing carried into the next page; some reads pay a cycle for it */
    pub page_crossed: bool,
}

impl Operand {
    fn at(address: u16) -> Operand {
        Operand {
            address,
            page_crossed: false,
        }
    }

    fn indexed(base: u16, index: u8) -> Operand {
        let address = base.wrapping_add(index as u16);
        Operand {
            address,
            page_crossed: base & 0xff00 != address & 0xff00,
        }
    }
}

impl AddressingMode {
    /* total instruction length including the opcode */
    pub fn get_bytes(&self) -> u16 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 1,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 2,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 3,
        }
    }

    /* behavior based on: https://www.nesdev.org/obelisk-6502-guide/addressing.html */
    pub fn resolve(
        &self,
        cpu: &CPU,
        memory: &mut dyn MemoryBus,
        byte1: u8,
        byte2: u8,
    ) -> Operand {
        let pc = cpu.program_counter;
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => Operand::default(),
            AddressingMode::Immediate => Operand::at(pc.wrapping_add(1)),
            AddressingMode::ZeroPage => Operand::at(zero_page_addr(byte1)),
            AddressingMode::ZeroPageX => {
                Operand::at(zero_page_addr(byte1.wrapping_add(cpu.index_x)))
            }
            AddressingMode::ZeroPageY => {
                Operand::at(zero_page_addr(byte1.wrapping_add(cpu.index_y)))
            }
            AddressingMode::Relative => {
                Operand::at(pc.wrapping_add(2).wrapping_add_signed(byte1 as i8 as i16))
            }
            AddressingMode::Absolute => Operand::at(addr(byte1, byte2)),
            AddressingMode::AbsoluteX => Operand::indexed(addr(byte1, byte2), cpu.index_x),
            AddressingMode::AbsoluteY => Operand::indexed(addr(byte1, byte2), cpu.index_y),
            /* only used for JMP */
            AddressingMode::Indirect => Operand::at(memory.read16_wrap_page(addr(byte1, byte2))),
            AddressingMode::IndirectX => {
                Operand::at(read_zero_page16(memory, byte1.wrapping_add(cpu.index_x)))
            }
            AddressingMode::IndirectY => {
                Operand::indexed(read_zero_page16(memory, byte1), cpu.index_y)
            }
        }
    }

    pub fn deref(&self, cpu: &CPU, memory: &mut dyn MemoryBus, operand: &Operand) -> u8 {
        match self {
            AddressingMode::Accumulator => cpu.accumulator,
            _ => memory.read(operand.address),
        }
    }

    /* as deref, but charges the extra cycle when indexing crossed a page */
    pub fn deref_check_boundary_cross(
        &self,
        cpu: &CPU,
        memory: &mut dyn MemoryBus,
        operand: &Operand,
        extra_cycles: &mut u16,
    ) -> u8 {
        if operand.page_crossed {
            *extra_cycles += 1;
        }
        self.deref(cpu, memory, operand)
    }

    pub fn write(&self, cpu: &mut CPU, memory: &mut dyn MemoryBus, operand: &Operand, value: u8) {
        match self {
            AddressingMode::Accumulator => cpu.accumulator = value,
            _ => memory.write(operand.address, value),
        }
    }
}

/* pointers stored in zero page wrap from 0xff back to 0x00 */
fn read_zero_page16(memory: &mut dyn MemoryBus, pointer: u8) -> u16 {
    let lo_byte = memory.read(zero_page_addr(pointer));
    let hi_byte = memory.read(zero_page_addr(pointer.wrapping_add(1)));
    addr(lo_byte, hi_byte)
}
