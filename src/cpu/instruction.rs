use crate::cpu::{AddressingMode, MemoryBus, Operand, StatusFlag, CPU};
use std::sync::OnceLock;
use AddressingMode::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /* loads set N and Z from the value; stores touch no flags */
    LDA, LDX, LDY,
    STA, STX, STY,

    /* register moves; all but TXS set N and Z */
    TAX, TAY, TSX, TXS, TXA, TYA,

    /* register minus operand, result discarded: C, Z and N only */
    CMP, CPX, CPY,

    /* relative branches on a single flag */
    BCC, BCS, BEQ, BMI, BNE, BPL, BVC, BVS,

    /* read-modify-write on memory, or a plain register step */
    DEC, DEX, DEY, INC, INX, INY,

    /* logic and shifts */
    AND, ORA, EOR, BIT,
    ASL, LSR, ROL, ROR,

    /* binary mode only: the 2A03 has no decimal circuitry */
    ADC, SBC,

    /* flag set/clear */
    CLC, CLD, CLI, CLV,
    SEC, SED, SEI,

    PHA, PHP, PLA, PLP,

    /* control flow */
    JMP, JSR, RTS, RTI,
    BRK,
    NOP,
}

impl Instruction {
    /**
     * Executes the instruction against an already-resolved operand. The program counter has
     * already moved past the instruction. Returns any cycles owed beyond the opcode's base count.
     */
    pub fn apply(
        &self,
        cpu: &mut CPU,
        memory: &mut dyn MemoryBus,
        addr_mode: &AddressingMode,
        operand: &Operand,
    ) -> u16 {
        let mut extra_cycles = 0;
        match self {
            Instruction::ADC => {
                let val =
                    addr_mode.deref_check_boundary_cross(cpu, memory, operand, &mut extra_cycles);
                add_with_carry_and_update(cpu, val);
            }
            Instruction::AND => {
                let mem_val =
                    addr_mode.deref_check_boundary_cross(cpu, memory, operand, &mut extra_cycles);
                cpu.accumulator &= mem_val;
                cpu.update_zero_neg_flags(cpu.accumulator);
            }
            Instruction::ASL => {
                let old_val = addr_mode.deref(cpu, memory, operand);
                let result = old_val << 1;
                cpu.update_flag(StatusFlag::Carry, old_val & 0x80 != 0);
                cpu.update_zero_neg_flags(result);
                addr_mode.write(cpu, memory, operand, result);
            }
            Instruction::BCC => {
                extra_cycles += Self::branch_instr(cpu, StatusFlag::Carry, false, operand);
            }
            Instruction::BCS => {
                extra_cycles += Self::branch_instr(cpu, StatusFlag::Carry, true, operand);
            }
            Instruction::BEQ => {
                extra_cycles += Self::branch_instr(cpu, StatusFlag::Zero, true, operand);
            }
            Instruction::BIT => {
                let mem = addr_mode.deref(cpu, memory, operand);
                cpu.update_flag(StatusFlag::Zero, cpu.accumulator & mem == 0);
                cpu.update_flag(StatusFlag::Overflow, mem & 0x40 != 0);
                cpu.update_flag(StatusFlag::Negative, mem & 0x80 != 0);
            }
            Instruction::BMI => {
                extra_cycles += Self::branch_instr(cpu, StatusFlag::Negative, true, operand);
            }
            Instruction::BNE => {
                extra_cycles += Self::branch_instr(cpu, StatusFlag::Zero, false, operand);
            }
            Instruction::BPL => {
                extra_cycles += Self::branch_instr(cpu, StatusFlag::Negative, false, operand);
            }
            Instruction::BRK => {
                /* PC is past the opcode; BRK skips a padding byte too */
                cpu.irq_with_offset(memory, 1);
            }
            Instruction::BVC => {
                extra_cycles += Self::branch_instr(cpu, StatusFlag::Overflow, false, operand);
            }
            Instruction::BVS => {
                extra_cycles += Self::branch_instr(cpu, StatusFlag::Overflow, true, operand);
            }
            Instruction::CLC => {
                cpu.update_flag(StatusFlag::Carry, false);
            }
            Instruction::CLD => {
                cpu.update_flag(StatusFlag::Decimal, false);
            }
            Instruction::CLI => {
                cpu.update_flag(StatusFlag::InterruptDisable, false);
            }
            Instruction::CLV => {
                cpu.update_flag(StatusFlag::Overflow, false);
            }
            Instruction::CMP => {
                let register = cpu.accumulator;
                Self::compare(cpu, memory, addr_mode, operand, register, &mut extra_cycles);
            }
            Instruction::CPX => {
                let register = cpu.index_x;
                Self::compare(cpu, memory, addr_mode, operand, register, &mut extra_cycles);
            }
            Instruction::CPY => {
                let register = cpu.index_y;
                Self::compare(cpu, memory, addr_mode, operand, register, &mut extra_cycles);
            }
            Instruction::DEC => {
                let new_val = addr_mode.deref(cpu, memory, operand).wrapping_sub(1);
                addr_mode.write(cpu, memory, operand, new_val);
                cpu.update_zero_neg_flags(new_val);
            }
            Instruction::DEX => {
                cpu.index_x = cpu.index_x.wrapping_sub(1);
                cpu.update_zero_neg_flags(cpu.index_x);
            }
            Instruction::DEY => {
                cpu.index_y = cpu.index_y.wrapping_sub(1);
                cpu.update_zero_neg_flags(cpu.index_y);
            }
            Instruction::EOR => {
                let mem_val =
                    addr_mode.deref_check_boundary_cross(cpu, memory, operand, &mut extra_cycles);
                cpu.accumulator ^= mem_val;
                cpu.update_zero_neg_flags(cpu.accumulator);
            }
            Instruction::INC => {
                let new_val = addr_mode.deref(cpu, memory, operand).wrapping_add(1);
                addr_mode.write(cpu, memory, operand, new_val);
                cpu.update_zero_neg_flags(new_val);
            }
            Instruction::INX => {
                cpu.index_x = cpu.index_x.wrapping_add(1);
                cpu.update_zero_neg_flags(cpu.index_x);
            }
            Instruction::INY => {
                cpu.index_y = cpu.index_y.wrapping_add(1);
                cpu.update_zero_neg_flags(cpu.index_y);
            }
            Instruction::JMP => {
                cpu.program_counter = operand.address;
            }
            Instruction::JSR => {
                /* pushes the address of JSR's own last byte; RTS adds the one back */
                let return_addr = cpu.program_counter.wrapping_sub(1);
                cpu.push_memory_loc(memory, return_addr);
                cpu.program_counter = operand.address;
            }
            Instruction::LDA => {
                cpu.accumulator =
                    addr_mode.deref_check_boundary_cross(cpu, memory, operand, &mut extra_cycles);
                cpu.update_zero_neg_flags(cpu.accumulator);
            }
            Instruction::LDX => {
                cpu.index_x =
                    addr_mode.deref_check_boundary_cross(cpu, memory, operand, &mut extra_cycles);
                cpu.update_zero_neg_flags(cpu.index_x);
            }
            Instruction::LDY => {
                cpu.index_y =
                    addr_mode.deref_check_boundary_cross(cpu, memory, operand, &mut extra_cycles);
                cpu.update_zero_neg_flags(cpu.index_y);
            }
            Instruction::LSR => {
                let old_val = addr_mode.deref(cpu, memory, operand);
                let result = old_val >> 1;
                cpu.update_flag(StatusFlag::Carry, old_val & 0x01 != 0);
                cpu.update_zero_neg_flags(result);
                addr_mode.write(cpu, memory, operand, result);
            }
            Instruction::NOP => {}
            Instruction::ORA => {
                let mem_val =
                    addr_mode.deref_check_boundary_cross(cpu, memory, operand, &mut extra_cycles);
                cpu.accumulator |= mem_val;
                cpu.update_zero_neg_flags(cpu.accumulator);
            }
            Instruction::PHA => {
                cpu.push(memory, cpu.accumulator);
            }
            Instruction::PHP => {
                /* B and bit 5 are always set in the pushed copy */
                let status = cpu.status_byte() | StatusFlag::Break.mask();
                cpu.push(memory, status);
            }
            Instruction::PLA => {
                cpu.accumulator = cpu.pop(memory);
                cpu.update_zero_neg_flags(cpu.accumulator);
            }
            Instruction::PLP => {
                let status = cpu.pop(memory);
                cpu.set_status_byte(status & !StatusFlag::Break.mask());
            }
            Instruction::ROL => {
                let old_val = addr_mode.deref(cpu, memory, operand);
                let result = (old_val << 1) | StatusFlag::Carry.as_num(cpu);
                cpu.update_flag(StatusFlag::Carry, old_val & 0x80 != 0);
                cpu.update_zero_neg_flags(result);
                addr_mode.write(cpu, memory, operand, result);
            }
            Instruction::ROR => {
                let old_val = addr_mode.deref(cpu, memory, operand);
                let result = (old_val >> 1) | (StatusFlag::Carry.as_num(cpu) << 7);
                cpu.update_flag(StatusFlag::Carry, old_val & 0x01 != 0);
                cpu.update_zero_neg_flags(result);
                addr_mode.write(cpu, memory, operand, result);
            }
            Instruction::RTI => {
                let status = cpu.pop(memory);
                cpu.set_status_byte(status & !StatusFlag::Break.mask());
                cpu.program_counter = cpu.pop_memory_loc(memory);
            }
            Instruction::RTS => {
                cpu.program_counter = cpu.pop_memory_loc(memory).wrapping_add(1);
            }
            Instruction::SBC => {
                let val =
                    addr_mode.deref_check_boundary_cross(cpu, memory, operand, &mut extra_cycles);
                subtract_with_carry_and_update(cpu, val);
            }
            Instruction::SEC => {
                cpu.update_flag(StatusFlag::Carry, true);
            }
            Instruction::SED => {
                cpu.update_flag(StatusFlag::Decimal, true);
            }
            Instruction::SEI => {
                cpu.update_flag(StatusFlag::InterruptDisable, true);
            }
            Instruction::STA => {
                let value = cpu.accumulator;
                addr_mode.write(cpu, memory, operand, value);
            }
            Instruction::STX => {
                let value = cpu.index_x;
                addr_mode.write(cpu, memory, operand, value);
            }
            Instruction::STY => {
                let value = cpu.index_y;
                addr_mode.write(cpu, memory, operand, value);
            }
            Instruction::TAX => {
                cpu.index_x = cpu.accumulator;
                cpu.update_zero_neg_flags(cpu.index_x);
            }
            Instruction::TAY => {
                cpu.index_y = cpu.accumulator;
                cpu.update_zero_neg_flags(cpu.index_y);
            }
            Instruction::TSX => {
                cpu.index_x = cpu.s_register;
                cpu.update_zero_neg_flags(cpu.index_x);
            }
            Instruction::TXA => {
                cpu.accumulator = cpu.index_x;
                cpu.update_zero_neg_flags(cpu.accumulator);
            }
            Instruction::TXS => {
                cpu.s_register = cpu.index_x;
            }
            Instruction::TYA => {
                cpu.accumulator = cpu.index_y;
                cpu.update_zero_neg_flags(cpu.accumulator);
            }
        }

        extra_cycles
    }

    /* a taken branch costs one cycle, two if it lands on another page */
    fn branch_instr(cpu: &mut CPU, flag: StatusFlag, branch_if: bool, operand: &Operand) -> u16 {
        if flag.is_set(cpu) != branch_if {
            return 0;
        }
        let next_instruction = cpu.program_counter;
        cpu.program_counter = operand.address;
        if next_instruction & 0xff00 != operand.address & 0xff00 {
            2
        } else {
            1
        }
    }

    fn compare(
        cpu: &mut CPU,
        memory: &mut dyn MemoryBus,
        addr_mode: &AddressingMode,
        operand: &Operand,
        register: u8,
        extra_cycles: &mut u16,
    ) {
        let mem_val = addr_mode.deref_check_boundary_cross(cpu, memory, operand, extra_cycles);
        cpu.update_flag(StatusFlag::Carry, register >= mem_val);
        cpu.update_zero_neg_flags(register.wrapping_sub(mem_val));
    }
}

/* decimal mode doesn't exist on the 2A03, so neither of these looks at D */
fn add_with_carry_and_update(cpu: &mut CPU, val: u8) {
    let acc = cpu.accumulator;
    let sum = acc as u16 + val as u16 + StatusFlag::Carry.as_num(cpu) as u16;
    let result = sum as u8;
    cpu.update_flag(StatusFlag::Carry, sum > 0xff);
    cpu.update_flag(StatusFlag::Overflow, !(acc ^ val) & (acc ^ result) & 0x80 != 0);
    cpu.accumulator = result;
    cpu.update_zero_neg_flags(result);
}

fn subtract_with_carry_and_update(cpu: &mut CPU, val: u8) {
    let acc = cpu.accumulator;
    let borrow = 1 - StatusFlag::Carry.as_num(cpu) as i16;
    let difference = acc as i16 - val as i16 - borrow;
    let result = difference as u8;
    cpu.update_flag(StatusFlag::Carry, difference >= 0);
    cpu.update_flag(StatusFlag::Overflow, (acc ^ val) & (acc ^ result) & 0x80 != 0);
    cpu.accumulator = result;
    cpu.update_zero_neg_flags(result);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealizedInstruction {
    pub instruction: Instruction,
    pub addr_mode: AddressingMode,
    pub cycles: u16,
}

static OPCODE_TABLE: OnceLock<[Option<RealizedInstruction>; 256]> = OnceLock::new();

/* the decode entry for an opcode, or None for anything outside the documented set */
pub fn from_opcode(opcode: u8) -> Option<&'static RealizedInstruction> {
    OPCODE_TABLE.get_or_init(build_opcode_table)[opcode as usize].as_ref()
}

fn build_opcode_table() -> [Option<RealizedInstruction>; 256] {
    let mut table = [None; 256];
    for (opcode, entry) in table.iter_mut().enumerate() {
        *entry = decode(opcode as u8).map(|(instruction, addr_mode, cycles)| RealizedInstruction {
            instruction,
            addr_mode,
            cycles,
        });
    }
    table
}

fn decode(opcode: u8) -> Option<(Instruction, AddressingMode, u16)> {
    let decoded = match opcode {
        /* instructions marked 'boundary' take a cycle longer when indexing crosses a page */
        /* branch instructions also take an extra cycle if branch taken */
        0x00 => (Instruction::BRK, Implicit, 7),
        0x01 => (Instruction::ORA, IndirectX, 6),
        0x05 => (Instruction::ORA, ZeroPage, 3),
        0x06 => (Instruction::ASL, ZeroPage, 5),
        0x08 => (Instruction::PHP, Implicit, 3),
        0x09 => (Instruction::ORA, Immediate, 2),
        0x0a => (Instruction::ASL, Accumulator, 2),
        0x0d => (Instruction::ORA, Absolute, 4),
        0x0e => (Instruction::ASL, Absolute, 6),
        0x10 => (Instruction::BPL, Relative, 2),
        0x11 => (Instruction::ORA, IndirectY, 5), /*boundary*/
        0x15 => (Instruction::ORA, ZeroPageX, 4),
        0x16 => (Instruction::ASL, ZeroPageX, 6),
        0x18 => (Instruction::CLC, Implicit, 2),
        0x19 => (Instruction::ORA, AbsoluteY, 4), /*boundary*/
        0x1d => (Instruction::ORA, AbsoluteX, 4), /*boundary*/
        0x1e => (Instruction::ASL, AbsoluteX, 7),
        0x20 => (Instruction::JSR, Absolute, 6),
        0x21 => (Instruction::AND, IndirectX, 6),
        0x24 => (Instruction::BIT, ZeroPage, 3),
        0x25 => (Instruction::AND, ZeroPage, 3),
        0x26 => (Instruction::ROL, ZeroPage, 5),
        0x28 => (Instruction::PLP, Implicit, 4),
        0x29 => (Instruction::AND, Immediate, 2),
        0x2a => (Instruction::ROL, Accumulator, 2),
        0x2c => (Instruction::BIT, Absolute, 4),
        0x2d => (Instruction::AND, Absolute, 4),
        0x2e => (Instruction::ROL, Absolute, 6),
        0x30 => (Instruction::BMI, Relative, 2),
        0x31 => (Instruction::AND, IndirectY, 5), /*boundary*/
        0x35 => (Instruction::AND, ZeroPageX, 4),
        0x36 => (Instruction::ROL, ZeroPageX, 6),
        0x38 => (Instruction::SEC, Implicit, 2),
        0x39 => (Instruction::AND, AbsoluteY, 4), /*boundary*/
        0x3d => (Instruction::AND, AbsoluteX, 4), /*boundary*/
        0x3e => (Instruction::ROL, AbsoluteX, 7),
        0x40 => (Instruction::RTI, Implicit, 6),
        0x41 => (Instruction::EOR, IndirectX, 6),
        0x45 => (Instruction::EOR, ZeroPage, 3),
        0x46 => (Instruction::LSR, ZeroPage, 5),
        0x48 => (Instruction::PHA, Implicit, 3),
        0x49 => (Instruction::EOR, Immediate, 2),
        0x4a => (Instruction::LSR, Accumulator, 2),
        0x4c => (Instruction::JMP, Absolute, 3),
        0x4d => (Instruction::EOR, Absolute, 4),
        0x4e => (Instruction::LSR, Absolute, 6),
        0x50 => (Instruction::BVC, Relative, 2),
        0x51 => (Instruction::EOR, IndirectY, 5), /*boundary*/
        0x55 => (Instruction::EOR, ZeroPageX, 4),
        0x56 => (Instruction::LSR, ZeroPageX, 6),
        0x58 => (Instruction::CLI, Implicit, 2),
        0x59 => (Instruction::EOR, AbsoluteY, 4), /*boundary*/
        0x5d => (Instruction::EOR, AbsoluteX, 4), /*boundary*/
        0x5e => (Instruction::LSR, AbsoluteX, 7),
        0x60 => (Instruction::RTS, Implicit, 6),
        0x61 => (Instruction::ADC, IndirectX, 6),
        0x65 => (Instruction::ADC, ZeroPage, 3),
        0x66 => (Instruction::ROR, ZeroPage, 5),
        0x68 => (Instruction::PLA, Implicit, 4),
        0x69 => (Instruction::ADC, Immediate, 2),
        0x6a => (Instruction::ROR, Accumulator, 2),
        0x6c => (Instruction::JMP, Indirect, 5),
        0x6d => (Instruction::ADC, Absolute, 4),
        0x6e => (Instruction::ROR, Absolute, 6),
        0x70 => (Instruction::BVS, Relative, 2),
        0x71 => (Instruction::ADC, IndirectY, 5), /*boundary*/
        0x75 => (Instruction::ADC, ZeroPageX, 4),
        0x76 => (Instruction::ROR, ZeroPageX, 6),
        0x78 => (Instruction::SEI, Implicit, 2),
        0x79 => (Instruction::ADC, AbsoluteY, 4), /*boundary*/
        0x7d => (Instruction::ADC, AbsoluteX, 4), /*boundary*/
        0x7e => (Instruction::ROR, AbsoluteX, 7),
        0x81 => (Instruction::STA, IndirectX, 6),
        0x84 => (Instruction::STY, ZeroPage, 3),
        0x85 => (Instruction::STA, ZeroPage, 3),
        0x86 => (Instruction::STX, ZeroPage, 3),
        0x88 => (Instruction::DEY, Implicit, 2),
        0x8a => (Instruction::TXA, Implicit, 2),
        0x8c => (Instruction::STY, Absolute, 4),
        0x8d => (Instruction::STA, Absolute, 4),
        0x8e => (Instruction::STX, Absolute, 4),
        0x90 => (Instruction::BCC, Relative, 2),
        0x91 => (Instruction::STA, IndirectY, 6),
        0x94 => (Instruction::STY, ZeroPageX, 4),
        0x95 => (Instruction::STA, ZeroPageX, 4),
        0x96 => (Instruction::STX, ZeroPageY, 4),
        0x98 => (Instruction::TYA, Implicit, 2),
        0x99 => (Instruction::STA, AbsoluteY, 5),
        0x9a => (Instruction::TXS, Implicit, 2),
        0x9d => (Instruction::STA, AbsoluteX, 5),
        0xa0 => (Instruction::LDY, Immediate, 2),
        0xa1 => (Instruction::LDA, IndirectX, 6),
        0xa2 => (Instruction::LDX, Immediate, 2),
        0xa4 => (Instruction::LDY, ZeroPage, 3),
        0xa5 => (Instruction::LDA, ZeroPage, 3),
        0xa6 => (Instruction::LDX, ZeroPage, 3),
        0xa8 => (Instruction::TAY, Implicit, 2),
        0xa9 => (Instruction::LDA, Immediate, 2),
        0xaa => (Instruction::TAX, Implicit, 2),
        0xac => (Instruction::LDY, Absolute, 4),
        0xad => (Instruction::LDA, Absolute, 4),
        0xae => (Instruction::LDX, Absolute, 4),
        0xb0 => (Instruction::BCS, Relative, 2),
        0xb1 => (Instruction::LDA, IndirectY, 5), /*boundary*/
        0xb4 => (Instruction::LDY, ZeroPageX, 4),
        0xb5 => (Instruction::LDA, ZeroPageX, 4),
        0xb6 => (Instruction::LDX, ZeroPageY, 4),
        0xb8 => (Instruction::CLV, Implicit, 2),
        0xb9 => (Instruction::LDA, AbsoluteY, 4), /*boundary*/
        0xba => (Instruction::TSX, Implicit, 2),
        0xbc => (Instruction::LDY, AbsoluteX, 4), /*boundary*/
        0xbd => (Instruction::LDA, AbsoluteX, 4), /*boundary*/
        0xbe => (Instruction::LDX, AbsoluteY, 4), /*boundary*/
        0xc0 => (Instruction::CPY, Immediate, 2),
        0xc1 => (Instruction::CMP, IndirectX, 6),
        0xc4 => (Instruction::CPY, ZeroPage, 3),
        0xc5 => (Instruction::CMP, ZeroPage, 3),
        0xc6 => (Instruction::DEC, ZeroPage, 5),
        0xc8 => (Instruction::INY, Implicit, 2),
        0xc9 => (Instruction::CMP, Immediate, 2),
        0xca => (Instruction::DEX, Implicit, 2),
        0xcc => (Instruction::CPY, Absolute, 4),
        0xcd => (Instruction::CMP, Absolute, 4),
        0xce => (Instruction::DEC, Absolute, 6),
        0xd0 => (Instruction::BNE, Relative, 2),
        0xd1 => (Instruction::CMP, IndirectY, 5), /*boundary*/
        0xd5 => (Instruction::CMP, ZeroPageX, 4),
        0xd6 => (Instruction::DEC, ZeroPageX, 6),
        0xd8 => (Instruction::CLD, Implicit, 2),
        0xd9 => (Instruction::CMP, AbsoluteY, 4), /*boundary*/
        0xdd => (Instruction::CMP, AbsoluteX, 4), /*boundary*/
        0xde => (Instruction::DEC, AbsoluteX, 7),
        0xe0 => (Instruction::CPX, Immediate, 2),
        0xe1 => (Instruction::SBC, IndirectX, 6),
        0xe4 => (Instruction::CPX, ZeroPage, 3),
        0xe5 => (Instruction::SBC, ZeroPage, 3),
        0xe6 => (Instruction::INC, ZeroPage, 5),
        0xe8 => (Instruction::INX, Implicit, 2),
        0xe9 => (Instruction::SBC, Immediate, 2),
        0xea => (Instruction::NOP, Implicit, 2),
        0xec => (Instruction::CPX, Absolute, 4),
        0xed => (Instruction::SBC, Absolute, 4),
        0xee => (Instruction::INC, Absolute, 6),
        0xf0 => (Instruction::BEQ, Relative, 2),
        0xf1 => (Instruction::SBC, IndirectY, 5), /*boundary*/
        0xf5 => (Instruction::SBC, ZeroPageX, 4),
        0xf6 => (Instruction::INC, ZeroPageX, 6),
        0xf8 => (Instruction::SED, Implicit, 2),
        0xf9 => (Instruction::SBC, AbsoluteY, 4), /*boundary*/
        0xfd => (Instruction::SBC, AbsoluteX, 4), /*boundary*/
        0xfe => (Instruction::INC, AbsoluteX, 7),
        _ => return None,
    };
    Some(decoded)
}
