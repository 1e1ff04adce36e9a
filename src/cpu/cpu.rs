use crate::cpu::{
    addr, from_opcode, MemoryBus, StatusFlag, INITIAL_PC_LOCATION, IRQ_HANDLER_LOCATION,
    NMI_HANDLER_LOCATION, STACK_PAGE,
};

const POWER_ON_STACK_POINTER: u8 = 0xfd;

#[derive(Debug, Clone)]
pub struct CPU {
    pub accumulator: u8,
    pub index_x: u8,
    pub index_y: u8,
    pub s_register: u8,
    pub program_counter: u16,
    pub status: u8,
    nmi_pending: bool,
    cycles: u64,
}

impl Default for CPU {
    fn default() -> Self {
        CPU::new()
    }
}

impl CPU {
    pub fn new() -> CPU {
        CPU {
            accumulator: 0x00,
            index_x: 0x00,
            index_y: 0x00,
            s_register: POWER_ON_STACK_POINTER,
            program_counter: 0x0000,
            status: StatusFlag::InterruptDisable.mask() | StatusFlag::Unused.mask(),
            nmi_pending: false,
            cycles: 0,
        }
    }

    /* loads PC from the reset vector and resets S and P; A, X and Y keep their values */
    pub fn reset(&mut self, memory: &mut dyn MemoryBus) {
        self.program_counter = memory.read16(INITIAL_PC_LOCATION);
        self.s_register = POWER_ON_STACK_POINTER;
        self.status = StatusFlag::InterruptDisable.mask() | StatusFlag::Unused.mask();
        self.nmi_pending = false;
    }

    /**
     * Services a pending NMI, then runs one instruction. Returns the number of CPU cycles the
     * instruction took, including page-crossing, branch and DMA penalties. An opcode missing
     * from the decode table is logged and consumes nothing: zero cycles, PC unchanged.
     */
    pub fn step(&mut self, memory: &mut dyn MemoryBus) -> u16 {
        if self.nmi_pending {
            self.trigger_nmi(memory);
        }

        let operation_loc = self.program_counter;
        let opcode = memory.read(operation_loc);
        let Some(realized) = from_opcode(opcode) else {
            log::warn!("unimplemented opcode 0x{opcode:02x} at 0x{operation_loc:04x}");
            return 0;
        };

        let length = realized.addr_mode.get_bytes();
        let byte1 = if length > 1 {
            memory.read(operation_loc.wrapping_add(1))
        } else {
            0
        };
        let byte2 = if length > 2 {
            memory.read(operation_loc.wrapping_add(2))
        } else {
            0
        };

        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{}", self.trace_line(opcode, byte1, byte2));
        }

        let operand = realized.addr_mode.resolve(self, memory, byte1, byte2);
        self.program_counter = operation_loc.wrapping_add(length);

        let extra_cycles =
            realized
                .instruction
                .apply(self, memory, &realized.addr_mode, &operand);
        let mut cycles = realized.cycles + extra_cycles;

        let stall = memory.take_stall_cycles();
        if stall > 0 {
            /* DMA waits an extra cycle to align when it starts on an odd cycle */
            let odd = (self.cycles + cycles as u64) % 2 == 1;
            cycles += stall + odd as u16;
        }

        self.cycles += cycles as u64;
        cycles
    }

    pub fn set_nmi(&mut self, value: bool) {
        self.nmi_pending = value;
    }

    pub fn nmi_set(&self) -> bool {
        self.nmi_pending
    }

    /* total cycles executed since power-on */
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /* bit 5 has no storage and always reads back as 1 */
    pub fn status_byte(&self) -> u8 {
        self.status | StatusFlag::Unused.mask()
    }

    pub fn set_status_byte(&mut self, value: u8) {
        self.status = value | StatusFlag::Unused.mask();
    }

    pub fn update_flag(&mut self, flag: StatusFlag, new_val: bool) {
        flag.update_bool(self, new_val);
    }

    pub fn update_zero_neg_flags(&mut self, new_val: u8) {
        self.update_flag(StatusFlag::Zero, new_val == 0);
        self.update_flag(StatusFlag::Negative, new_val & 0x80 != 0);
    }

    pub fn push(&mut self, memory: &mut dyn MemoryBus, data: u8) {
        memory.write(addr(self.s_register, STACK_PAGE), data);
        self.s_register = self.s_register.wrapping_sub(1);
    }

    pub fn pop(&mut self, memory: &mut dyn MemoryBus) -> u8 {
        self.s_register = self.s_register.wrapping_add(1);
        memory.read(addr(self.s_register, STACK_PAGE))
    }

    pub fn push_memory_loc(&mut self, memory: &mut dyn MemoryBus, mem_loc: u16) {
        self.push(memory, (mem_loc >> 8) as u8);
        self.push(memory, (mem_loc & 0xff) as u8);
    }

    pub fn pop_memory_loc(&mut self, memory: &mut dyn MemoryBus) -> u16 {
        let lower = self.pop(memory);
        let upper = self.pop(memory);

        addr(lower, upper)
    }

    /* BRK: like an IRQ, but the pushed status has B set */
    pub fn irq_with_offset(&mut self, memory: &mut dyn MemoryBus, offset: u8) {
        self.push_memory_loc(memory, self.program_counter.wrapping_add(offset as u16));
        self.push(memory, self.status_byte() | StatusFlag::Break.mask());
        self.update_flag(StatusFlag::InterruptDisable, true);
        self.program_counter = memory.read16(IRQ_HANDLER_LOCATION);
    }

    fn trigger_nmi(&mut self, memory: &mut dyn MemoryBus) {
        self.nmi_pending = false;
        /* push PC onto stack */
        self.push_memory_loc(memory, self.program_counter);
        /* push processor status register on stack, B clear */
        self.push(memory, self.status_byte() & !StatusFlag::Break.mask());
        self.update_flag(StatusFlag::InterruptDisable, true);
        /* read NMI handler address from 0xFFFA/0xFFFB and jump to that address */
        self.program_counter = memory.read16(NMI_HANDLER_LOCATION);
    }

    fn trace_line(&self, opcode: u8, byte1: u8, byte2: u8) -> String {
        let (mnemonic, length) = match from_opcode(opcode) {
            Some(realized) => (
                format!("{:?} {:?}", realized.instruction, realized.addr_mode),
                realized.addr_mode.get_bytes(),
            ),
            None => (String::from("???"), 1),
        };
        let operand_bytes = match length {
            3 => format!("{byte1:02X} {byte2:02X}"),
            2 => format!("{byte1:02X}   "),
            _ => String::from("     "),
        };
        format!(
            "{:04X}  {:02X} {}  {:<20} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.program_counter,
            opcode,
            operand_bytes,
            mnemonic,
            self.accumulator,
            self.index_x,
            self.index_y,
            self.status_byte(),
            self.s_register,
            self.cycles
        )
    }
}
