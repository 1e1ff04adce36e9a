use crate::cpu::{MemoryBus, CPU};

mod addressing_mode_tests;
mod controller_tests;
mod memory_tests;

/* a flat 64kb address space with no mirroring or devices */
pub(crate) struct TestMemory {
    memory: Box<[u8; 0x10000]>,
}

impl TestMemory {
    pub fn new() -> Self {
        TestMemory {
            memory: Box::new([0; 0x10000]),
        }
    }

    /* writes consecutive bytes starting at address */
    pub fn load(&mut self, address: u16, bytes: &[u8]) {
        for (i, byte) in bytes.iter().enumerate() {
            self.memory[address as usize + i] = *byte;
        }
    }
}

impl MemoryBus for TestMemory {
    fn read(&mut self, address: u16) -> u8 {
        self.memory[address as usize]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.memory[address as usize] = value;
    }
}

fn cpu_for_testing() -> (CPU, TestMemory) {
    let mut cpu = CPU::new();
    cpu.program_counter = 0x8000;
    (cpu, TestMemory::new())
}
