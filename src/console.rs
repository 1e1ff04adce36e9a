use crate::config::CONTROLLER_COUNT;
use crate::cpu::{Controller, CoreMemory, SharedItems, SystemBus, CPU};
use crate::mapper::{load_mapper, Mapper};
use crate::ppu::{FrameBuffer, PPU};
use crate::rom::{Rom, RomError};

/* NTSC runs the PPU off a clock three times the CPU's */
pub const PPU_DOTS_PER_CPU_CYCLE: u32 = 3;

/**
 * The whole machine. Owns every component; the CPU only ever sees the others through a SystemBus
 * built for the length of one instruction, and the PPU reaches the CPU only through the NMI line
 * the console forwards after each dot.
 */
pub struct Console {
    cpu: CPU,
    memory: CoreMemory,
    ppu: PPU,
    mapper: Box<dyn Mapper>,
    controllers: [Controller; CONTROLLER_COUNT],
}

impl Console {
    pub fn from_rom(rom: Rom) -> Result<Console, RomError> {
        let mapper = load_mapper(rom)?;
        let mut console = Console {
            cpu: CPU::new(),
            memory: CoreMemory::new(),
            ppu: PPU::new(),
            mapper,
            controllers: [Controller::new(), Controller::new()],
        };
        console.reset();
        Ok(console)
    }

    /* the reset button: CPU jumps through the reset vector, PPU goes back to the pre-render line */
    pub fn reset(&mut self) {
        let (cpu, mut bus) = self.split();
        cpu.reset(&mut bus);
        self.ppu.reset();
        log::debug!("reset; PC = 0x{:04x}", self.cpu.program_counter);
    }

    /**
     * Runs one CPU instruction and then the PPU for three dots per cycle it took, passing any NMI
     * the PPU raises back to the CPU for the next step. Returns the CPU cycles consumed; zero
     * means the CPU hit an opcode it can't execute and made no progress.
     */
    pub fn step(&mut self) -> u16 {
        let cycles = {
            let (cpu, mut bus) = self.split();
            cpu.step(&mut bus)
        };

        for _ in 0..cycles as u32 * PPU_DOTS_PER_CPU_CYCLE {
            self.ppu.tick(&*self.mapper);
            if self.ppu.poll_nmi() {
                self.cpu.set_nmi(true);
            }
        }
        cycles
    }

    /* steps until the PPU enters vblank. false if the CPU stopped making progress first */
    pub fn run_frame(&mut self) -> bool {
        loop {
            if self.step() == 0 {
                return false;
            }
            if self.ppu.take_frame_complete() {
                return true;
            }
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        self.ppu.frame_buffer()
    }

    pub fn frame_count(&self) -> u64 {
        self.ppu.frame_count()
    }

    pub fn controller_mut(&mut self, port: usize) -> &mut Controller {
        &mut self.controllers[port]
    }

    pub fn cpu(&self) -> &CPU {
        &self.cpu
    }

    pub fn ppu(&self) -> &PPU {
        &self.ppu
    }

    /* borrows the CPU and a bus over everything else at the same time */
    fn split(&mut self) -> (&mut CPU, SystemBus<'_>) {
        let bus = self.memory.bus(SharedItems {
            ppu: &mut self.ppu,
            mapper: &mut *self.mapper,
            controllers: &mut self.controllers,
        });
        (&mut self.cpu, bus)
    }
}
