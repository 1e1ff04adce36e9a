use crate::config::{button_for_key, CONTROLLER_COUNT, FRAME_DURATION};
use crate::console::Console;
use crate::cpu::Button;
use crate::ppu::{render_frame, WriteBuffer};
use crate::simulator::{RenderRequester, SimulatorSignal};
use std::collections::HashSet;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Instant;
use winit::keyboard::Key;

/* if emulation falls this many frames behind the wall clock, stop trying to catch up */
const MAX_FRAMES_BEHIND: u32 = 4;

pub struct Scheduler {
    console: Console,
    receiver: Receiver<SimulatorSignal>,
    key_source: Arc<Mutex<HashSet<Key>>>,
    write_buffer: Arc<Mutex<WriteBuffer>>,
    render_requester: Arc<Mutex<RenderRequester>>,
}

impl Scheduler {
    pub fn new(
        console: Console,
        receiver: Receiver<SimulatorSignal>,
        key_source: Arc<Mutex<HashSet<Key>>>,
        write_buffer: Arc<Mutex<WriteBuffer>>,
        render_requester: Arc<Mutex<RenderRequester>>,
    ) -> Self {
        Scheduler {
            console,
            receiver,
            key_source,
            write_buffer,
            render_requester,
        }
    }

    /**
     * Runs frames at NTSC speed until told to stop. Input is sampled once per frame, before the
     * frame runs; each finished frame is converted to RGBA and the window asked to draw it.
     */
    pub fn simulate(&mut self) {
        let mut start_time = Instant::now();
        let mut frames: u32 = 0;

        loop {
            /* a dropped sender means the host is gone, which also ends the run */
            match self.receiver.try_recv() {
                Ok(SimulatorSignal::EndSimulation) | Err(TryRecvError::Disconnected) => return,
                Err(TryRecvError::Empty) => {}
            }

            self.apply_keys();
            if !self.console.run_frame() {
                log::error!(
                    "CPU stopped making progress at 0x{:04x}; emulation halted",
                    self.console.cpu().program_counter
                );
                /* leave the last frame up until the host shuts us down */
                let _ = self.receiver.recv();
                return;
            }
            self.present_frame();

            frames += 1;
            let now = Instant::now();
            let deadline = frame_deadline(start_time, frames);
            if now > frame_deadline(start_time, frames + MAX_FRAMES_BEHIND) {
                log::debug!("emulation running behind; resetting frame clock");
                start_time = now;
                frames = 0;
            } else {
                thread::sleep(deadline.saturating_duration_since(now));
            }
        }
    }

    /* presses exactly the buttons whose keys are currently held */
    fn apply_keys(&mut self) {
        let mut pressed = [[false; Button::ALL.len()]; CONTROLLER_COUNT];
        {
            let keys = self.key_source.lock().unwrap_or_else(PoisonError::into_inner);
            for key in keys.iter() {
                if let Some((port, button)) = button_for_key(key) {
                    pressed[port][button as usize] = true;
                }
            }
        }

        for (port, buttons) in pressed.iter().enumerate() {
            let controller = self.console.controller_mut(port);
            for button in Button::ALL {
                controller.set_button(button, buttons[button as usize]);
            }
        }
    }

    fn present_frame(&mut self) {
        {
            let mut write_buffer = self
                .write_buffer
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            render_frame(self.console.frame_buffer(), &mut write_buffer);
        }
        self.render_requester
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .request_redraw();
    }
}

/* when the given number of frames should have finished, counting from start_time */
fn frame_deadline(start_time: Instant, frames: u32) -> Instant {
    start_time + FRAME_DURATION * frames
}
