use crate::console::Console;
use crate::ppu::{WriteBuffer, WRITE_BUFFER_SIZE};
use crate::simulator::render_requester::RenderRequester;
use crate::simulator::scheduler::Scheduler;
use crate::simulator::SimulatorSignal;
use crate::simulator::SimulatorSignal::EndSimulation;
use std::collections::HashSet;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::thread::JoinHandle;
use winit::keyboard::Key;

/**
 * The host's handle on a running emulator. The Console itself moves onto a background thread and
 * never comes back; the host only sees the shared pieces: the keys it fills in, the RGBA frame
 * the emulator writes out, and the requester used to wake the window.
 */
pub struct ProgramState {
    /* inputs */
    pub render_requester: Arc<Mutex<RenderRequester>>,
    pub key_source: Arc<Mutex<HashSet<Key>>>,

    /* outputs */
    pub write_buffer: Arc<Mutex<WriteBuffer>>,
    thread_handle: Option<JoinHandle<()>>,

    /* communication */
    thread_sender: Sender<SimulatorSignal>,
}

impl ProgramState {
    pub fn simulate_async(console: Console, key_source: Arc<Mutex<HashSet<Key>>>) -> ProgramState {
        let write_buffer = Arc::new(Mutex::new([0; WRITE_BUFFER_SIZE]));
        let render_requester = Arc::new(Mutex::new(RenderRequester::new()));

        let (thread_sender, thread_receiver) = channel::<SimulatorSignal>();

        let mut result = ProgramState {
            key_source,
            write_buffer,
            render_requester,
            thread_sender,
            thread_handle: None,
        };

        result.simulate_async_internal(console, thread_receiver);

        result
    }

    fn simulate_async_internal(
        &mut self,
        console: Console,
        thread_receiver: Receiver<SimulatorSignal>,
    ) {
        let mut scheduler = Scheduler::new(
            console,
            thread_receiver,
            self.key_source.clone(),
            self.write_buffer.clone(),
            self.render_requester.clone(),
        );

        self.thread_handle = Some(thread::spawn(move || {
            log::info!("emulation thread started");
            scheduler.simulate();
            log::info!("emulation thread stopped");
        }));
    }

    pub fn is_running(&self) -> bool {
        self.thread_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /* stops the emulation thread and waits for it; safe to call more than once */
    pub fn cleanup(&mut self) {
        if let Some(thread_handle) = self.thread_handle.take() {
            /* tell the simulator thread to stop simulating. if it already exited, that's fine */
            if self.thread_sender.send(EndSimulation).is_err() {
                log::debug!("emulation thread already gone");
            }

            if let Err(panic) = thread_handle.join() {
                log::error!("emulation thread panicked: {panic:?}");
            }
        }
    }
}

impl Drop for ProgramState {
    fn drop(&mut self) {
        self.cleanup();
    }
}
