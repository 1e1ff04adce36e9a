/* runs a Console in real time on its own thread, handing frames and input across to the host */
pub mod program_state;

mod render_requester;
mod scheduler;

pub use program_state::ProgramState;
pub use render_requester::RenderRequester;

enum SimulatorSignal {
    EndSimulation,
}
