use clap::Parser;
use std::collections::HashSet;
use std::error::Error;
use std::sync::{Arc, Mutex};
use verdigris::config::{CPU_CLOCK_HZ, DEFAULT_SCALE};
use verdigris::simulator::ProgramState;
use verdigris::{Console, Rom};

mod window;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CommandLineArgs::parse();

    let rom = Rom::parse_file(&args.rom)?;
    let console = Console::from_rom(rom)?;

    if let Some(frames) = args.headless {
        run_headless(console, frames);
        return Ok(());
    }

    let keys = Arc::new(Mutex::new(HashSet::new()));
    let mut program_state = ProgramState::simulate_async(console, keys.clone());

    let result = window::initialize_ui(
        program_state.write_buffer.clone(),
        keys,
        program_state.render_requester.clone(),
        args.scale.max(1),
    );

    program_state.cleanup();
    Ok(result?)
}

/* runs flat out with no window, for checking that a ROM boots and renders deterministically */
fn run_headless(mut console: Console, frames: u64) {
    for _ in 0..frames {
        if !console.run_frame() {
            log::error!(
                "CPU stopped making progress at 0x{:04x} during frame {}",
                console.cpu().program_counter,
                console.frame_count()
            );
            break;
        }
    }

    /* FNV-1a over the palette indices of the last frame */
    let checksum = console
        .frame_buffer()
        .iter()
        .fold(0xcbf2_9ce4_8422_2325u64, |hash, &pixel| {
            (hash ^ pixel as u64).wrapping_mul(0x0100_0000_01b3)
        });
    let cycles = console.cpu().cycles();
    log::info!(
        "{} frames, {} CPU cycles ({:.2}s emulated), frame checksum {checksum:016x}",
        console.frame_count(),
        cycles,
        cycles as f64 / CPU_CLOCK_HZ as f64
    );
}

#[derive(Parser, Debug)]
#[command(version, about = "A Nintendo Entertainment System emulator", long_about = None)]
struct CommandLineArgs {
    /// iNES ROM file
    rom: String,

    /// integer window scale
    #[arg(short, long, default_value_t = DEFAULT_SCALE)]
    scale: u32,

    /// run this many frames without a window, then print a checksum of the last one
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,
}
