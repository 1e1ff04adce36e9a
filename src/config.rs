/* compile-time settings for the emulator and its host window */
use crate::cpu::Button;
use std::time::Duration;
use winit::keyboard::{Key, NamedKey};

pub const WINDOW_TITLE: &str = "Verdigris";
pub const DEFAULT_SCALE: u32 = 3;

/* NTSC: 1.789773 MHz CPU, 60.0988 frames per second */
pub const CPU_CLOCK_HZ: u64 = 1_789_773;
pub const FRAME_DURATION: Duration = Duration::from_nanos(16_639_267);

pub const CONTROLLER_COUNT: usize = 2;

/**
 * Maps a host key to the controller port and button it drives. Player one uses the arrow keys
 * with X/Z for A/B, Tab for select and Enter for start; player two uses WASD with K/J, U and I.
 */
pub fn button_for_key(key: &Key) -> Option<(usize, Button)> {
    match key {
        Key::Named(named) => match named {
            NamedKey::ArrowUp => Some((0, Button::Up)),
            NamedKey::ArrowDown => Some((0, Button::Down)),
            NamedKey::ArrowLeft => Some((0, Button::Left)),
            NamedKey::ArrowRight => Some((0, Button::Right)),
            NamedKey::Tab => Some((0, Button::Select)),
            NamedKey::Enter => Some((0, Button::Start)),
            _ => None,
        },
        Key::Character(c) => match c.to_ascii_lowercase().as_str() {
            "x" => Some((0, Button::A)),
            "z" => Some((0, Button::B)),
            "k" => Some((1, Button::A)),
            "j" => Some((1, Button::B)),
            "u" => Some((1, Button::Select)),
            "i" => Some((1, Button::Start)),
            "w" => Some((1, Button::Up)),
            "s" => Some((1, Button::Down)),
            "a" => Some((1, Button::Left)),
            "d" => Some((1, Button::Right)),
            _ => None,
        },
        _ => None,
    }
}
