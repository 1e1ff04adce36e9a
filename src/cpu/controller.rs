pub const CONTROLLER_1_ADDRESS: u16 = 0x4016;
pub const CONTROLLER_2_ADDRESS: u16 = 0x4017;

/* in the order the shift register reports them */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    fn mask(&self) -> u8 {
        1 << (*self as u8)
    }
}

/**
 * A standard pad. Writing 1 to the strobe keeps reloading the shift register from the live
 * buttons (so reads keep returning A); writing 0 freezes it and each read then shifts out the
 * next button, A first. Once all eight are out, reads return 1.
 */
#[derive(Debug, Default, Clone)]
pub struct Controller {
    buttons: u8,
    latched: u8,
    read_index: u8,
    strobe: bool,
}

impl Controller {
    pub fn new() -> Controller {
        Controller::default()
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.buttons |= button.mask();
        } else {
            self.buttons &= !button.mask();
        }
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.buttons & button.mask() != 0
    }

    pub fn write_strobe(&mut self, value: u8) {
        self.strobe = value & 1 != 0;
        if self.strobe {
            self.read_index = 0;
        } else {
            self.latched = self.buttons;
        }
    }

    pub fn read_state(&mut self) -> u8 {
        if self.strobe {
            return self.buttons & 1;
        }
        if self.read_index >= 8 {
            return 1;
        }
        let bit = (self.latched >> self.read_index) & 1;
        self.read_index += 1;
        bit
    }
}
