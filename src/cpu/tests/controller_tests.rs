use crate::cpu::{Button, Controller};

#[test]
fn test_controller() {
    let mut controller = Controller::new();
    controller.set_button(Button::A, true);
    controller.set_button(Button::Start, true);

    controller.write_strobe(1);
    controller.write_strobe(0);
    /* make sure we got the write output */
    assert_eq!(controller.read_state(), 1); // A on
    assert_eq!(controller.read_state(), 0); // B off
    assert_eq!(controller.read_state(), 0); // select off
    assert_eq!(controller.read_state(), 1); // start on
    assert_eq!(controller.read_state(), 0); // up off
    assert_eq!(controller.read_state(), 0); // down off
    assert_eq!(controller.read_state(), 0); // left off
    assert_eq!(controller.read_state(), 0); // right off
    assert_eq!(controller.read_state(), 1); // will output 1 indefinitely
    assert_eq!(controller.read_state(), 1); // will output 1 indefinitely
}

#[test]
fn test_strobe_high_reports_a() {
    let mut controller = Controller::new();
    controller.write_strobe(1);
    assert_eq!(controller.read_state(), 0); // A off
    controller.set_button(Button::A, true);
    assert_eq!(controller.read_state(), 1); // live while strobe is high
    assert_eq!(controller.read_state(), 1); // doesn't advance
    controller.set_button(Button::B, true);
    assert_eq!(controller.read_state(), 1); // still only A

    controller.write_strobe(0);
    assert_eq!(controller.read_state(), 1); // A
    assert_eq!(controller.read_state(), 1); // B
}

#[test]
fn test_latched_after_strobe() {
    let mut controller = Controller::new();
    controller.set_button(Button::Right, true);
    controller.write_strobe(1);
    controller.write_strobe(0);
    controller.set_button(Button::Right, false); // too late, already latched
    controller.set_button(Button::A, true);
    for _ in 0..7 {
        assert_eq!(controller.read_state(), 0); // A through left, as latched
    }
    assert_eq!(controller.read_state(), 1); // right

    /* restrobing starts over with the current buttons */
    controller.write_strobe(1);
    controller.write_strobe(0);
    assert_eq!(controller.read_state(), 1); // A now pressed
    assert_eq!(controller.is_pressed(Button::Right), false);
}
