use std::sync::Arc;
use winit::window::Window;

/**
 * Lets the emulation thread poke the window when a new frame is ready. Until the window exists
 * (or when there is none, as in tests) requests go nowhere.
 */
#[derive(Default)]
pub struct RenderRequester {
    window: Option<Arc<Window>>,
}

impl RenderRequester {
    pub fn new() -> RenderRequester {
        RenderRequester::default()
    }

    pub fn set_window(&mut self, window: Arc<Window>) {
        self.window = Some(window);
    }

    pub fn request_redraw(&self) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
