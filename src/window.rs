use pixels::{Pixels, SurfaceTexture};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use verdigris::config::WINDOW_TITLE;
use verdigris::ppu::{WriteBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use verdigris::simulator::RenderRequester;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::EventLoopError;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};

struct WindowApp {
    write_buffer: Arc<Mutex<WriteBuffer>>,
    keys: Arc<Mutex<HashSet<Key>>>,
    render_requester: Arc<Mutex<RenderRequester>>,
    scale: u32,
    pixels: Option<Pixels<'static>>,
    window: Option<Arc<Window>>,
}

impl WindowApp {
    fn new(
        write_buffer: Arc<Mutex<WriteBuffer>>,
        keys: Arc<Mutex<HashSet<Key>>>,
        render_requester: Arc<Mutex<RenderRequester>>,
        scale: u32,
    ) -> Self {
        Self {
            write_buffer,
            keys,
            render_requester,
            scale,
            pixels: None,
            window: None,
        }
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<(), String> {
        let size = LogicalSize::new(
            DISPLAY_WIDTH as u32 * self.scale,
            DISPLAY_HEIGHT as u32 * self.scale,
        );
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title(WINDOW_TITLE)
                        .with_inner_size(size)
                        .with_min_inner_size(LogicalSize::new(
                            DISPLAY_WIDTH as u32,
                            DISPLAY_HEIGHT as u32,
                        )),
                )
                .map_err(|e| format!("unable to create window: {e}"))?,
        );

        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        let pixels = Pixels::new(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32, surface_texture)
            .map_err(|e| format!("unable to create drawing surface: {e}"))?;

        /* from here on the emulation thread can ask for redraws */
        self.render_requester
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_window(window.clone());
        window.request_redraw();

        self.pixels = Some(pixels);
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self) {
        let Some(pixels) = self.pixels.as_mut() else {
            return;
        };
        pixels.frame_mut().copy_from_slice(
            &*self
                .write_buffer
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        if let Err(e) = pixels.render() {
            log::error!("render failed: {e}");
        }
    }
}

impl ApplicationHandler for WindowApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_surface(event_loop) {
            log::error!("{e}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(pixels) = self.pixels.as_mut() {
                    if let Err(e) = pixels.resize_surface(size.width, size.height) {
                        log::error!("unable to resize surface: {e}");
                        event_loop.exit();
                    }
                }
            }
            WindowEvent::KeyboardInput { event: input, .. } => {
                let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
                match input.state {
                    ElementState::Pressed => {
                        keys.insert(input.logical_key);
                    }
                    ElementState::Released => {
                        keys.remove(&input.logical_key);
                    }
                }
            }
            _ => (),
        }
    }
}

/* runs the window on this thread until it closes */
pub fn initialize_ui(
    write_buffer: Arc<Mutex<WriteBuffer>>,
    keys: Arc<Mutex<HashSet<Key>>>,
    render_requester: Arc<Mutex<RenderRequester>>,
    scale: u32,
) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut WindowApp::new(
        write_buffer,
        keys,
        render_requester,
        scale,
    ))
}
