//! Gopher Booth -- main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. Window events are
//! translated into the core event model and queued; each `RedrawRequested`
//! runs exactly one driver tick (input -> update -> draw). Frame pacing
//! comes from the Fifo present mode, not from the driver.

mod booth;
mod entities;
mod render;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use booth::Booth;
use gb_core::driver::Driver;
use gb_core::event::{Event, KeyPress, MouseButton};
use gb_platform::window::PlatformConfig;

struct App {
    config: PlatformConfig,
    driver: Driver,
    pending_events: Vec<Event>,
    booth: Option<Booth>,
}

impl App {
    fn new() -> Self {
        Self {
            config: PlatformConfig::default(),
            driver: Driver::new(),
            pending_events: Vec::new(),
            booth: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.booth.is_some() {
            return;
        }
        let booth = gb_platform::window::create_window(event_loop, &self.config)
            .and_then(Booth::new)
            .unwrap_or_else(|err| panic!("Failed to initialize: {err}"));
        self.booth = Some(booth);
        self.driver.start();
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(booth) = &self.booth {
            booth.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(booth) = self.booth.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => self.pending_events.push(Event::Quit),

            WindowEvent::Resized(physical_size) => {
                let (w, h) = (physical_size.width, physical_size.height);
                if w > 0 && h > 0 {
                    booth.resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                self.pending_events
                    .push(Event::MouseButtonDown(map_mouse_button(button)));
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed =>
            {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.pending_events.push(Event::KeyDown(map_key(code)));
                }
            }

            WindowEvent::RedrawRequested => {
                if !self.driver.tick(booth, &mut self.pending_events) {
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}

fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

fn map_key(code: KeyCode) -> KeyPress {
    match code {
        KeyCode::Escape => KeyPress::Escape,
        KeyCode::BrowserBack => KeyPress::Back,
        _ => KeyPress::Other,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Gopher Booth starting...");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
