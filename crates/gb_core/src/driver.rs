//! The loop driver: owns the lifecycle phase and frame timing, and
//! sequences input -> update -> draw once per iteration. It depends only on
//! the `Stage` capability interface, never on a concrete presentation type.

use crate::event::Event;
use crate::time::TimeState;

/// Lifecycle hooks the driver calls each tick.
pub trait Stage {
    fn on_event(&mut self, event: &Event);
    fn update(&mut self, dt: f64);
    fn draw(&mut self, dt: f64);
    fn quit_requested(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    NotStarted,
    Running,
    /// Terminal; a stopped driver never restarts.
    Stopped,
}

pub struct Driver {
    phase: LoopPhase,
    pub time: TimeState,
}

impl Driver {
    pub fn new() -> Self {
        Self {
            phase: LoopPhase::NotStarted,
            time: TimeState::new(),
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn start(&mut self) {
        if self.phase == LoopPhase::NotStarted {
            self.phase = LoopPhase::Running;
            log::info!("Presentation loop started");
        }
    }

    /// Run one loop iteration: observe the termination flag, measure the
    /// wall-clock delta, dispatch pending events, then update and draw.
    ///
    /// The flag is checked at the top, so a quit requested during iteration
    /// N stops the loop before iteration N+1 touches update or draw.
    /// Returns false once the driver has stopped.
    pub fn tick(&mut self, stage: &mut dyn Stage, events: &mut Vec<Event>) -> bool {
        if self.phase != LoopPhase::Running {
            return false;
        }
        if stage.quit_requested() {
            self.phase = LoopPhase::Stopped;
            log::info!("Presentation loop stopped after {} frames", self.time.frame_count);
            return false;
        }

        self.time.begin_frame();
        for event in events.drain(..) {
            stage.on_event(&event);
        }
        stage.update(self.time.real_dt);
        stage.draw(self.time.real_dt);
        true
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}
