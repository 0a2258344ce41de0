//! Event-driven mutation of the shared presentation state.
//!
//! A `Session` is the single explicit mutable state record threaded through
//! input handling, the update step, and the render step each iteration.

use crate::event::{Event, KeyPress, MouseButton};
use crate::frame::FrameState;
use crate::state::GopherState;

/// Fire-and-forget click effect played on every state transition.
/// Implemented by the audio mixer; tests use a counting stub.
pub trait ClickSound {
    fn play_click(&mut self);
}

#[derive(Debug)]
pub struct Session {
    pub state: GopherState,
    pub frame: FrameState,
    quit: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: GopherState::default(),
            frame: FrameState::new(),
            quit: false,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Handle one polled event. Unrecognized events are a silent no-op;
    /// so is the absence of any event.
    pub fn handle_event(&mut self, event: &Event, click: &mut dyn ClickSound) {
        match event {
            Event::Quit => self.quit = true,
            Event::MouseButtonDown(MouseButton::Left) => {
                click.play_click();
                self.frame.reset_alpha();
                self.state = self.state.next();
                log::debug!("State -> {}", self.state);
            }
            Event::KeyDown(KeyPress::Escape) | Event::KeyDown(KeyPress::Back) => {
                self.quit = true;
            }
            _ => {}
        }
    }

    /// Fixed-increment update step. Reads no input and issues no draws.
    pub fn advance(&mut self) {
        self.frame.advance();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClickCounter(u32);

    impl ClickSound for ClickCounter {
        fn play_click(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn fresh_session_starts_in_run_fully_opaque() {
        let session = Session::new();
        assert_eq!(session.state, GopherState::Run);
        assert_eq!(session.frame.alpha(), 255);
        assert_eq!(session.frame.display_frame(), 0);
        assert!(!session.quit_requested());
    }

    #[test]
    fn left_click_advances_state_and_plays_click() {
        let mut session = Session::new();
        let mut click = ClickCounter(0);
        session.handle_event(&Event::MouseButtonDown(MouseButton::Left), &mut click);
        assert_eq!(session.state, GopherState::Flap);
        assert_eq!(click.0, 1);
    }

    #[test]
    fn left_click_resets_alpha_regardless_of_its_value() {
        let mut session = Session::new();
        let mut click = ClickCounter(0);
        for _ in 0..13 {
            session.advance();
        }
        assert_ne!(session.frame.alpha(), 255);
        session.handle_event(&Event::MouseButtonDown(MouseButton::Left), &mut click);
        assert_eq!(session.frame.alpha(), 255);
    }

    #[test]
    fn six_clicks_cycle_back_to_run_twice() {
        let mut session = Session::new();
        let mut click = ClickCounter(0);
        let expected = [
            GopherState::Flap,
            GopherState::Dead,
            GopherState::Run,
            GopherState::Flap,
            GopherState::Dead,
            GopherState::Run,
        ];
        for state in expected {
            session.handle_event(&Event::MouseButtonDown(MouseButton::Left), &mut click);
            assert_eq!(session.state, state);
        }
        assert_eq!(click.0, 6);
    }

    #[test]
    fn non_primary_buttons_are_ignored() {
        let mut session = Session::new();
        let mut click = ClickCounter(0);
        session.handle_event(&Event::MouseButtonDown(MouseButton::Right), &mut click);
        session.handle_event(&Event::MouseButtonDown(MouseButton::Middle), &mut click);
        session.handle_event(&Event::MouseButtonDown(MouseButton::Other), &mut click);
        assert_eq!(session.state, GopherState::Run);
        assert_eq!(click.0, 0);
    }

    #[test]
    fn quit_event_sets_termination_flag_only() {
        let mut session = Session::new();
        let mut click = ClickCounter(0);
        session.handle_event(&Event::Quit, &mut click);
        assert!(session.quit_requested());
        assert_eq!(session.state, GopherState::Run);
        assert_eq!(click.0, 0);
    }

    #[test]
    fn escape_and_back_keys_request_termination() {
        for key in [KeyPress::Escape, KeyPress::Back] {
            let mut session = Session::new();
            let mut click = ClickCounter(0);
            session.handle_event(&Event::KeyDown(key), &mut click);
            assert!(session.quit_requested());
        }
    }

    #[test]
    fn unhandled_events_are_silent_no_ops() {
        let mut session = Session::new();
        let mut click = ClickCounter(0);
        session.handle_event(&Event::Other, &mut click);
        session.handle_event(&Event::KeyDown(KeyPress::Other), &mut click);
        assert_eq!(session.state, GopherState::Run);
        assert_eq!(session.frame.alpha(), 255);
        assert!(!session.quit_requested());
        assert_eq!(click.0, 0);
    }
}
