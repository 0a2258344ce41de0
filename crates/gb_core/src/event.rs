//! Input events after translation from the windowing layer. The core never
//! sees platform event types directly; the binary maps them into these.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Escape,
    /// Platform "back" navigation key.
    Back,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Window close requested.
    Quit,
    MouseButtonDown(MouseButton),
    KeyDown(KeyPress),
    /// Anything the presentation does not react to.
    Other,
}
