//! Event handling for the application.
//!
//! Terminal input is polled on a fixed tick and converted to application
//! events; the tick also drives debounce deadlines and animations.

mod handler;

pub use handler::EventHandler;

use crossterm::event::KeyEvent;

/// An application event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// Periodic tick (no input within the poll interval).
    Tick,
    /// The application should quit (Ctrl+C).
    Quit,
}
