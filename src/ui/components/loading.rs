//! Loading indicator with an animated spinner.
//!
//! Advanced on each event-loop tick while a recommendation fetch is in
//! flight.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::theme;

/// Braille spinner frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An animated spinner with a status message.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    /// Message shown next to the spinner.
    message: String,
    /// Current spinner frame index.
    frame: usize,
    /// Whether the indicator is shown.
    active: bool,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingIndicator {
    /// Create an inactive indicator.
    pub fn new() -> Self {
        Self {
            message: "Loading...".to_string(),
            frame: 0,
            active: false,
        }
    }

    /// Start spinning with the given message.
    pub fn start(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.frame = 0;
        self.active = true;
    }

    /// Stop spinning.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Whether the indicator is shown.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the animation by one frame.
    pub fn tick(&mut self) {
        if self.active {
            self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Render the spinner centered in the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }
        let text = format!("{} {}", SPINNER_FRAMES[self.frame], self.message);
        let widget = Paragraph::new(text)
            .style(Style::default().fg(theme().accent))
            .alignment(Alignment::Center);
        frame.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_inactive() {
        let indicator = LoadingIndicator::new();
        assert!(!indicator.is_active());
    }

    #[test]
    fn test_start_and_stop() {
        let mut indicator = LoadingIndicator::new();
        indicator.start("Finding products...");
        assert!(indicator.is_active());
        assert_eq!(indicator.message, "Finding products...");
        indicator.stop();
        assert!(!indicator.is_active());
    }

    #[test]
    fn test_tick_wraps_around() {
        let mut indicator = LoadingIndicator::new();
        indicator.start("Loading...");
        for _ in 0..SPINNER_FRAMES.len() {
            indicator.tick();
        }
        assert_eq!(indicator.frame, 0);
    }

    #[test]
    fn test_tick_is_noop_when_inactive() {
        let mut indicator = LoadingIndicator::new();
        indicator.tick();
        assert_eq!(indicator.frame, 0);
    }
}
