//! Home screen with the server health status.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::api::types::HealthStatus;
use crate::ui::theme::theme;

/// Actions returned from the home view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeAction {
    /// Open the recipe form.
    StartForm,
    /// Quit the application.
    Quit,
}

/// Result of the startup health check, as far as the UI cares.
#[derive(Debug, Clone, Default)]
pub enum HealthState {
    /// Check still in flight.
    #[default]
    Checking,
    /// Server responded.
    Healthy(HealthStatus),
    /// Server was unreachable or returned an error.
    Unreachable(String),
}

/// The landing screen.
#[derive(Debug, Default)]
pub struct HomeView {
    health: HealthState,
}

impl HomeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_health(&mut self, health: HealthState) {
        self.health = health;
    }

    pub fn health(&self) -> &HealthState {
        &self.health
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<HomeAction> {
        match key.code {
            KeyCode::Enter => Some(HomeAction::StartForm),
            KeyCode::Char('q') => Some(HomeAction::Quit),
            _ => None,
        }
    }

    /// Render the splash screen and health status.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = theme();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            "MealScout",
            Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[1]);

        let subtitle = Paragraph::new("Find healthier products for your recipe")
            .style(Style::default().fg(t.muted))
            .alignment(Alignment::Center);
        frame.render_widget(subtitle, chunks[2]);

        let status = match &self.health {
            HealthState::Checking => {
                Line::from(Span::styled("Checking server...", Style::default().fg(t.muted)))
            }
            HealthState::Healthy(h) if h.recommender_loaded => Line::from(Span::styled(
                "● Server ready",
                Style::default().fg(t.success),
            )),
            HealthState::Healthy(_) => Line::from(Span::styled(
                "● Server up, recommender still loading",
                Style::default().fg(t.warning),
            )),
            HealthState::Unreachable(msg) => Line::from(Span::styled(
                format!("● Server unreachable: {}", msg),
                Style::default().fg(t.error),
            )),
        };
        frame.render_widget(
            Paragraph::new(status).alignment(Alignment::Center),
            chunks[3],
        );

        let help = Paragraph::new("Enter: start  q: quit")
            .style(Style::default().fg(t.muted))
            .alignment(Alignment::Center);
        frame.render_widget(help, chunks[4]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_enter_starts_form() {
        let mut view = HomeView::new();
        let action = view.handle_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(action, Some(HomeAction::StartForm));
    }

    #[test]
    fn test_q_quits() {
        let mut view = HomeView::new();
        let action = view.handle_input(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(action, Some(HomeAction::Quit));
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut view = HomeView::new();
        assert!(view
            .handle_input(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE))
            .is_none());
    }
}
