//! Transient toast notifications.
//!
//! Used for non-blocking feedback such as "server unreachable" or form
//! validation messages. Toasts stack in the bottom-right corner and
//! expire on their own.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::theme::theme;

/// Severity of a toast, determines icon and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl NotificationKind {
    fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Info => "ℹ",
            NotificationKind::Success => "✓",
            NotificationKind::Error => "✗",
        }
    }

    fn style(&self) -> Style {
        let t = theme();
        match self {
            NotificationKind::Info => Style::default().fg(t.accent),
            NotificationKind::Success => Style::default().fg(t.success),
            NotificationKind::Error => Style::default().fg(t.error),
        }
    }

    fn default_duration(&self) -> Duration {
        match self {
            NotificationKind::Error => Duration::from_secs(5),
            _ => Duration::from_secs(3),
        }
    }
}

/// A single toast message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    created_at: Instant,
    duration: Duration,
}

impl Notification {
    fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Instant::now(),
            duration: kind.default_duration(),
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

/// Holds the active toasts and drops them as they expire.
#[derive(Debug, Default)]
pub struct NotificationManager {
    notifications: VecDeque<Notification>,
}

/// At most this many toasts are kept; older ones are evicted.
const MAX_VISIBLE: usize = 3;

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
        while self.notifications.len() > MAX_VISIBLE {
            self.notifications.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationKind::Info));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationKind::Success));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationKind::Error));
    }

    /// Drop expired toasts. Called on every tick.
    pub fn tick(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Render the toast stack in the bottom-right corner.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let width = 50.min(area.width.saturating_sub(4));
        let inner_width = width.saturating_sub(4) as usize;

        let heights: Vec<u16> = self
            .notifications
            .iter()
            .map(|n| {
                let text_len = n.message.chars().count() + 2;
                let lines = if inner_width > 0 {
                    ((text_len + inner_width - 1) / inner_width) as u16
                } else {
                    1
                };
                lines + 2
            })
            .collect();

        let total_height = heights.iter().sum::<u16>().min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(width + 2);
        let y = area.y + area.height.saturating_sub(total_height + 1);
        let stack_area = Rect::new(x, y, width, total_height);

        let constraints: Vec<Constraint> = heights.iter().map(|&h| Constraint::Length(h)).collect();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(stack_area);

        for (notification, chunk) in self.notifications.iter().zip(chunks.iter()) {
            let style = notification.kind.style();
            let text = Line::from(vec![
                Span::styled(
                    format!("{} ", notification.kind.icon()),
                    style.add_modifier(Modifier::BOLD),
                ),
                Span::styled(&notification.message, style),
            ]);

            frame.render_widget(Clear, *chunk);
            frame.render_widget(
                Paragraph::new(text)
                    .block(Block::default().borders(Borders::ALL).border_style(style))
                    .wrap(Wrap { trim: true }),
                *chunk,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_len() {
        let mut manager = NotificationManager::new();
        assert!(manager.is_empty());
        manager.info("health check ok");
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_oldest_evicted_past_max() {
        let mut manager = NotificationManager::new();
        manager.info("1");
        manager.info("2");
        manager.info("3");
        manager.info("4");
        assert_eq!(manager.len(), MAX_VISIBLE);
        let messages: Vec<&str> = manager.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_error_lives_longer_than_info() {
        let info = Notification::new("i", NotificationKind::Info);
        let error = Notification::new("e", NotificationKind::Error);
        assert!(error.duration > info.duration);
    }

    #[test]
    fn test_tick_drops_expired() {
        let mut manager = NotificationManager::new();
        manager.push(Notification {
            message: "old".to_string(),
            kind: NotificationKind::Info,
            created_at: Instant::now() - Duration::from_secs(10),
            duration: Duration::from_secs(3),
        });
        manager.info("fresh");
        manager.tick();
        assert_eq!(manager.len(), 1);
    }
}
