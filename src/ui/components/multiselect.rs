//! Multi-select widget with checkboxes.
//!
//! Used for the NutriScore grade and allergen exclusion filters. Options
//! are plain strings; selection is toggled with Space.

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::ui::theme::theme;

/// A scrollable checkbox list over a set of string options.
pub struct MultiSelect {
    /// The available options.
    options: Vec<String>,
    /// Selected options.
    selected: HashSet<String>,
    /// Currently focused option index.
    cursor: usize,
    /// Widget title.
    title: String,
    /// List state for ratatui.
    list_state: ListState,
}

impl MultiSelect {
    /// Create an empty multi-select with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            options: Vec::new(),
            selected: HashSet::new(),
            cursor: 0,
            title: title.into(),
            list_state,
        }
    }

    /// Replace the available options, keeping selections that still exist.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.selected.retain(|s| options.contains(s));
        self.options = options;
        self.cursor = 0;
        self.list_state.select(Some(0));
    }

    /// The selected options, in option order.
    pub fn selected(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|o| self.selected.contains(*o))
            .cloned()
            .collect()
    }

    /// Whether the given option is selected.
    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.contains(option)
    }

    /// Whether nothing is selected.
    pub fn selection_is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Toggle the currently focused option.
    pub fn toggle_current(&mut self) {
        if let Some(option) = self.options.get(self.cursor) {
            if !self.selected.remove(option) {
                self.selected.insert(option.clone());
            }
        }
    }

    /// Clear all selections.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    fn move_down(&mut self) {
        if !self.options.is_empty() && self.cursor < self.options.len() - 1 {
            self.cursor += 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    /// Handle keyboard input. Returns true if the key was handled.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.move_down();
                true
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.move_up();
                true
            }
            (KeyCode::Char(' '), KeyModifiers::NONE) => {
                self.toggle_current();
                true
            }
            _ => false,
        }
    }

    /// Render the checkbox list.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let t = theme();
        let border_style = if focused {
            Style::default().fg(t.border_focused)
        } else {
            Style::default().fg(t.border)
        };

        let title = if self.selected.is_empty() {
            format!(" {} ", self.title)
        } else {
            format!(" {} ({}) ", self.title, self.selected.len())
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        if self.options.is_empty() {
            let empty = ListItem::new(Line::from(Span::styled(
                "No options available",
                Style::default().fg(t.muted),
            )));
            frame.render_widget(List::new(vec![empty]).block(block), area);
            return;
        }

        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|option| {
                let (checkbox, style) = if self.selected.contains(option) {
                    ("[x]", Style::default().fg(t.success))
                } else {
                    ("[ ]", Style::default())
                };
                ListItem::new(Line::from(vec![
                    Span::styled(checkbox, style),
                    Span::raw(" "),
                    Span::raw(option.as_str()),
                ]))
            })
            .collect();

        if focused {
            let list = List::new(items)
                .block(block)
                .highlight_style(
                    Style::default()
                        .fg(t.fg)
                        .bg(t.highlight)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");
            frame.render_stateful_widget(list, area, &mut self.list_state);
        } else {
            frame.render_widget(List::new(items).block(block), area);
        }
    }
}
