//! Recommendation results view.
//!
//! Shows the returned products as scrollable cards with their match
//! score, nutrition facts, NutriScore badge, and health rating.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::api::types::{Product, RecommendResponse};
use crate::ui::components::LoadingIndicator;
use crate::ui::theme::{health_category_color, nutri_score_color, theme};

/// Height of a single product card, borders included.
const CARD_HEIGHT: u16 = 6;

/// Category strings are cut off past this many characters.
const CATEGORY_MAX_LEN: usize = 100;

/// Actions returned from the results view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsAction {
    /// Return to the form.
    Back,
}

/// What the view is currently showing.
#[derive(Debug, Default)]
enum ResultsState {
    /// A recommendation request is in flight.
    #[default]
    Loading,
    /// Products arrived.
    Loaded,
    /// The request failed.
    Failed(String),
}

/// The results screen.
#[derive(Debug, Default)]
pub struct ResultsView {
    state: ResultsState,
    products: Vec<Product>,
    total_found: u32,
    scroll: usize,
    loading: LoadingIndicator,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the loading state for a freshly submitted request.
    pub fn set_loading(&mut self) {
        self.state = ResultsState::Loading;
        self.products.clear();
        self.total_found = 0;
        self.scroll = 0;
        self.loading.start("Finding products...");
    }

    /// Show a completed response.
    pub fn set_results(&mut self, response: RecommendResponse) {
        self.loading.stop();
        if let Some(error) = response.error {
            self.state = ResultsState::Failed(error);
            return;
        }
        self.products = response.recommendations;
        self.total_found = response.total_found;
        self.scroll = 0;
        self.state = ResultsState::Loaded;
    }

    /// Show a failed request.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.loading.stop();
        self.state = ResultsState::Failed(message.into());
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ResultsState::Loading)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Advance the spinner animation.
    pub fn tick(&mut self) {
        self.loading.tick();
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ResultsAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('b'), KeyModifiers::NONE) => {
                Some(ResultsAction::Back)
            }
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                if self.scroll + 1 < self.products.len() {
                    self.scroll += 1;
                }
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            (KeyCode::Home, _) => {
                self.scroll = 0;
                None
            }
            _ => None,
        }
    }

    /// Render the results screen.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();

        match &self.state {
            ResultsState::Loading => {
                self.loading.render(frame, centered_line(area));
                return;
            }
            ResultsState::Failed(message) => {
                let text = vec![
                    Line::from(Span::styled(
                        "Something went wrong",
                        Style::default().fg(t.error).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(message.clone(), Style::default().fg(t.muted))),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Esc: back to form",
                        Style::default().fg(t.muted),
                    )),
                ];
                frame.render_widget(
                    Paragraph::new(text).alignment(Alignment::Center),
                    centered_line(area),
                );
                return;
            }
            ResultsState::Loaded => {}
        }

        if self.products.is_empty() {
            let text = vec![
                Line::from("No matching products found"),
                Line::from(Span::styled(
                    "Try relaxing the filters",
                    Style::default().fg(t.muted),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Esc: back to form",
                    Style::default().fg(t.muted),
                )),
            ];
            frame.render_widget(
                Paragraph::new(text).alignment(Alignment::Center),
                centered_line(area),
            );
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(CARD_HEIGHT),
                Constraint::Length(1),
            ])
            .split(area);

        let header = Paragraph::new(format!(
            "Found {} products, showing {}",
            self.total_found,
            self.products.len()
        ))
        .style(Style::default().fg(t.muted));
        frame.render_widget(header, chunks[0]);

        let list_area = chunks[1];
        let visible = (list_area.height / CARD_HEIGHT) as usize;
        for (i, product) in self
            .products
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(visible.max(1))
        {
            let y = list_area.y + ((i - self.scroll) as u16) * CARD_HEIGHT;
            if y + CARD_HEIGHT > list_area.bottom() {
                break;
            }
            let card_area = Rect::new(list_area.x, y, list_area.width, CARD_HEIGHT);
            render_card(frame, card_area, product, i == self.scroll);
        }

        let help = Paragraph::new("j/k: scroll  Esc: back  q: quit")
            .style(Style::default().fg(t.muted))
            .alignment(Alignment::Center);
        frame.render_widget(help, chunks[2]);
    }
}

/// A small area vertically centered in `area`, for status messages.
/// Clamped to `area` so short terminals never get out-of-bounds writes.
fn centered_line(area: Rect) -> Rect {
    let y = area.y + area.height / 2;
    Rect::new(area.x, y.min(area.bottom().saturating_sub(5)), area.width, 5).intersection(area)
}

/// Render a single product card.
fn render_card(frame: &mut Frame, area: Rect, product: &Product, current: bool) {
    let t = theme();

    let border_style = if current {
        Style::default().fg(t.border_focused)
    } else {
        Style::default().fg(t.border)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {}% match ", product.score_percent()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let name_line = Line::from(vec![
        Span::styled(
            product.name.clone(),
            Style::default().fg(t.fg).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", product.brand), Style::default().fg(t.muted)),
    ]);

    let nutrition_line = Line::from(vec![
        Span::raw(format!(
            "{} kcal  {:.1}g protein  {:.1}g sugar  ",
            product.calories, product.protein, product.sugar
        )),
        Span::styled(
            format!(" {} ", product.nutriscore),
            Style::default()
                .fg(t.fg)
                .bg(nutri_score_color(&product.nutriscore))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            product.health_category.clone(),
            Style::default().fg(health_category_color(&product.health_category)),
        ),
    ]);

    let categories_line = Line::from(Span::styled(
        product.categories_truncated(CATEGORY_MAX_LEN),
        Style::default().fg(t.muted),
    ));

    let matched_line = Line::from(Span::styled(
        format!("{} matched ingredients", product.matched_ingredients),
        Style::default().fg(t.accent),
    ));

    let body = Paragraph::new(vec![name_line, nutrition_line, categories_line, matched_line]);
    frame.render_widget(body, inner);
}
