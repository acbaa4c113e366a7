//! Ingredient tag editor with debounced autocomplete.
//!
//! Owns the ordered list of selected ingredients, renders them as chips,
//! and manages autocomplete queries against the remote suggestion
//! endpoint. Typing (re)arms a debounce deadline; the host event loop
//! calls [`IngredientEditor::poll`] on every tick and spawns a fetch for
//! whatever query comes due. Each issued query gets a monotonically
//! increasing sequence number, and only the result matching the live
//! sequence is ever applied, so a slow early response can never overwrite
//! a later one's suggestions.
//!
//! Suggestion fetches are a best-effort enhancement: failures are logged
//! and the panel is hidden, nothing else.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use tracing::debug;

use crate::ui::components::TextInput;
use crate::ui::theme::theme;

/// Debounce interval between the last keystroke and the suggestion fetch.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Minimum query length (in chars) before suggestions are requested.
pub const MIN_QUERY_LEN: usize = 2;

/// Grace period after focus loss before the panel is dismissed.
const BLUR_GRACE: Duration = Duration::from_millis(150);

/// Default cap on the number of suggestions shown in the panel.
const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// An autocomplete query the editor has issued.
///
/// The host passes `seq` back with the fetched result so the editor can
/// tell whether the response is still current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionQuery {
    /// Sequence number identifying this fetch.
    pub seq: u64,
    /// The query text at the time the debounce fired.
    pub text: String,
}

/// A scheduled (not yet fired) suggestion query.
#[derive(Debug, Clone)]
struct PendingQuery {
    text: String,
    fire_at: Instant,
}

/// Ingredient tag editor component.
#[derive(Debug)]
pub struct IngredientEditor {
    /// Selected ingredients, insertion order, no duplicates.
    ingredients: Vec<String>,
    /// The ingredient text input.
    input: TextInput,
    /// Current suggestion list (only meaningful while the panel is open).
    suggestions: Vec<String>,
    /// Highlighted suggestion index.
    selected: Option<usize>,
    /// Whether the suggestion panel is shown.
    panel_visible: bool,
    /// Debounced query waiting to fire.
    pending: Option<PendingQuery>,
    /// Sequence number of the in-flight fetch whose result may be applied.
    live_seq: Option<u64>,
    /// Next sequence number to hand out.
    next_seq: u64,
    /// Deadline after which a focus loss dismisses the panel.
    blur_deadline: Option<Instant>,
    /// Debounce interval (configurable).
    debounce: Duration,
    /// Cap on the number of suggestions shown, whatever the server sends.
    suggestion_limit: usize,
}

impl IngredientEditor {
    /// Create a new editor with the default debounce interval.
    pub fn new() -> Self {
        Self::with_debounce(DEBOUNCE)
    }

    /// Create a new editor with a custom debounce interval.
    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            ingredients: Vec::new(),
            input: TextInput::with_placeholder("Add an ingredient..."),
            suggestions: Vec::new(),
            selected: None,
            panel_visible: false,
            pending: None,
            live_seq: None,
            next_seq: 0,
            blur_deadline: None,
            debounce,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    /// Cap the suggestion panel at `limit` entries.
    pub fn set_suggestion_limit(&mut self, limit: usize) {
        self.suggestion_limit = limit.max(1);
    }

    /// The selected ingredients, in display order.
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// The current input text.
    pub fn input_value(&self) -> &str {
        self.input.value()
    }

    /// Whether the suggestion panel is currently shown.
    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// The current suggestions (empty unless the panel is visible).
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Add an ingredient.
    ///
    /// Trims whitespace; a no-op when the result is empty or already
    /// present (case-sensitive exact match). Clears the input field as a
    /// side effect of a successful add. Returns whether the list changed.
    pub fn add_ingredient(&mut self, raw: &str) -> bool {
        let name = raw.trim();
        if name.is_empty() || self.ingredients.iter().any(|i| i == name) {
            return false;
        }
        self.ingredients.push(name.to_string());
        self.input.clear();
        self.cancel_query();
        true
    }

    /// Remove an ingredient by name. A silent no-op when absent.
    pub fn remove_ingredient(&mut self, name: &str) -> bool {
        if let Some(pos) = self.ingredients.iter().position(|i| i == name) {
            self.ingredients.remove(pos);
            true
        } else {
            false
        }
    }

    /// Remove the most recently added ingredient (Backspace on an empty
    /// input).
    pub fn remove_last_ingredient(&mut self) -> bool {
        self.ingredients.pop().is_some()
    }

    /// Pick a suggestion: fill the input with it, add it, hide the panel.
    pub fn select_suggestion(&mut self, text: &str) {
        self.input.set_value(text);
        self.add_ingredient(text);
        self.hide_panel();
    }

    /// React to an input change.
    ///
    /// A query shorter than [`MIN_QUERY_LEN`] immediately hides the panel
    /// and cancels any pending or in-flight query. Otherwise the debounce
    /// deadline is re-armed for the current text (cancel-then-schedule).
    fn on_input_changed(&mut self, now: Instant) {
        let query = self.input.value().trim();
        if query.chars().count() < MIN_QUERY_LEN {
            self.cancel_query();
            return;
        }
        self.pending = Some(PendingQuery {
            text: query.to_string(),
            fire_at: now + self.debounce,
        });
    }

    /// Drop any scheduled or in-flight query and hide the panel.
    ///
    /// Clearing `live_seq` also tombstones responses that are already on
    /// the wire, so they cannot re-open the panel later.
    fn cancel_query(&mut self) {
        self.pending = None;
        self.live_seq = None;
        self.hide_panel();
    }

    /// Advance time: fire due debounce deadlines and blur dismissal.
    ///
    /// Called on every tick of the host event loop. Returns a query to
    /// fetch when the debounce deadline has passed; issuing it supersedes
    /// any earlier in-flight fetch.
    pub fn poll(&mut self, now: Instant) -> Option<SuggestionQuery> {
        if let Some(deadline) = self.blur_deadline {
            if now >= deadline {
                self.blur_deadline = None;
                self.hide_panel();
            }
        }

        match &self.pending {
            Some(pending) if now >= pending.fire_at => {}
            _ => return None,
        }
        let pending = self.pending.take()?;

        let seq = self.next_seq;
        self.next_seq += 1;
        self.live_seq = Some(seq);
        debug!(seq, query = %pending.text, "Suggestion query due");
        Some(SuggestionQuery {
            seq,
            text: pending.text,
        })
    }

    /// Apply the result of a suggestion fetch.
    ///
    /// Staleness guard: the result is ignored unless `seq` matches the
    /// live fetch. A non-empty list opens the panel; an empty list or any
    /// error hides it (logged, never surfaced).
    pub fn apply_suggestions(&mut self, seq: u64, result: Result<Vec<String>, String>) {
        if self.live_seq != Some(seq) {
            debug!(seq, "Discarding superseded suggestion response");
            return;
        }
        self.live_seq = None;

        match result {
            Ok(mut suggestions) if !suggestions.is_empty() => {
                // The server is asked for at most `suggestion_limit`
                // entries, but the cap holds even if it sends more.
                suggestions.truncate(self.suggestion_limit);
                self.suggestions = suggestions;
                self.selected = None;
                self.panel_visible = true;
            }
            Ok(_) => self.hide_panel(),
            Err(e) => {
                debug!(error = %e, "Suggestion fetch failed");
                self.hide_panel();
            }
        }
    }

    /// Note that the editor gained focus; cancels a pending dismissal.
    pub fn focus_gained(&mut self) {
        self.blur_deadline = None;
    }

    /// Note that the editor lost focus; the panel hides after a short
    /// grace period unless focus returns.
    ///
    /// An in-flight fetch is tombstoned as well, so a slow response
    /// cannot open the panel while another field has focus.
    pub fn focus_lost(&mut self, now: Instant) {
        if self.panel_visible {
            self.blur_deadline = Some(now + BLUR_GRACE);
        }
        self.pending = None;
        self.live_seq = None;
    }

    /// Hide the suggestion panel.
    pub fn hide_panel(&mut self) {
        self.panel_visible = false;
        self.suggestions.clear();
        self.selected = None;
    }

    /// Handle keyboard input while the editor is focused.
    ///
    /// Returns true when the key was consumed.
    pub fn handle_input(&mut self, key: KeyEvent, now: Instant) -> bool {
        if self.panel_visible {
            match (key.code, key.modifiers) {
                (KeyCode::Down, _) => {
                    let last = self.suggestions.len().saturating_sub(1);
                    self.selected = Some(match self.selected {
                        Some(i) => (i + 1).min(last),
                        None => 0,
                    });
                    return true;
                }
                (KeyCode::Up, _) => {
                    self.selected = match self.selected {
                        Some(0) | None => None,
                        Some(i) => Some(i - 1),
                    };
                    return true;
                }
                (KeyCode::Esc, _) => {
                    self.hide_panel();
                    return true;
                }
                (KeyCode::Enter, _) => {
                    if let Some(text) = self.selected.and_then(|i| self.suggestions.get(i)).cloned()
                    {
                        self.select_suggestion(&text);
                        return true;
                    }
                    // Fall through to adding the typed text.
                }
                _ => {}
            }
        }

        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => {
                let value = self.input.value().to_string();
                self.add_ingredient(&value);
                self.hide_panel();
                true
            }
            (KeyCode::Backspace, _) if self.input.is_empty() => {
                self.remove_last_ingredient();
                true
            }
            _ => {
                if self.input.handle_input(key) {
                    self.on_input_changed(now);
                    true
                } else {
                    // Cursor movement keys are consumed but change nothing.
                    matches!(
                        key.code,
                        KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End
                    )
                }
            }
        }
    }

    /// Render the chip row, the input field, and the suggestion panel.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let t = theme();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(3)])
            .split(area);

        // Ingredient chips
        if self.ingredients.is_empty() {
            let empty = Paragraph::new("No ingredients yet").style(Style::default().fg(t.muted));
            frame.render_widget(empty, chunks[0]);
        } else {
            let mut spans: Vec<Span> = Vec::new();
            for (i, ingredient) in self.ingredients.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(
                    format!(" {} ", ingredient),
                    Style::default().fg(t.fg).bg(t.accent),
                ));
            }
            let chips = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true });
            frame.render_widget(chips, chunks[0]);
        }

        self.input.render(frame, chunks[1], "Ingredients", focused);

        if self.panel_visible && !self.suggestions.is_empty() {
            self.render_panel(frame, chunks[1]);
        }
    }

    /// Render the suggestion dropdown directly below the input field.
    fn render_panel(&self, frame: &mut Frame, input_area: Rect) {
        let t = theme();
        let frame_area = frame.area();

        let height = (self.suggestions.len() as u16 + 2)
            .min(frame_area.height.saturating_sub(input_area.bottom()));
        if height < 3 {
            return;
        }
        let panel_area = Rect::new(input_area.x, input_area.bottom(), input_area.width, height);

        frame.render_widget(Clear, panel_area);

        let items: Vec<ListItem> = self
            .suggestions
            .iter()
            .map(|s| ListItem::new(s.as_str()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Suggestions ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(t.highlight)),
            )
            .highlight_style(
                Style::default()
                    .fg(t.fg)
                    .bg(t.highlight)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(self.selected);
        frame.render_stateful_widget(list, panel_area, &mut state);
    }
}

impl Default for IngredientEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(editor: &mut IngredientEditor, text: &str, now: Instant) {
        for c in text.chars() {
            editor.handle_input(key(KeyCode::Char(c)), now);
        }
    }

    #[test]
    fn test_add_ingredient_trims_and_appends() {
        let mut editor = IngredientEditor::new();
        assert!(editor.add_ingredient("  tomato "));
        assert_eq!(editor.ingredients(), ["tomato"]);
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let mut editor = IngredientEditor::new();
        assert!(editor.add_ingredient("egg"));
        assert!(!editor.add_ingredient("egg"));
        assert_eq!(editor.ingredients().len(), 1);
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let mut editor = IngredientEditor::new();
        editor.add_ingredient("Egg");
        assert!(editor.add_ingredient("egg"));
        assert_eq!(editor.ingredients(), ["Egg", "egg"]);
    }

    #[test]
    fn test_add_empty_or_whitespace_is_noop() {
        let mut editor = IngredientEditor::new();
        assert!(!editor.add_ingredient(""));
        assert!(!editor.add_ingredient("   "));
        assert!(editor.ingredients().is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut editor = IngredientEditor::new();
        editor.add_ingredient("milk");
        assert!(!editor.remove_ingredient("butter"));
        assert_eq!(editor.ingredients(), ["milk"]);
    }

    #[test]
    fn test_remove_ingredient() {
        let mut editor = IngredientEditor::new();
        editor.add_ingredient("milk");
        editor.add_ingredient("flour");
        assert!(editor.remove_ingredient("milk"));
        assert_eq!(editor.ingredients(), ["flour"]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut editor = IngredientEditor::new();
        editor.add_ingredient("flour");
        editor.add_ingredient("butter");
        editor.add_ingredient("sugar");
        assert_eq!(editor.ingredients(), ["flour", "butter", "sugar"]);
    }

    #[test]
    fn test_rapid_typing_issues_single_query() {
        let mut editor = IngredientEditor::new();
        let t0 = Instant::now();

        // "a" is below the length threshold, "ap" and "app" each re-arm
        // the debounce.
        editor.handle_input(key(KeyCode::Char('a')), t0);
        editor.handle_input(key(KeyCode::Char('p')), t0 + Duration::from_millis(10));
        editor.handle_input(key(KeyCode::Char('p')), t0 + Duration::from_millis(20));

        // The last keystroke re-armed the deadline to t0+320ms.
        assert!(editor.poll(t0 + Duration::from_millis(315)).is_none());

        let query = editor.poll(t0 + Duration::from_millis(330)).unwrap();
        assert_eq!(query.text, "app");

        // Fired once; nothing further is due.
        assert!(editor.poll(t0 + Duration::from_millis(1000)).is_none());
    }

    #[test]
    fn test_short_query_cancels_pending_and_hides_panel() {
        let mut editor = IngredientEditor::new();
        let t0 = Instant::now();

        type_str(&mut editor, "ap", t0);
        editor.handle_input(key(KeyCode::Backspace), t0 + Duration::from_millis(50));

        assert!(editor.poll(t0 + Duration::from_millis(500)).is_none());
        assert!(!editor.panel_visible());
    }

    #[test]
    fn test_stale_response_does_not_overwrite_newer_one() {
        let mut editor = IngredientEditor::new();
        let t0 = Instant::now();

        type_str(&mut editor, "app", t0);
        let first = editor.poll(t0 + Duration::from_millis(350)).unwrap();

        type_str(&mut editor, "le", t0 + Duration::from_millis(400));
        let second = editor.poll(t0 + Duration::from_millis(750)).unwrap();
        assert_eq!(second.text, "apple");
        assert!(second.seq > first.seq);

        // Later query's response arrives first and is rendered.
        editor.apply_suggestions(second.seq, Ok(vec!["apple pie".to_string()]));
        assert!(editor.panel_visible());
        assert_eq!(editor.suggestions(), ["apple pie"]);

        // The slow early response must be discarded.
        editor.apply_suggestions(first.seq, Ok(vec!["app store".to_string()]));
        assert_eq!(editor.suggestions(), ["apple pie"]);
    }

    #[test]
    fn test_late_response_after_query_too_short_is_dropped() {
        let mut editor = IngredientEditor::new();
        let t0 = Instant::now();

        type_str(&mut editor, "ap", t0);
        let query = editor.poll(t0 + Duration::from_millis(350)).unwrap();

        // Input drops below the threshold before the response lands.
        editor.handle_input(key(KeyCode::Backspace), t0 + Duration::from_millis(400));

        editor.apply_suggestions(query.seq, Ok(vec!["apple".to_string()]));
        assert!(!editor.panel_visible());
    }

    #[test]
    fn test_empty_result_and_error_both_hide_panel() {
        let mut editor = IngredientEditor::new();
        let t0 = Instant::now();

        type_str(&mut editor, "egg", t0);
        let query = editor.poll(t0 + Duration::from_millis(350)).unwrap();
        editor.apply_suggestions(query.seq, Ok(vec![]));
        assert!(!editor.panel_visible());

        type_str(&mut editor, "s", t0 + Duration::from_millis(400));
        let query = editor.poll(t0 + Duration::from_millis(750)).unwrap();
        editor.apply_suggestions(query.seq, Err("Network error".to_string()));
        assert!(!editor.panel_visible());
    }

    #[test]
    fn test_select_suggestion_scenario() {
        let mut editor = IngredientEditor::new();
        let t0 = Instant::now();

        type_str(&mut editor, "egg", t0);
        let query = editor.poll(t0 + Duration::from_millis(300)).unwrap();
        assert_eq!(query.text, "egg");

        editor.apply_suggestions(
            query.seq,
            Ok(vec!["eggplant".to_string(), "eggnog".to_string()]),
        );
        assert!(editor.panel_visible());
        assert_eq!(editor.suggestions(), ["eggplant", "eggnog"]);

        // Down highlights the first item, Enter picks it.
        let t1 = t0 + Duration::from_millis(400);
        editor.handle_input(key(KeyCode::Down), t1);
        editor.handle_input(key(KeyCode::Enter), t1);

        assert_eq!(editor.ingredients(), ["eggplant"]);
        assert!(!editor.panel_visible());
        assert!(editor.input_value().is_empty());
    }

    #[test]
    fn test_enter_without_highlight_adds_typed_text() {
        let mut editor = IngredientEditor::new();
        let t0 = Instant::now();

        type_str(&mut editor, "salt", t0);
        editor.handle_input(key(KeyCode::Enter), t0);

        assert_eq!(editor.ingredients(), ["salt"]);
        assert!(editor.input_value().is_empty());
    }

    #[test]
    fn test_enter_does_not_fire_cancelled_query() {
        let mut editor = IngredientEditor::new();
        let t0 = Instant::now();

        type_str(&mut editor, "salt", t0);
        editor.handle_input(key(KeyCode::Enter), t0 + Duration::from_millis(10));

        // Adding consumed the text; the debounce must not fire afterwards.
        assert!(editor.poll(t0 + Duration::from_millis(500)).is_none());
    }

    #[test]
    fn test_backspace_on_empty_input_removes_last_tag() {
        let mut editor = IngredientEditor::new();
        let t0 = Instant::now();
        editor.add_ingredient("flour");
        editor.add_ingredient("sugar");

        editor.handle_input(key(KeyCode::Backspace), t0);
        assert_eq!(editor.ingredients(), ["flour"]);
    }

    #[test]
    fn test_esc_hides_panel() {
        let mut editor = IngredientEditor::new();
        let t0 = Instant::now();

        type_str(&mut editor, "egg", t0);
        let query = editor.poll(t0 + Duration::from_millis(350)).unwrap();
        editor.apply_suggestions(query.seq, Ok(vec!["eggnog".to_string()]));
        assert!(editor.panel_visible());

        editor.handle_input(key(KeyCode::Esc), t0 + Duration::from_millis(400));
        assert!(!editor.panel_visible());
    }

    #[test]
    fn test_blur_dismisses_panel_after_grace_period() {
        let mut editor = IngredientEditor::new();
        let t0 = Instant::now();

        type_str(&mut editor, "egg", t0);
        let query = editor.poll(t0 + Duration::from_millis(350)).unwrap();
        editor.apply_suggestions(query.seq, Ok(vec!["eggnog".to_string()]));

        let t1 = t0 + Duration::from_millis(400);
        editor.focus_lost(t1);

        // Still within the grace period.
        editor.poll(t1 + Duration::from_millis(100));
        assert!(editor.panel_visible());

        editor.poll(t1 + Duration::from_millis(151));
        assert!(!editor.panel_visible());
    }

    #[test]
    fn test_response_after_focus_loss_does_not_open_panel() {
        let mut editor = IngredientEditor::new();
        let t0 = Instant::now();

        type_str(&mut editor, "egg", t0);
        let query = editor.poll(t0 + Duration::from_millis(350)).unwrap();

        // Focus moves to another field while the fetch is still running.
        editor.focus_lost(t0 + Duration::from_millis(400));

        editor.apply_suggestions(query.seq, Ok(vec!["eggnog".to_string()]));
        assert!(!editor.panel_visible());

        // Nothing lingers for later ticks to show either.
        editor.poll(t0 + Duration::from_secs(60));
        assert!(!editor.panel_visible());
    }

    #[test]
    fn test_refocus_cancels_blur_dismissal() {
        let mut editor = IngredientEditor::new();
        let t0 = Instant::now();

        type_str(&mut editor, "egg", t0);
        let query = editor.poll(t0 + Duration::from_millis(350)).unwrap();
        editor.apply_suggestions(query.seq, Ok(vec!["eggnog".to_string()]));

        let t1 = t0 + Duration::from_millis(400);
        editor.focus_lost(t1);
        editor.focus_gained();

        editor.poll(t1 + Duration::from_secs(5));
        assert!(editor.panel_visible());
    }

    #[test]
    fn test_oversized_response_is_capped() {
        let mut editor = IngredientEditor::new();
        let t0 = Instant::now();

        type_str(&mut editor, "be", t0);
        let query = editor.poll(t0 + Duration::from_millis(350)).unwrap();

        let flood: Vec<String> = (0..20).map(|i| format!("bean {}", i)).collect();
        editor.apply_suggestions(query.seq, Ok(flood));
        assert_eq!(editor.suggestions().len(), 5);
    }

    #[test]
    fn test_custom_suggestion_limit() {
        let mut editor = IngredientEditor::new();
        editor.set_suggestion_limit(2);
        let t0 = Instant::now();

        type_str(&mut editor, "be", t0);
        let query = editor.poll(t0 + Duration::from_millis(350)).unwrap();

        editor.apply_suggestions(
            query.seq,
            Ok(vec!["a".to_string(), "b".to_string(), "c".to_string()]),
        );
        assert_eq!(editor.suggestions(), ["a", "b"]);
    }

    #[test]
    fn test_custom_debounce_interval() {
        let mut editor = IngredientEditor::with_debounce(Duration::from_millis(50));
        let t0 = Instant::now();

        type_str(&mut editor, "egg", t0);
        assert!(editor.poll(t0 + Duration::from_millis(40)).is_none());
        assert!(editor.poll(t0 + Duration::from_millis(60)).is_some());
    }
}
