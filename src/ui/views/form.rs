//! Recipe form view.
//!
//! Collects the recipe text, the ingredient list, and the dietary
//! filters, then builds the recommendation request. Keyboard focus
//! cycles through the fields with Tab/Shift+Tab; Ctrl+S submits.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::api::types::{DietaryOptions, RecipeFilters, RecommendRequest};
use crate::ui::components::{IngredientEditor, MultiSelect, SuggestionQuery, TextInput};
use crate::ui::theme::theme;

/// Actions returned from the form view.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    /// Submit the assembled recommendation request.
    Submit(RecommendRequest),
    /// The form failed validation; show the message.
    Invalid(String),
    /// Leave the form.
    Back,
}

/// Focusable form fields, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Recipe,
    Ingredients,
    MaxCalories,
    MaxSugar,
    MinProtein,
    NutriScore,
    Allergens,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Recipe => FormField::Ingredients,
            FormField::Ingredients => FormField::MaxCalories,
            FormField::MaxCalories => FormField::MaxSugar,
            FormField::MaxSugar => FormField::MinProtein,
            FormField::MinProtein => FormField::NutriScore,
            FormField::NutriScore => FormField::Allergens,
            FormField::Allergens => FormField::Recipe,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Recipe => FormField::Allergens,
            FormField::Ingredients => FormField::Recipe,
            FormField::MaxCalories => FormField::Ingredients,
            FormField::MaxSugar => FormField::MaxCalories,
            FormField::MinProtein => FormField::MaxSugar,
            FormField::NutriScore => FormField::MinProtein,
            FormField::Allergens => FormField::NutriScore,
        }
    }
}

/// The recipe and filter form.
pub struct FormView {
    recipe_input: TextInput,
    ingredient_editor: IngredientEditor,
    max_calories_input: TextInput,
    max_sugar_input: TextInput,
    min_protein_input: TextInput,
    nutri_score_select: MultiSelect,
    allergen_select: MultiSelect,
    focus: FormField,
}

impl FormView {
    /// Create the form with the default debounce interval.
    pub fn new() -> Self {
        Self::build(IngredientEditor::new())
    }

    /// Create the form with a custom autocomplete debounce interval.
    pub fn with_debounce(debounce: std::time::Duration) -> Self {
        Self::build(IngredientEditor::with_debounce(debounce))
    }

    /// Build the form, pre-populated with the fallback dietary options.
    fn build(ingredient_editor: IngredientEditor) -> Self {
        let fallback = DietaryOptions::fallback();
        let mut nutri_score_select = MultiSelect::new("NutriScore");
        nutri_score_select.set_options(fallback.nutriscore);
        let mut allergen_select = MultiSelect::new("Exclude allergens");
        allergen_select.set_options(fallback.allergens);

        Self {
            recipe_input: TextInput::with_placeholder("Describe your recipe..."),
            ingredient_editor,
            max_calories_input: TextInput::with_placeholder("kcal"),
            max_sugar_input: TextInput::with_placeholder("g"),
            min_protein_input: TextInput::with_placeholder("g"),
            nutri_score_select,
            allergen_select,
            focus: FormField::Recipe,
        }
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    /// Access to the ingredient editor for suggestion plumbing.
    pub fn ingredient_editor_mut(&mut self) -> &mut IngredientEditor {
        &mut self.ingredient_editor
    }

    /// Cap the suggestion panel at `limit` entries.
    pub fn set_suggestion_limit(&mut self, limit: usize) {
        self.ingredient_editor.set_suggestion_limit(limit);
    }

    /// Replace the dietary filter options with the server-provided ones.
    pub fn set_dietary_options(&mut self, options: &DietaryOptions) {
        self.nutri_score_select.set_options(options.nutriscore.clone());
        self.allergen_select.set_options(options.allergens.clone());
    }

    /// Advance debounce and blur deadlines; returns a due suggestion query.
    pub fn poll(&mut self, now: Instant) -> Option<SuggestionQuery> {
        self.ingredient_editor.poll(now)
    }

    /// Forward a suggestion fetch result to the editor.
    pub fn apply_suggestions(&mut self, seq: u64, result: Result<Vec<String>, String>) {
        self.ingredient_editor.apply_suggestions(seq, result);
    }

    fn set_focus(&mut self, field: FormField, now: Instant) {
        if self.focus == FormField::Ingredients && field != FormField::Ingredients {
            self.ingredient_editor.focus_lost(now);
        }
        if field == FormField::Ingredients {
            self.ingredient_editor.focus_gained();
        }
        self.focus = field;
    }

    /// Validate the form and build the request.
    fn build_request(&self) -> Result<RecommendRequest, String> {
        let recipe_text = self.recipe_input.value().trim().to_string();
        let ingredients = self.ingredient_editor.ingredients().to_vec();

        if recipe_text.is_empty() && ingredients.is_empty() {
            return Err("Enter a recipe or add at least one ingredient".to_string());
        }

        let max_calories = numeric_field(self.max_calories_input.value(), "Max calories")?;
        let max_sugar = numeric_field(self.max_sugar_input.value(), "Max sugar")?;
        let min_protein = numeric_field(self.min_protein_input.value(), "Min protein")?;

        Ok(RecommendRequest {
            recipe_text,
            ingredients,
            filters: RecipeFilters {
                max_calories,
                max_sugar,
                min_protein,
                nutri_score: self.nutri_score_select.selected(),
                exclude_allergens: self.allergen_select.selected(),
            },
        })
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent, now: Instant) -> Option<FormAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                return Some(match self.build_request() {
                    Ok(request) => FormAction::Submit(request),
                    Err(msg) => FormAction::Invalid(msg),
                });
            }
            (KeyCode::Tab, KeyModifiers::NONE) => {
                self.set_focus(self.focus.next(), now);
                return None;
            }
            (KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) => {
                self.set_focus(self.focus.prev(), now);
                return None;
            }
            (KeyCode::Esc, _) => {
                // The editor gets first shot so Esc can close its panel.
                if self.focus == FormField::Ingredients
                    && self.ingredient_editor.panel_visible()
                {
                    self.ingredient_editor.handle_input(key, now);
                    return None;
                }
                return Some(FormAction::Back);
            }
            _ => {}
        }

        match self.focus {
            FormField::Recipe => {
                self.recipe_input.handle_input(key);
            }
            FormField::Ingredients => {
                self.ingredient_editor.handle_input(key, now);
            }
            FormField::MaxCalories => {
                self.max_calories_input.handle_input(key);
            }
            FormField::MaxSugar => {
                self.max_sugar_input.handle_input(key);
            }
            FormField::MinProtein => {
                self.min_protein_input.handle_input(key);
            }
            FormField::NutriScore => {
                self.nutri_score_select.handle_input(key);
            }
            FormField::Allergens => {
                self.allergen_select.handle_input(key);
            }
        }
        None
    }

    /// Render the form.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // recipe
                Constraint::Length(5), // ingredients (chips + input)
                Constraint::Length(3), // numeric filters
                Constraint::Min(7),    // dietary filters
                Constraint::Length(1), // help
            ])
            .split(area);

        self.recipe_input
            .render(frame, chunks[0], "Recipe", self.focus == FormField::Recipe);

        let numeric = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(33),
                Constraint::Percentage(34),
            ])
            .split(chunks[2]);
        self.max_calories_input.render(
            frame,
            numeric[0],
            "Max calories",
            self.focus == FormField::MaxCalories,
        );
        self.max_sugar_input.render(
            frame,
            numeric[1],
            "Max sugar",
            self.focus == FormField::MaxSugar,
        );
        self.min_protein_input.render(
            frame,
            numeric[2],
            "Min protein",
            self.focus == FormField::MinProtein,
        );

        let selects = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[3]);
        self.nutri_score_select
            .render(frame, selects[0], self.focus == FormField::NutriScore);
        self.allergen_select
            .render(frame, selects[1], self.focus == FormField::Allergens);

        let help = Paragraph::new("Tab: next field  Ctrl+S: find products  Esc: back")
            .style(Style::default().fg(theme().muted))
            .alignment(Alignment::Center);
        frame.render_widget(help, chunks[4]);

        // Rendered last so the suggestion panel overlays the fields below.
        self.ingredient_editor
            .render(frame, chunks[1], self.focus == FormField::Ingredients);
    }
}

impl Default for FormView {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate an optional numeric filter field.
///
/// Empty means unset; otherwise the raw text is kept (the server parses
/// it) but it must at least look like a number.
fn numeric_field(raw: &str, label: &str) -> Result<Option<String>, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.parse::<f64>().is_err() {
        return Err(format!("{} must be a number", label));
    }
    Ok(Some(value.to_string()))
}
