//! Application state and update logic.
//!
//! The [`App`] owns the three screens and routes events to whichever is
//! active. Background fetch results arrive as [`ApiMessage`]s and are
//! folded back into view state here.

use std::time::Instant;

use crossterm::event::KeyCode;
use ratatui::Frame;
use tracing::{debug, warn};

use crate::api::types::RecommendRequest;
use crate::events::Event;
use crate::tasks::ApiMessage;
use crate::ui::components::{NotificationManager, SuggestionQuery};
use crate::ui::views::{
    FormAction, FormView, HealthState, HomeAction, HomeView, ResultsAction, ResultsView,
};

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Home,
    Form,
    Results,
}

/// Top-level application state.
pub struct App {
    state: AppState,
    home: HomeView,
    form: FormView,
    results: ResultsView,
    notifications: NotificationManager,
    /// Request waiting to be handed to the task spawner.
    pending_submit: Option<RecommendRequest>,
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: AppState::Home,
            home: HomeView::new(),
            form: FormView::new(),
            results: ResultsView::new(),
            notifications: NotificationManager::new(),
            pending_submit: None,
            should_quit: false,
        }
    }

    /// Create the app with custom autocomplete tunables.
    pub fn with_settings(debounce: std::time::Duration, suggestion_limit: usize) -> Self {
        let mut form = FormView::with_debounce(debounce);
        form.set_suggestion_limit(suggestion_limit);
        Self {
            state: AppState::Home,
            home: HomeView::new(),
            form,
            results: ResultsView::new(),
            notifications: NotificationManager::new(),
            pending_submit: None,
            should_quit: false,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle a terminal event.
    pub fn update(&mut self, event: Event, now: Instant) {
        match event {
            Event::Quit => self.should_quit = true,
            Event::Tick | Event::Resize(..) => {
                self.notifications.tick();
                self.results.tick();
            }
            Event::Key(key) => self.handle_key(key, now),
        }
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent, now: Instant) {
        match self.state {
            AppState::Home => match self.home.handle_input(key) {
                Some(HomeAction::StartForm) => self.state = AppState::Form,
                Some(HomeAction::Quit) => self.should_quit = true,
                None => {}
            },
            AppState::Form => match self.form.handle_input(key, now) {
                Some(FormAction::Submit(request)) => {
                    debug!(
                        ingredients = request.ingredients.len(),
                        "Recipe form submitted"
                    );
                    self.pending_submit = Some(request);
                    self.results.set_loading();
                    self.state = AppState::Results;
                }
                Some(FormAction::Invalid(message)) => {
                    self.notifications.error(message);
                }
                Some(FormAction::Back) => self.state = AppState::Home,
                None => {}
            },
            AppState::Results => {
                if key.code == KeyCode::Char('q') {
                    self.should_quit = true;
                    return;
                }
                if let Some(ResultsAction::Back) = self.results.handle_input(key) {
                    self.state = AppState::Form;
                }
            }
        }
    }

    /// Fold a background fetch result into view state.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::HealthChecked(Ok(status)) => {
                if !status.recommender_loaded {
                    self.notifications
                        .info("Server is up but the recommender is still loading");
                }
                self.home.set_health(HealthState::Healthy(status));
            }
            ApiMessage::HealthChecked(Err(e)) => {
                warn!(error = %e, "Health check failed");
                self.notifications.error(e.clone());
                self.home.set_health(HealthState::Unreachable(e));
            }
            ApiMessage::SuggestionsFetched { seq, result } => {
                self.form.apply_suggestions(seq, result);
            }
            ApiMessage::DietaryOptionsFetched(Ok(options)) => {
                self.form.set_dietary_options(&options);
            }
            ApiMessage::DietaryOptionsFetched(Err(e)) => {
                // The form keeps its built-in fallback options.
                debug!(error = %e, "Dietary options fetch failed");
            }
            ApiMessage::RecommendationsFetched { result } => match result {
                Ok(response) => self.results.set_results(response),
                Err(e) => self.results.set_error(e),
            },
        }
    }

    /// Advance debounce deadlines; returns an autocomplete query that is
    /// due for fetching.
    pub fn poll_suggestion_query(&mut self, now: Instant) -> Option<SuggestionQuery> {
        if self.state == AppState::Form {
            self.form.poll(now)
        } else {
            None
        }
    }

    /// Take the recommendation request submitted this cycle, if any.
    pub fn take_pending_submit(&mut self) -> Option<RecommendRequest> {
        self.pending_submit.take()
    }

    /// Render the active screen plus the toast stack.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        match self.state {
            AppState::Home => self.home.render(frame, area),
            AppState::Form => self.form.render(frame, area),
            AppState::Results => self.results.render(frame, area),
        }
        self.notifications.render(frame, area);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
