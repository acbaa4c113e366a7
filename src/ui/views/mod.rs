//! Application views (screens).

mod form;
mod home;
mod results;

pub use form::{FormAction, FormField, FormView};
pub use home::{HealthState, HomeAction, HomeView};
pub use results::{ResultsAction, ResultsView};
