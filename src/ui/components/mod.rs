//! Reusable UI components.

mod ingredient_editor;
mod input;
mod loading;
mod multiselect;
mod notification;

pub use ingredient_editor::{IngredientEditor, SuggestionQuery};
pub use input::TextInput;
pub use loading::LoadingIndicator;
pub use multiselect::MultiSelect;
pub use notification::{Notification, NotificationKind, NotificationManager};
