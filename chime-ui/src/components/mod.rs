//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod datetime_picker;
pub mod delete_dialog;
pub mod loading;
pub mod sound;
pub mod theme_toggle;
pub mod toast;

pub use datetime_picker::DateTimePicker;
pub use delete_dialog::DeleteDialog;
pub use loading::{InlineLoading, Loading};
pub use theme_toggle::ThemeToggle;
pub use toast::Toast;
