//! Page Components
//!
//! Top-level page components for routing.

pub mod dashboard;
pub mod login;
pub mod reset_password;
pub mod signup;

pub use dashboard::Dashboard;
pub use login::Login;
pub use reset_password::ResetPassword;
pub use signup::Signup;

use leptos_router::NavigateOptions;

/// Delay before leaving an auth page after success
const REDIRECT_DELAY_MS: u32 = 1500;

/// Navigate to `path` once the success toast has been visible for a moment
pub(crate) fn redirect_after(
    navigate: impl Fn(&str, NavigateOptions) + 'static,
    path: &'static str,
) {
    gloo_timers::callback::Timeout::new(REDIRECT_DELAY_MS, move || {
        navigate(path, NavigateOptions::default());
    })
    .forget();
}

/// Shared input styling
pub(crate) const INPUT_CLASS: &str = "w-full p-3 sm:p-4 mb-4 sm:mb-6 border border-fuchsia-300 \
    rounded-xl focus:outline-none focus:ring-4 focus:ring-fuchsia-400 shadow-md text-base \
    sm:text-lg text-gray-900 placeholder:text-gray-500 dark:bg-gray-700 dark:text-white";

/// Shared submit button styling
pub(crate) const BUTTON_CLASS: &str = "w-full bg-gradient-to-r from-fuchsia-500 via-blue-500 \
    to-cyan-400 text-white py-3 sm:py-4 rounded-xl font-extrabold shadow-lg hover:scale-105 \
    transition-transform duration-300 text-base sm:text-lg disabled:opacity-60";
