//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
    /// Name of the logged-in user, from the stored profile
    pub user_name: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        user_name: create_rw_signal(crate::state::session::user_name()),
    };

    provide_context(state);
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }

    /// Clear both messages before an operation starts
    pub fn clear_messages(&self) {
        self.error.set(None);
        self.success.set(None);
    }
}
