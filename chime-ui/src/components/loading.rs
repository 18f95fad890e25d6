//! Loading Component
//!
//! Loading spinners.

use leptos::*;

/// Full-width loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12 space-x-3 text-fuchsia-700 font-bold">
            <div class="loading-spinner w-8 h-8" />
            <span>"Loading..."</span>
        </div>
    }
}

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}
