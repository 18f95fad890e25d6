//! Theme Toggle
//!
//! Dark/light switch. The choice lives under the `darkMode` storage key and
//! is applied as the `dark` class on `<html>`.

use leptos::*;

const STORAGE_KEY: &str = "darkMode";

fn read_saved() -> bool {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
        .map(|v| v == "true")
        .unwrap_or(false)
}

fn apply(dark: bool) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Ok(Some(storage)) = window.local_storage() {
        let _ = storage.set_item(STORAGE_KEY, if dark { "true" } else { "false" });
    }
    if let Some(root) = window.document().and_then(|d| d.document_element()) {
        let classes = root.class_list();
        let result = if dark {
            classes.add_1("dark")
        } else {
            classes.remove_1("dark")
        };
        if let Err(e) = result {
            web_sys::console::error_1(&format!("Failed to toggle theme: {:?}", e).into());
        }
    }
}

/// Fixed button in the top-right corner
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let dark = create_rw_signal(read_saved());

    create_effect(move |_| apply(dark.get()));

    view! {
        <div class="fixed top-4 right-4 z-50">
            <button
                on:click=move |_| dark.update(|d| *d = !*d)
                class="px-4 py-2 rounded bg-gray-800 text-white dark:bg-gray-200 dark:text-gray-900 \
                       font-semibold shadow hover:bg-gray-700 dark:hover:bg-gray-300 transition"
            >
                {move || if dark.get() { "Light Mode" } else { "Dark Mode" }}
            </button>
        </div>
    }
}
