//! Delete Confirmation Dialog
//!
//! Yes/no modal. The parent owns the open state and decides what confirm
//! and cancel do.

use leptos::*;

/// Modal asking whether to delete the selected reminder
#[component]
pub fn DeleteDialog(
    #[prop(into)]
    open: Signal<bool>,
    #[prop(into)]
    on_confirm: Callback<()>,
    /// Cancel button, overlay click or Escape
    #[prop(into)]
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || open.get() fallback=|| ()>
            <div
                class="fixed inset-0 bg-black/40 z-50"
                on:click=move |_| on_cancel.call(())
            />
            <div
                role="dialog"
                aria-modal="true"
                tabindex="-1"
                on:keydown=move |ev| {
                    if ev.key() == "Escape" {
                        on_cancel.call(());
                    }
                }
                class="fixed left-1/2 top-1/2 z-50 w-full max-w-xs sm:max-w-sm -translate-x-1/2 \
                       -translate-y-1/2 bg-white dark:bg-gray-800 rounded-2xl shadow-2xl p-6 \
                       flex flex-col items-center"
            >
                <span class="text-4xl mb-2">"⏰"</span>
                <h2 class="font-bold text-lg mb-2 text-fuchsia-700">"Delete Reminder?"</h2>
                <p class="mb-4 text-gray-700 dark:text-gray-300 text-center">
                    "Are you sure you want to delete this reminder? This action cannot be undone."
                </p>
                <div class="flex gap-4 mt-2">
                    <button
                        class="px-4 py-2 rounded-lg bg-red-500 hover:bg-red-600 text-white font-bold shadow"
                        on:click=move |_| on_confirm.call(())
                    >
                        "Yes, Delete"
                    </button>
                    <button
                        class="px-4 py-2 rounded-lg bg-gray-200 text-gray-700 font-bold shadow"
                        on:click=move |_| on_cancel.call(())
                    >
                        "Cancel"
                    </button>
                </div>
            </div>
        </Show>
    }
}
