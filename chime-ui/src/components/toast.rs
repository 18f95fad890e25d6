//! Toast Notification Component
//!
//! Error first, then success. Empty messages are not shown.

use leptos::*;

use crate::state::global::GlobalState;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let slot = move |signal: RwSignal<Option<String>>, kind: ToastKind| {
        move || {
            signal
                .get()
                .filter(|msg| !msg.is_empty())
                .map(|msg| view! { <ToastMessage message=msg kind=kind slot=signal /> })
        }
    };

    view! {
        <div class="fixed top-20 sm:top-6 right-4 z-50 space-y-2">
            {slot(state.error, ToastKind::Error)}
            {slot(state.success, ToastKind::Success)}
        </div>
    }
}

#[derive(Clone, Copy)]
enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✕",
        }
    }

    fn colors(self) -> &'static str {
        match self {
            ToastKind::Success => "bg-green-100 text-green-800 border-green-400",
            ToastKind::Error => "bg-red-100 text-red-800 border-red-400",
        }
    }
}

/// One message; the close button empties the slot it came from
#[component]
fn ToastMessage(
    #[prop(into)]
    message: String,
    kind: ToastKind,
    slot: RwSignal<Option<String>>,
) -> impl IntoView {
    view! {
        <div
            role="status"
            class=format!(
                "flex items-center gap-3 border-l-4 px-4 py-3 rounded-xl shadow-lg max-w-xs {}",
                kind.colors()
            )
        >
            <span class="text-lg font-bold">{kind.icon()}</span>
            <span class="flex-1 text-sm font-semibold break-words">{message}</span>
            <button
                type="button"
                aria-label="Dismiss"
                class="text-lg leading-none opacity-60 hover:opacity-100"
                on:click=move |_| slot.set(None)
            >
                "×"
            </button>
        </div>
    }
}
