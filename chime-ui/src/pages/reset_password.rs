//! Reset Password Page
//!
//! Reached from the emailed link; the reset token is the `token` query
//! parameter.

use leptos::*;
use leptos_router::*;

use super::{redirect_after, BUTTON_CLASS, INPUT_CLASS};
use crate::api;
use crate::state::global::GlobalState;

#[component]
pub fn ResetPassword() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let query = use_query_map();

    let (new_password, set_new_password) = create_signal(String::new());
    let (loading, set_loading) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        state.clear_messages();

        let token = query.with_untracked(|q| q.get("token").cloned().unwrap_or_default());
        let password = new_password.get_untracked();
        if token.is_empty() {
            state.show_error("This reset link is missing its token");
            return;
        }
        if password.is_empty() {
            state.show_error("New password is required");
            return;
        }

        set_loading.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::reset_password(&token, &password).await {
                Ok(()) => {
                    state.show_success("Password reset successful! Redirecting to login...");
                    redirect_after(navigate, "/login");
                }
                Err(e) => state.show_error(&e.user_message("Failed to reset password")),
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center px-2">
            <form
                on:submit=on_submit
                class="bg-white/80 dark:bg-gray-800/90 backdrop-blur-xl p-12 rounded-3xl shadow-2xl w-full max-w-md"
            >
                <h2 class="text-4xl font-extrabold mb-10 text-center text-blue-700">
                    "Reset Password"
                </h2>
                <input
                    type="password"
                    placeholder="New Password"
                    required
                    prop:value=move || new_password.get()
                    on:input=move |ev| set_new_password.set(event_target_value(&ev))
                    class=INPUT_CLASS
                />
                <button type="submit" disabled=move || loading.get() class=BUTTON_CLASS>
                    {move || if loading.get() { "Resetting..." } else { "Reset Password" }}
                </button>
            </form>
        </div>
    }
}
