//! Login Page
//!
//! Email/password sign-in, plus the forgot-password panel.

use leptos::*;
use leptos_router::*;

use super::{redirect_after, BUTTON_CLASS, INPUT_CLASS};
use crate::api;
use crate::state::global::GlobalState;
use crate::state::session;

/// Login page component
#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (loading, set_loading) = create_signal(false);
    let (show_forgot, set_show_forgot) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        state.clear_messages();

        let email = email.get_untracked().trim().to_string();
        let password = password.get_untracked();
        if email.is_empty() || password.is_empty() {
            state.show_error("Email and password are required");
            return;
        }

        set_loading.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(&email, &password).await {
                Ok(response) if !response.token.is_empty() => {
                    session::save(&response.token, response.user.as_ref());
                    state.user_name.set(session::user_name());
                    state.show_success("Login successful! Redirecting...");
                    redirect_after(navigate, "/dashboard");
                }
                Ok(_) => {
                    web_sys::console::warn_1(&"Login response carried an empty token".into());
                    state.show_error("Login failed");
                }
                Err(e) => state.show_error(&e.user_message("Login failed")),
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center px-2">
            <form
                on:submit=on_submit
                class="bg-white/80 dark:bg-gray-800/90 backdrop-blur-xl p-6 sm:p-12 rounded-3xl shadow-2xl w-full max-w-xs sm:max-w-md"
            >
                <h2 class="text-2xl sm:text-4xl font-extrabold mb-6 sm:mb-10 text-center text-fuchsia-700">
                    "Sign In"
                </h2>
                <div class="mb-4 sm:mb-8 text-center text-gray-700 dark:text-gray-300 font-medium">
                    <span>"Don't have an account? "</span>
                    <A href="/signup" class="text-fuchsia-600 font-bold hover:underline">"Sign Up"</A>
                </div>
                <div class="mb-4 sm:mb-8 text-center">
                    <button
                        type="button"
                        class="text-blue-600 font-bold hover:underline"
                        on:click=move |_| set_show_forgot.set(true)
                    >
                        "Forgot password?"
                    </button>
                </div>
                <input
                    type="email"
                    placeholder="Email"
                    required
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    class=INPUT_CLASS
                />
                <input
                    type="password"
                    placeholder="Password"
                    required
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    class=INPUT_CLASS
                />
                <button type="submit" disabled=move || loading.get() class=BUTTON_CLASS>
                    {move || if loading.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>

            <Show when=move || show_forgot.get() fallback=|| ()>
                <ForgotPasswordPanel on_close=Callback::new(move |_: ()| set_show_forgot.set(false)) />
            </Show>
        </div>
    }
}

/// Modal form that mails a reset link
#[component]
fn ForgotPasswordPanel(on_close: Callback<()>) -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (loading, set_loading) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);
    let (success, set_success) = create_signal(None::<String>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        set_error.set(None);
        set_success.set(None);

        let email = email.get_untracked().trim().to_string();
        if email.is_empty() {
            set_error.set(Some("Email is required".to_string()));
            return;
        }

        set_loading.set(true);
        spawn_local(async move {
            match api::forgot_password(&email).await {
                Ok(()) => set_success.set(Some(
                    "Password reset link sent! Check your email.".to_string(),
                )),
                Err(e) => set_error.set(Some(e.user_message("Failed to send reset link"))),
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50 px-2">
            <form
                on:submit=on_submit
                class="bg-white/90 dark:bg-gray-800 backdrop-blur-xl p-6 sm:p-10 rounded-3xl shadow-2xl w-full max-w-xs sm:max-w-md"
            >
                <h2 class="text-xl sm:text-3xl font-bold mb-4 sm:mb-8 text-center text-blue-700">
                    "Forgot Password"
                </h2>
                <input
                    type="email"
                    placeholder="Enter your email"
                    required
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    class=INPUT_CLASS
                />
                <button type="submit" disabled=move || loading.get() class=BUTTON_CLASS>
                    {move || if loading.get() { "Sending..." } else { "Send Reset Link" }}
                </button>
                {move || error.get().map(|msg| view! {
                    <div class="text-red-500 mt-4 sm:mt-6 text-center font-bold">{msg}</div>
                })}
                {move || success.get().map(|msg| view! {
                    <div class="text-green-500 mt-4 sm:mt-6 text-center font-bold">{msg}</div>
                })}
                <button
                    type="button"
                    class="mt-4 sm:mt-8 text-gray-600 dark:text-gray-300 font-bold hover:underline w-full"
                    on:click=move |_| on_close.call(())
                >
                    "Back to Login"
                </button>
            </form>
        </div>
    }
}
