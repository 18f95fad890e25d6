//! Signup Page

use leptos::*;
use leptos_router::*;

use super::{redirect_after, BUTTON_CLASS, INPUT_CLASS};
use crate::api;
use crate::state::global::GlobalState;

/// Signup page component
#[component]
pub fn Signup() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let name = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let phone = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let (loading, set_loading) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        state.clear_messages();

        let fields = (
            name.get_untracked().trim().to_string(),
            email.get_untracked().trim().to_string(),
            phone.get_untracked().trim().to_string(),
            password.get_untracked(),
        );
        if fields.0.is_empty() || fields.1.is_empty() || fields.2.is_empty() || fields.3.is_empty()
        {
            state.show_error("All fields are required");
            return;
        }

        set_loading.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let (n, e, p, pw) = fields;
            match api::signup(&n, &e, &p, &pw).await {
                Ok(()) => {
                    state.show_success("Signup successful! Redirecting to login...");
                    for field in [name, email, phone, password] {
                        field.set(String::new());
                    }
                    redirect_after(navigate, "/login");
                }
                Err(err) => state.show_error(&err.user_message("Signup failed")),
            }
            set_loading.set(false);
        });
    };

    let input = move |kind: &'static str, placeholder: &'static str, signal: RwSignal<String>| {
        view! {
            <input
                type=kind
                placeholder=placeholder
                required
                prop:value=move || signal.get()
                on:input=move |ev| signal.set(event_target_value(&ev))
                class=INPUT_CLASS
            />
        }
    };

    view! {
        <div class="min-h-screen flex items-center justify-center px-2">
            <form
                on:submit=on_submit
                class="bg-white/80 dark:bg-gray-800/90 backdrop-blur-xl p-6 sm:p-12 rounded-3xl shadow-2xl w-full max-w-xs sm:max-w-md"
            >
                <h2 class="text-2xl sm:text-4xl font-extrabold mb-6 sm:mb-10 text-center text-cyan-700">
                    "Sign Up"
                </h2>
                <div class="mb-4 sm:mb-8 text-center text-gray-700 dark:text-gray-300 font-medium">
                    <span>"Already have an account? "</span>
                    <A href="/login" class="text-fuchsia-600 font-bold hover:underline">"Login"</A>
                </div>
                {input("text", "Name", name)}
                {input("email", "Email", email)}
                {input("tel", "Phone", phone)}
                {input("password", "Password", password)}
                <button type="submit" disabled=move || loading.get() class=BUTTON_CLASS>
                    {move || if loading.get() { "Signing up..." } else { "Sign Up" }}
                </button>
            </form>
        </div>
    }
}
