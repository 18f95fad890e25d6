//! Dashboard Page
//!
//! Lists the user's reminders, creates and deletes them, and plays the
//! fulfillment cue when one comes due.

use chrono::Utc;
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::sound::{self, Sound};
use crate::components::{DateTimePicker, DeleteDialog, InlineLoading, Loading};
use crate::state::global::GlobalState;
use crate::state::reminders::{FetchSequence, FulfillmentTracker, Reminder};
use crate::state::session;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let reminders = create_rw_signal(Vec::<Reminder>::new());
    let loading = create_rw_signal(false);
    let creating = create_rw_signal(false);
    let deleting = create_rw_signal(false);
    let pending_delete = create_rw_signal(None::<i64>);

    let title = create_rw_signal(String::new());
    let description = create_rw_signal(String::new());
    let remind_at = create_rw_signal(None::<String>);
    let picker_reset = create_rw_signal(0u32);

    let tracker = store_value(FulfillmentTracker::default());
    let sequence = store_value(FetchSequence::default());

    // Last issued fetch wins; older responses are dropped on arrival
    let fetch = move || {
        let Some(token) = session::token() else {
            state.show_error("You must be logged in to view / add reminders.");
            return;
        };
        let Some(seq) = sequence.try_update_value(|s| s.issue()) else {
            return;
        };
        loading.set(true);

        spawn_local(async move {
            let outcome = api::fetch_reminders(&token).await;
            let Some((accepted, newer_pending)) =
                sequence.try_update_value(|s| (s.accept(seq), s.pending_after(seq)))
            else {
                return;
            };
            if !accepted {
                web_sys::console::log_1(&format!("Dropping stale fetch #{}", seq).into());
                return;
            }
            match outcome {
                Ok(list) => reminders.set(list),
                Err(e) => state.show_error(&e.user_message("Failed to fetch reminders.")),
            }
            loading.set(newer_pending);
        });
    };

    fetch();

    // A different user starts with an empty fulfilled set
    create_effect(move |_| {
        let name = state.user_name.get();
        tracker.update_value(|t| t.observe_identity(name.as_deref()));
    });

    create_effect(move |_| {
        let list = reminders.get();
        if loading.get() || list.is_empty() {
            return;
        }
        let rung = tracker
            .try_update_value(|t| t.scan(&list, Utc::now()))
            .unwrap_or_default();
        for _ in rung {
            sound::play(Sound::Fulfillment);
        }
    });

    let on_create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if creating.get_untracked() {
            return;
        }
        state.clear_messages();

        let Some(token) = session::token() else {
            state.show_error("Please register or login first.");
            return;
        };
        // Sent as typed; whitespace-only counts as empty
        let title_text = title.get_untracked();
        let description_text = description.get_untracked();
        if title_text.trim().is_empty() || description_text.trim().is_empty() {
            state.show_error("Title and description are required");
            return;
        }
        let Some(at) = remind_at.get_untracked() else {
            state.show_error("Please pick a date and time");
            return;
        };

        creating.set(true);
        spawn_local(async move {
            match api::create_reminder(&token, &title_text, &description_text, &at).await {
                Ok(()) => {
                    state.show_success("Reminder created successfully!");
                    title.set(String::new());
                    description.set(String::new());
                    remind_at.set(None);
                    picker_reset.update(|n| *n += 1);
                    sound::play(Sound::Fulfillment);
                    fetch();
                }
                Err(e) => state.show_error(&e.user_message("Failed to create reminder")),
            }
            creating.set(false);
        });
    };

    let confirm_delete = Callback::new(move |_: ()| {
        let Some(id) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);
        if deleting.get_untracked() {
            return;
        }
        state.clear_messages();

        let Some(token) = session::token() else {
            state.show_error("You must be logged in to delete reminders.");
            return;
        };

        deleting.set(true);
        spawn_local(async move {
            match api::delete_reminder(&token, id).await {
                Ok(()) => {
                    state.show_success("Reminder deleted successfully!");
                    sound::play(Sound::Regret);
                    fetch();
                }
                Err(e) => state.show_error(&e.user_message("Failed to delete reminder")),
            }
            deleting.set(false);
        });
    });

    let cancel_delete = Callback::new(move |_: ()| pending_delete.set(None));

    let logout = move |_| {
        session::clear();
        sequence.update_value(|s| s.invalidate());
        reminders.set(Vec::new());
        loading.set(false);
        state.user_name.set(None);
        navigate("/login", NavigateOptions::default());
    };

    view! {
        <div class="min-h-screen flex flex-col items-center py-10 px-2 sm:py-16">
            <div class="w-full max-w-3xl">
                {move || state.user_name.get().map(|name| view! {
                    <div class="mb-6 text-center text-xl sm:text-2xl font-bold text-fuchsia-700 dark:text-fuchsia-300">
                        {format!("Welcome, {}!", name)}
                    </div>
                })}

                <div class="flex justify-end mb-6">
                    {move || if state.user_name.get().is_some() || session::is_logged_in() {
                        view! {
                            <button
                                class="px-5 py-2 rounded-xl bg-red-500 text-white font-bold shadow hover:bg-red-600"
                                on:click=logout.clone()
                            >
                                "Logout"
                            </button>
                        }.into_view()
                    } else {
                        view! {
                            <A
                                href="/signup"
                                class="px-5 py-2 rounded-xl bg-cyan-500 text-white font-bold shadow hover:bg-cyan-600"
                            >
                                "Sign Up"
                            </A>
                        }.into_view()
                    }}
                </div>

                <form
                    on:submit=on_create
                    class="bg-white/80 dark:bg-gray-800/90 backdrop-blur-xl p-6 sm:p-10 rounded-3xl shadow-2xl mb-10"
                >
                    <h2 class="text-2xl sm:text-3xl font-extrabold mb-6 text-center text-blue-700 dark:text-blue-300">
                        "Create Reminder"
                    </h2>
                    <input
                        type="text"
                        placeholder="Title"
                        required
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                        class=super::INPUT_CLASS
                    />
                    <textarea
                        placeholder="Description"
                        required
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                        class=super::INPUT_CLASS
                    />
                    <DateTimePicker
                        on_change=Callback::new(move |value: Option<String>| remind_at.set(value))
                        reset=picker_reset
                    />
                    <button type="submit" disabled=move || creating.get() class=super::BUTTON_CLASS>
                        {move || if creating.get() {
                            view! { <InlineLoading /> " Adding..." }.into_view()
                        } else {
                            "Add Reminder".into_view()
                        }}
                    </button>
                </form>

                <h2 class="text-2xl sm:text-3xl font-extrabold mb-6 text-center text-fuchsia-700 dark:text-fuchsia-300">
                    "Your Reminders"
                </h2>

                {move || if loading.get() {
                    view! { <Loading /> }.into_view()
                } else if reminders.with(Vec::is_empty) {
                    view! {
                        <div class="text-center text-gray-600 dark:text-gray-400 font-medium">
                            "No reminders found."
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <ul class="space-y-4">
                            <For
                                each=move || reminders.get()
                                key=|reminder| reminder.id
                                children=move |reminder: Reminder| {
                                    let id = reminder.id;
                                    view! {
                                        <li class="bg-white/80 dark:bg-gray-800/90 p-5 rounded-2xl shadow-lg flex items-start justify-between">
                                            <div>
                                                <div class="text-lg font-bold text-blue-700 dark:text-blue-300">
                                                    {reminder.title.clone()}
                                                </div>
                                                <div class="text-gray-700 dark:text-gray-300">
                                                    {reminder.description.clone()}
                                                </div>
                                                <div class="text-sm text-fuchsia-600 mt-2">
                                                    {reminder.display_time()}
                                                </div>
                                            </div>
                                            <button
                                                class="ml-4 px-3 py-1 rounded-lg bg-red-100 text-red-600 font-bold hover:bg-red-200 disabled:opacity-60"
                                                disabled=move || deleting.get()
                                                on:click=move |_| pending_delete.set(Some(id))
                                            >
                                                "Delete"
                                            </button>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    }.into_view()
                }}
            </div>

            <DeleteDialog
                open=Signal::derive(move || pending_delete.get().is_some())
                on_confirm=confirm_delete
                on_cancel=cancel_delete
            />
        </div>
    }
}
