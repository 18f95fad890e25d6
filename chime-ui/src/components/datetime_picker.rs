//! Date/Time Picker
//!
//! Wraps a `datetime-local` input with one-second steps and reports the
//! chosen instant as an ISO-8601 UTC string.

use chrono::{Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use leptos::*;

/// Convert the input's local wall-clock value to `YYYY-MM-DDTHH:MM:SS.sssZ`
pub fn to_iso_utc(value: &str) -> Option<String> {
    let value = value.trim();
    let naive = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())?;
    let local = Local.from_local_datetime(&naive).earliest()?;
    Some(
        local
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

/// Exact date and time input
#[component]
pub fn DateTimePicker(
    /// Called with the ISO string, or `None` when the input is cleared
    #[prop(into)]
    on_change: Callback<Option<String>>,
    /// Bumped by the parent to clear the input after a submit
    #[prop(into)]
    reset: Signal<u32>,
) -> impl IntoView {
    let (raw, set_raw) = create_signal(String::new());

    create_effect(move |_| {
        reset.track();
        set_raw.set(String::new());
    });

    view! {
        <div class="w-full flex flex-col items-center">
            <label class="sr-only" for="remind-at">"Select exact date & time"</label>
            <input
                id="remind-at"
                type="datetime-local"
                step="1"
                required
                prop:value=move || raw.get()
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    on_change.call(to_iso_utc(&value));
                    set_raw.set(value);
                }
                class="w-full p-4 mb-10 border-2 border-fuchsia-400 rounded-3xl focus:outline-none \
                       focus:ring-4 focus:ring-fuchsia-400 shadow-2xl text-lg font-extrabold \
                       text-blue-700 dark:bg-gray-700 dark:text-blue-200"
            />
        </div>
    }
}
