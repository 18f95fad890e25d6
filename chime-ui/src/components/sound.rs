//! Notification Sounds
//!
//! Fire-and-forget playback of the two static cues.

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// Audible cues
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sound {
    /// A reminder is due, or one was just created
    Fulfillment,
    /// A reminder was deleted
    Regret,
}

impl Sound {
    pub fn src(self) -> &'static str {
        match self {
            Sound::Fulfillment => "/sounds/fulfillment.mp3",
            Sound::Regret => "/sounds/sad.mp3",
        }
    }
}

/// Start playback; overlapping cues are left to the browser
pub fn play(sound: Sound) {
    let audio = match web_sys::HtmlAudioElement::new_with_src(sound.src()) {
        Ok(audio) => audio,
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to create audio element: {:?}", e).into());
            return;
        }
    };

    match audio.play() {
        Ok(promise) => watch_playback(sound, promise),
        Err(e) => report_rejection(sound, &e),
    }
}

// Autoplay policy rejects the promise until the user has interacted with the page
fn watch_playback(sound: Sound, promise: js_sys::Promise) {
    leptos::spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            report_rejection(sound, &e);
        }
    });
}

fn report_rejection(sound: Sound, error: &JsValue) {
    web_sys::console::warn_1(&format!("Playback of {} rejected: {:?}", sound.src(), error).into());
}
