//! Stored Session
//!
//! Token and user profile in `window.localStorage`, under the same keys the
//! native client uses.

use serde_json::Value;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Stored token, if any
pub fn token() -> Option<String> {
    storage()?
        .get_item(TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|t| !t.is_empty())
}

pub fn is_logged_in() -> bool {
    token().is_some()
}

/// Name from the stored profile; an unreadable profile counts as absent
pub fn user_name() -> Option<String> {
    let raw = storage()?.get_item(USER_KEY).ok().flatten()?;
    parse_user_name(&raw)
}

fn parse_user_name(raw: &str) -> Option<String> {
    let value: Value = serde_json::from_str(raw).ok()?;
    value.get("name")?.as_str().map(str::to_string)
}

/// Persist a fresh login. The profile is kept verbatim.
pub fn save(token: &str, user: Option<&Value>) {
    let Some(storage) = storage() else {
        web_sys::console::error_1(&"localStorage unavailable; session not saved".into());
        return;
    };
    let _ = storage.set_item(TOKEN_KEY, token);
    match user {
        Some(user) => {
            let _ = storage.set_item(USER_KEY, &user.to_string());
        }
        None => {
            let _ = storage.remove_item(USER_KEY);
        }
    }
}

/// Forget token and profile (logout)
pub fn clear() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}
