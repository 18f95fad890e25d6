//! Reminder Notifications
//!
//! - **Tracker**: which reminders are due and which already rang
//! - **Sound**: the cues and the players that emit them

mod sound;
mod tracker;

pub use sound::{build_player, CommandPlayer, SilentPlayer, Sound, SoundPlayer, TerminalBell};
pub use tracker::{FulfillmentTracker, DEFAULT_WINDOW};
