//! State Management
//!
//! Global toast state, the stored session, and reminder bookkeeping.

pub mod global;
pub mod reminders;
pub mod session;

pub use global::{provide_global_state, GlobalState};
pub use reminders::{FetchSequence, FulfillmentTracker, Reminder};
