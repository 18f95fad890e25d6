//! Reminder Service API
//!
//! HTTP calls from the browser to the remote reminder service.

mod client;

pub use client::*;
