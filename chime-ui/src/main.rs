//! Chime Web Client
//!
//! Reminder dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Login, signup, forgot and reset password
//! - Create, list and delete reminders
//! - A sound cue when a reminder comes due
//! - Dark mode
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the reminder service over HTTP and keeps the
//! session in `localStorage`.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
