//! Leptos components making up the app.

pub mod heart_rain;
pub mod surprise;
