#![deny(unsafe_code)]

/// Application shell: header, routed body and toasts.
pub mod app;
pub mod chat;
pub mod header;
/// Settings and session persistence.
pub mod settings;
