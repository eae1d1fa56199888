//! NuCaloric terminal: a simulated shell rendered in the browser.
//!
//! - [`core`] - Session, commands, filesystem and special modes (no DOM)
//! - [`components`] - Leptos view over the session
//! - [`models`] - Plain data shared by both

pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;

pub use app::App;
