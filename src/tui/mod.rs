//! # TUI Module
//!
//! Terminal chat front-end: transcript, input line, persona selector and
//! creativity gauge.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial chat screen

pub mod app;
pub mod event;
pub mod ui;

pub use app::App;
pub use event::{Event, EventHandler};
