//! Terminal client for adding items to a monday.com board.
//!
//! The form is generated from the board's columns: text, number, status and
//! date columns become inputs, values are validated as they are typed and
//! again on submit, and the board schema is cached between loads.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod monday;
pub mod state;
pub mod ui;
