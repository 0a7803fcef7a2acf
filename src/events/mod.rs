//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Network events: board loads and item creation against monday.com
//! - Terminal events: key presses and render ticks

pub mod network;
pub mod terminal;
