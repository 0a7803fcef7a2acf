//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds all application data
//! - The item form store and its field validation
//! - Submission payloads handed to the network thread
//! - Application status (loading flag, top-level error, toast)
//! - State error handling

mod error;
mod form;
mod navigation;
mod state_impl;
mod status;
mod submit;
mod validation;

pub use error::StateError;
pub use form::{FormData, FormErrors, FormState, FormStore, ITEM_NAME_KEY};
pub use navigation::{FormField, View};
pub use state_impl::{BoardLoad, State, DEFAULT_BOARD_TITLE};
pub use status::{AppStatus, Notification, NotificationKind, TOAST_DURATION};
pub use submit::{
    build_column_values, success_message, PendingSubmission, CREATE_ITEM_FALLBACK_ERROR,
};
pub use validation::{
    is_valid_date, rule_for, validate, validate_form, validate_item_name, ColumnRule,
    InputWidget, INVALID_DATE, INVALID_NUMBER, ITEM_NAME_REQUIRED, MAX_TEXT_LENGTH,
    TEXT_TOO_LONG,
};
