//! Form state store.
//!
//! Holds the values entered into the item form, the per-field error
//! messages, and the dirty and submitting flags. All mutation goes through
//! the transition methods on [`FormStore`].

use super::StateError;
use crate::monday::{BoardColumn, ColumnType, FieldValue};
use std::collections::BTreeMap;

/// Key of the item name field.
///
pub const ITEM_NAME_KEY: &str = "item_name";

/// Field values keyed by `item_name` or column id. The item name key is
/// always present; a missing column key means nothing was entered yet.
///
#[derive(Clone, Debug, PartialEq)]
pub struct FormData(BTreeMap<String, FieldValue>);

impl FormData {
    /// Returns form data holding only an empty item name.
    ///
    pub fn new() -> Self {
        let mut values = BTreeMap::new();
        values.insert(ITEM_NAME_KEY.to_owned(), FieldValue::default());
        FormData(values)
    }

    /// Returns form data with an empty item name and an empty string for
    /// every non-name column.
    ///
    pub fn blank_for(columns: &[BoardColumn]) -> Self {
        let mut data = FormData::new();
        for column in columns
            .iter()
            .filter(|column| column.column_type != ColumnType::Name)
        {
            data.0.insert(column.id.clone(), FieldValue::default());
        }
        data
    }

    /// Returns the item name, or an empty string if it is not text.
    ///
    pub fn item_name(&self) -> &str {
        self.0
            .get(ITEM_NAME_KEY)
            .and_then(FieldValue::as_text)
            .unwrap_or("")
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn set(&mut self, key: &str, value: FieldValue) {
        self.0.insert(key.to_owned(), value);
    }
}

impl Default for FormData {
    fn default() -> Self {
        FormData::new()
    }
}

impl From<BTreeMap<String, FieldValue>> for FormData {
    fn from(mut values: BTreeMap<String, FieldValue>) -> Self {
        values
            .entry(ITEM_NAME_KEY.to_owned())
            .or_insert_with(FieldValue::default);
        FormData(values)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values: BTreeMap<String, FieldValue> = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        FormData::from(values)
    }
}

/// Error messages keyed like [`FormData`]. A missing key means no error.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    pub fn new() -> Self {
        FormErrors::default()
    }

    /// Returns the error message for the field, if any.
    ///
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|message| !message.is_empty())
    }

    pub fn insert(&mut self, key: &str, message: String) {
        self.0.insert(key.to_owned(), message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(String::is_empty)
    }

    pub fn len(&self) -> usize {
        self.0.values().filter(|message| !message.is_empty()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, message)| !message.is_empty())
            .map(|(key, message)| (key.as_str(), message.as_str()))
    }

    fn clear_field(&mut self, key: &str) {
        self.0.remove(key);
    }
}

/// Snapshot of the form.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    pub form_data: FormData,
    pub errors: FormErrors,
    pub is_submitting: bool,
    pub is_dirty: bool,
}

/// Owns the state of one mounted item form.
///
#[derive(Debug, Default)]
pub struct FormStore {
    state: FormState,
}

impl FormStore {
    /// Returns a store holding a pristine form.
    ///
    pub fn new() -> Self {
        FormStore::default()
    }

    /// Returns a read-only snapshot of the form.
    ///
    pub fn snapshot(&self) -> &FormState {
        &self.state
    }

    pub fn form_data(&self) -> &FormData {
        &self.state.form_data
    }

    pub fn errors(&self) -> &FormErrors {
        &self.state.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty
    }

    /// Returns true if the item name is filled in and nothing is in flight.
    ///
    pub fn can_submit(&self) -> bool {
        !self.state.form_data.item_name().trim().is_empty() && !self.state.is_submitting
    }

    /// Replace the value of one field, mark the form dirty and clear the
    /// field's error.
    ///
    pub fn set_field(&mut self, field: &str, value: FieldValue) -> &mut Self {
        self.state.form_data.set(field, value);
        self.state.is_dirty = true;
        self.state.errors.clear_field(field);
        self
    }

    /// Replace all error messages.
    ///
    pub fn set_errors(&mut self, errors: FormErrors) -> &mut Self {
        self.state.errors = errors;
        self
    }

    /// Replace all field values and mark the form dirty.
    ///
    pub fn set_form_data(&mut self, form_data: FormData) -> &mut Self {
        self.state.form_data = form_data;
        self.state.is_dirty = true;
        self
    }

    /// Set the submitting flag. Starting a submission while one is already
    /// running is rejected.
    ///
    pub fn set_submitting(&mut self, submitting: bool) -> Result<&mut Self, StateError> {
        if submitting && self.state.is_submitting {
            return Err(StateError::AlreadySubmitting);
        }
        self.state.is_submitting = submitting;
        Ok(self)
    }

    /// Clear the submitting flag.
    ///
    pub fn clear_submitting(&mut self) -> &mut Self {
        self.state.is_submitting = false;
        self
    }

    /// Replace the whole form with a fresh one holding the given data, or
    /// an empty item name if none is given.
    ///
    pub fn reset_form(&mut self, form_data: Option<FormData>) -> &mut Self {
        self.state = FormState {
            form_data: form_data.unwrap_or_default(),
            ..FormState::default()
        };
        self
    }
}
