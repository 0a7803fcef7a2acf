//! Item submission payloads.
//!
//! [`State::begin_submit`](super::State::begin_submit) validates the form and
//! produces a [`PendingSubmission`]; the network handler sends it and hands the
//! outcome back to [`State::finish_submit`](super::State::finish_submit).

use super::form::FormData;
use crate::monday::{BoardColumn, ColumnType, ColumnValue, FieldValue};

/// Message shown when a failed creation carries no message of its own.
///
pub const CREATE_ITEM_FALLBACK_ERROR: &str = "Failed to create item";

/// Returns the toast text for a created item.
///
pub fn success_message(item_name: &str) -> String {
    format!("Item '{}' created successfully! 🎉", item_name)
}

/// Build the column values to send with a new item: one entry per non-name
/// column, in column order, skipping columns with no value or an empty one.
///
pub fn build_column_values(form_data: &FormData, columns: &[BoardColumn]) -> Vec<ColumnValue> {
    columns
        .iter()
        .filter(|column| column.column_type != ColumnType::Name)
        .filter_map(|column| {
            let value = form_data.get(&column.id)?;
            if *value == FieldValue::default() {
                return None;
            }
            Some(ColumnValue {
                id: column.id.clone(),
                value: value.clone(),
                column_type: column.column_type.clone(),
            })
        })
        .collect()
}

/// A validated item creation waiting to be sent.
///
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSubmission {
    pub board_id: String,
    pub item_name: String,
    pub column_values: Vec<ColumnValue>,
    /// Generation of the form the submission came from.
    pub generation: u64,
    pub reset_data: FormData,
}

impl PendingSubmission {
    pub fn new(
        board_id: String,
        form_data: &FormData,
        columns: &[BoardColumn],
        generation: u64,
    ) -> Self {
        PendingSubmission {
            board_id,
            item_name: form_data.item_name().to_owned(),
            column_values: build_column_values(form_data, columns),
            generation,
            reset_data: FormData::blank_for(columns),
        }
    }
}
