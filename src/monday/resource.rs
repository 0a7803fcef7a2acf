use fake::Dummy;
use log::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Column types understood by the item form. Anything else the board
/// reports is kept as `Other` and left out of the form.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ColumnType {
    Name,
    Text,
    Numbers,
    Status,
    Date,
    Other(String),
}

impl ColumnType {
    /// Returns the wire name of the column type.
    ///
    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::Name => "name",
            ColumnType::Text => "text",
            ColumnType::Numbers => "numbers",
            ColumnType::Status => "status",
            ColumnType::Date => "date",
            ColumnType::Other(other) => other,
        }
    }

    /// Returns true if the form knows how to render and validate the type.
    ///
    pub fn is_supported(&self) -> bool {
        !matches!(self, ColumnType::Other(_))
    }
}

impl From<&str> for ColumnType {
    fn from(value: &str) -> Self {
        match value {
            "name" => ColumnType::Name,
            "text" => ColumnType::Text,
            "numbers" => ColumnType::Numbers,
            "status" => ColumnType::Status,
            "date" => ColumnType::Date,
            other => ColumnType::Other(other.to_owned()),
        }
    }
}

impl From<String> for ColumnType {
    fn from(value: String) -> Self {
        ColumnType::from(value.as_str())
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defines board column data structure.
///
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BoardColumn {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(rename = "settings_str", default)]
    pub settings_raw: Option<String>,
}

impl BoardColumn {
    /// Returns the selectable options of a status column. Any other column
    /// type, or a column without settings, has none.
    ///
    pub fn status_options(&self) -> Vec<StatusOption> {
        match (&self.column_type, &self.settings_raw) {
            (ColumnType::Status, Some(raw)) => parse_status_options(raw),
            _ => vec![],
        }
    }
}

/// Defines a selectable label of a status column.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOption {
    pub index: i64,
    pub label: String,
}

/// Decode the options of a status column from its JSON settings.
///
/// `labels` is either an object keyed by the numeric option index, whose
/// values are plain labels or objects carrying a `title` or `name`, or an
/// array of options that already have an `index` and a `label`. Settings
/// that cannot be decoded yield no options.
///
pub fn parse_status_options(settings_raw: &str) -> Vec<StatusOption> {
    let settings: Value = match serde_json::from_str(settings_raw) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Failed to parse status column settings: {}", e);
            return vec![];
        }
    };

    match settings.get("labels") {
        Some(Value::Object(labels)) => {
            let mut options: Vec<StatusOption> = labels
                .iter()
                .filter_map(|(key, value)| {
                    let index = key.trim().parse::<i64>().ok()?;
                    Some(StatusOption {
                        index,
                        label: status_label(value),
                    })
                })
                .collect();
            options.sort_by_key(|option| option.index);
            options
        }
        Some(Value::Array(labels)) => labels
            .iter()
            .filter_map(|value| serde_json::from_value::<StatusOption>(value.clone()).ok())
            .collect(),
        _ => vec![],
    }
}

fn status_label(value: &Value) -> String {
    match value {
        Value::String(label) => label.clone(),
        Value::Object(fields) => ["title", "name"]
            .iter()
            .filter_map(|key| fields.get(*key).and_then(Value::as_str))
            .find(|label| !label.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

/// Defines the name and columns of a board.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSchema {
    pub board_name: String,
    pub columns: Vec<BoardColumn>,
}

impl BoardSchema {
    /// Placeholder used when the board could not be read from the response.
    ///
    pub const UNKNOWN_BOARD: &'static str = "Unknown Board";

    /// Returns the schema reported for unreadable board responses.
    ///
    pub fn unknown() -> Self {
        BoardSchema {
            board_name: Self::UNKNOWN_BOARD.to_owned(),
            columns: vec![],
        }
    }

    /// Returns the columns the form supports, the name column included.
    ///
    pub fn supported_columns(&self) -> Vec<BoardColumn> {
        self.columns
            .iter()
            .filter(|column| column.column_type.is_supported())
            .cloned()
            .collect()
    }

    /// Returns the columns rendered as dynamic form fields.
    ///
    pub fn input_columns(&self) -> Vec<BoardColumn> {
        self.columns
            .iter()
            .filter(|column| {
                column.column_type.is_supported() && column.column_type != ColumnType::Name
            })
            .cloned()
            .collect()
    }
}

/// A form field value. Serializes to the bare JSON value.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl FieldValue {
    /// Returns true for null and the empty string.
    ///
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the text content if the value is text.
    ///
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => Ok(()),
        }
    }
}

/// A column value submitted with a new item.
///
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnValue {
    pub id: String,
    pub value: FieldValue,
    pub column_type: ColumnType,
}

/// Encode column values as the flat `{column id: value}` JSON string the
/// create mutation expects.
///
pub fn encode_column_values(column_values: &[ColumnValue]) -> serde_json::Result<String> {
    let map: serde_json::Map<String, Value> = column_values
        .iter()
        .map(|cv| Ok((cv.id.clone(), serde_json::to_value(&cv.value)?)))
        .collect::<serde_json::Result<_>>()?;
    serde_json::to_string(&map)
}

/// Defines the confirmation returned for a created item.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Deserialize)]
pub struct CreatedItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
}
