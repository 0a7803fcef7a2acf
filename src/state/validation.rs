//! Field validation.
//!
//! Every supported column type maps to a [`ColumnRule`] naming the input
//! widget used to edit it and the check applied to its value. Checks return
//! the user-facing message, or `None` when the value is acceptable.

use super::form::{FormData, FormErrors, ITEM_NAME_KEY};
use crate::monday::{BoardColumn, ColumnType, FieldValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

pub const INVALID_NUMBER: &str = "Please enter a valid number";
pub const TEXT_TOO_LONG: &str = "Text must be less than 500 characters";
pub const INVALID_DATE: &str = "Please enter a valid date";
pub const ITEM_NAME_REQUIRED: &str = "Item name is required";

/// Longest text value accepted, in characters.
///
pub const MAX_TEXT_LENGTH: usize = 500;

/// Input widget used to edit a column.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputWidget {
    TextField,
    NumberField,
    Dropdown,
    DatePicker,
}

/// How a column type is edited and checked.
///
#[derive(Debug, Clone, Copy)]
pub struct ColumnRule {
    pub widget: InputWidget,
    pub check: fn(&FieldValue) -> Option<&'static str>,
}

const TEXT_RULE: ColumnRule = ColumnRule {
    widget: InputWidget::TextField,
    check: check_text,
};

const NUMBERS_RULE: ColumnRule = ColumnRule {
    widget: InputWidget::NumberField,
    check: check_number,
};

const STATUS_RULE: ColumnRule = ColumnRule {
    widget: InputWidget::Dropdown,
    check: accept,
};

const DATE_RULE: ColumnRule = ColumnRule {
    widget: InputWidget::DatePicker,
    check: check_date,
};

/// Returns the rule for a column type. Unsupported types and the name column
/// are edited as plain text and never rejected.
///
pub fn rule_for(column_type: &ColumnType) -> ColumnRule {
    match column_type {
        ColumnType::Text => TEXT_RULE,
        ColumnType::Numbers => NUMBERS_RULE,
        ColumnType::Status => STATUS_RULE,
        ColumnType::Date => DATE_RULE,
        ColumnType::Name | ColumnType::Other(_) => ColumnRule {
            widget: InputWidget::TextField,
            check: accept,
        },
    }
}

/// Returns the error message for a column value, if any. Absent and blank
/// values are never an error.
///
pub fn validate(value: Option<&FieldValue>, column_type: &ColumnType) -> Option<String> {
    let value = value.filter(|value| !value.is_blank())?;
    (rule_for(column_type).check)(value).map(str::to_owned)
}

/// Returns the error message for the item name, if any.
///
pub fn validate_item_name(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        Some(ITEM_NAME_REQUIRED.to_owned())
    } else {
        None
    }
}

/// Validate the item name and every non-name column of the form.
///
pub fn validate_form(form_data: &FormData, columns: &[BoardColumn]) -> FormErrors {
    let mut errors = FormErrors::new();
    if let Some(message) = validate_item_name(form_data.item_name()) {
        errors.insert(ITEM_NAME_KEY, message);
    }
    for column in columns
        .iter()
        .filter(|column| column.column_type != ColumnType::Name)
    {
        if let Some(message) = validate(form_data.get(&column.id), &column.column_type) {
            errors.insert(&column.id, message);
        }
    }
    errors
}

fn accept(_: &FieldValue) -> Option<&'static str> {
    None
}

fn check_text(value: &FieldValue) -> Option<&'static str> {
    match value {
        FieldValue::Text(text) if text.chars().count() > MAX_TEXT_LENGTH => Some(TEXT_TOO_LONG),
        _ => None,
    }
}

fn number_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").ok())
        .as_ref()
}

fn is_number(text: &str) -> bool {
    match number_pattern() {
        Some(re) => re.is_match(text),
        None => text.parse::<f64>().map(f64::is_finite).unwrap_or(false),
    }
}

fn check_number(value: &FieldValue) -> Option<&'static str> {
    let valid = match value {
        FieldValue::Text(text) => {
            let text = text.trim();
            text.is_empty() || is_number(text)
        }
        FieldValue::Number(number) => number.is_finite(),
        FieldValue::Bool(_) | FieldValue::Null => true,
    };
    (!valid).then_some(INVALID_NUMBER)
}

/// Local date and time layouts accepted besides plain dates and RFC 3339.
///
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Returns true if the text is a calendar date, a date and time with or
/// without seconds, or an RFC 3339 timestamp.
///
pub fn is_valid_date(text: &str) -> bool {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
        || DATE_TIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(text, format).is_ok())
        || DateTime::parse_from_rfc3339(text).is_ok()
}

fn check_date(value: &FieldValue) -> Option<&'static str> {
    match value {
        FieldValue::Text(text) if !is_valid_date(text) => Some(INVALID_DATE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monday::testing::sample_schema;
    use fake::{Fake, Faker};

    fn text(value: &str) -> FieldValue {
        FieldValue::from(value)
    }

    #[test]
    fn test_rule_widgets() {
        assert_eq!(rule_for(&ColumnType::Text).widget, InputWidget::TextField);
        assert_eq!(rule_for(&ColumnType::Numbers).widget, InputWidget::NumberField);
        assert_eq!(rule_for(&ColumnType::Status).widget, InputWidget::Dropdown);
        assert_eq!(rule_for(&ColumnType::Date).widget, InputWidget::DatePicker);
        assert_eq!(
            rule_for(&ColumnType::from("people")).widget,
            InputWidget::TextField
        );
    }

    #[test]
    fn test_absent_and_blank_values_are_valid() {
        for column_type in [
            ColumnType::Text,
            ColumnType::Numbers,
            ColumnType::Status,
            ColumnType::Date,
        ] {
            assert_eq!(validate(None, &column_type), None);
            assert_eq!(validate(Some(&text("")), &column_type), None);
            assert_eq!(validate(Some(&FieldValue::Null), &column_type), None);
        }
    }

    #[test]
    fn test_numbers() {
        for valid in ["0", "42", "-3.5", "+7", ".5", "5.", "1e3", "2.5E-4", " 12 "] {
            assert_eq!(validate(Some(&text(valid)), &ColumnType::Numbers), None, "{}", valid);
        }
        for invalid in ["abc", "12abc", "1.2.3", "--1", "e5", "1e"] {
            assert_eq!(
                validate(Some(&text(invalid)), &ColumnType::Numbers).as_deref(),
                Some(INVALID_NUMBER),
                "{}",
                invalid
            );
        }
        assert_eq!(
            validate(Some(&FieldValue::Number(12.5)), &ColumnType::Numbers),
            None
        );
        assert!(validate(Some(&FieldValue::Number(f64::NAN)), &ColumnType::Numbers).is_some());
    }

    #[test]
    fn test_text_length_limit() {
        let at_limit = "a".repeat(MAX_TEXT_LENGTH);
        let over_limit = "é".repeat(MAX_TEXT_LENGTH + 1);
        assert_eq!(validate(Some(&text(&at_limit)), &ColumnType::Text), None);
        assert_eq!(
            validate(Some(&text(&over_limit)), &ColumnType::Text).as_deref(),
            Some(TEXT_TOO_LONG)
        );
    }

    #[test]
    fn test_dates() {
        for valid in [
            "2024-02-29",
            "2024-01-15T10:30:00",
            "2024-01-15 10:30:00",
            "2024-01-15T10:30:00Z",
            "2024-01-15T10:30:00+02:00",
        ] {
            assert_eq!(validate(Some(&text(valid)), &ColumnType::Date), None, "{}", valid);
        }
        for invalid in ["tomorrow", "2023-02-29", "2024-13-01", "15/01/2024"] {
            assert_eq!(
                validate(Some(&text(invalid)), &ColumnType::Date).as_deref(),
                Some(INVALID_DATE),
                "{}",
                invalid
            );
        }
    }

    #[test]
    fn test_date_times_without_seconds() {
        assert!(is_valid_date("2024-01-05T10:30"));
        assert!(is_valid_date("2024-01-05 10:30"));
        assert_eq!(validate(Some(&text("2024-01-05T10:30")), &ColumnType::Date), None);
        assert!(!is_valid_date("2024-01-05T25:30"));
        assert!(!is_valid_date("2024-01-05T10"));
    }

    #[test]
    fn test_status_and_unsupported_types_accept_anything() {
        let value: String = Faker.fake();
        assert_eq!(validate(Some(&text(&value)), &ColumnType::Status), None);
        assert_eq!(
            validate(Some(&text(&value)), &ColumnType::from("people")),
            None
        );
    }

    #[test]
    fn test_item_name() {
        assert_eq!(validate_item_name("").as_deref(), Some(ITEM_NAME_REQUIRED));
        assert_eq!(validate_item_name(" \t ").as_deref(), Some(ITEM_NAME_REQUIRED));
        assert_eq!(validate_item_name("Widget"), None);
    }

    #[test]
    fn test_validate_form_collects_every_error() {
        let columns = sample_schema().supported_columns();
        let form_data: FormData = [
            ("numbers0", "twelve"),
            ("date4", "someday"),
            ("text0", "fine"),
        ]
        .into_iter()
        .collect();

        let errors = validate_form(&form_data, &columns);

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(ITEM_NAME_KEY), Some(ITEM_NAME_REQUIRED));
        assert_eq!(errors.get("numbers0"), Some(INVALID_NUMBER));
        assert_eq!(errors.get("date4"), Some(INVALID_DATE));
        assert_eq!(errors.get("text0"), None);
    }

    #[test]
    fn test_validate_form_accepts_valid_form() {
        let columns = sample_schema().supported_columns();
        let form_data: FormData = [
            (ITEM_NAME_KEY, "Launch"),
            ("numbers0", "12.5"),
            ("status", "Done"),
            ("date4", "2024-06-01"),
        ]
        .into_iter()
        .collect();

        assert!(validate_form(&form_data, &columns).is_empty());
    }
}
