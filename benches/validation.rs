//! Benchmarks for form validation and column value building.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use monday_tui::monday::{parse_status_options, BoardColumn, ColumnType, FieldValue};
use monday_tui::state::{build_column_values, validate, validate_form, FormData, ITEM_NAME_KEY};

fn columns() -> Vec<BoardColumn> {
    let column = |id: &str, title: &str, column_type: &str| BoardColumn {
        id: id.to_string(),
        title: title.to_string(),
        column_type: ColumnType::from(column_type),
        settings_raw: None,
    };
    vec![
        column("name", "Name", "name"),
        column("text0", "Notes", "text"),
        column("numbers0", "Budget", "numbers"),
        column("status", "Status", "status"),
        column("date4", "Due", "date"),
    ]
}

fn form_data() -> FormData {
    [
        (ITEM_NAME_KEY, "Launch"),
        ("text0", "Ship the new onboarding flow"),
        ("numbers0", "1.5e3"),
        ("status", "Working on it"),
        ("date4", "2024-03-15"),
    ]
    .into_iter()
    .collect()
}

fn bench_validate(c: &mut Criterion) {
    let number = FieldValue::from("-12.75");
    let date = FieldValue::from("2024-03-15T09:30:00");
    c.bench_function("validate_number", |b| {
        b.iter(|| validate(black_box(Some(&number)), &ColumnType::Numbers))
    });
    c.bench_function("validate_date", |b| {
        b.iter(|| validate(black_box(Some(&date)), &ColumnType::Date))
    });

    let columns = columns();
    let data = form_data();
    c.bench_function("validate_form", |b| {
        b.iter(|| validate_form(black_box(&data), &columns))
    });
}

fn bench_status_options(c: &mut Criterion) {
    let settings = r#"{"labels": {"0": "Working on it", "1": "Done", "2": "Stuck", "5": ""}}"#;
    c.bench_function("parse_status_options", |b| {
        b.iter(|| parse_status_options(black_box(settings)))
    });
}

fn bench_column_values(c: &mut Criterion) {
    let columns = columns();
    let data = form_data();
    c.bench_function("build_column_values", |b| {
        b.iter(|| build_column_values(black_box(&data), &columns))
    });
}

criterion_group!(benches, bench_validate, bench_status_options, bench_column_values);
criterion_main!(benches);
