//! In-memory gateway used by unit tests.

use super::{
    BoardColumn, BoardGateway, BoardSchema, ColumnType, ColumnValue, CreatedItem, MondayError,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Records calls and answers with a fixed board.
///
pub struct FakeGateway {
    schema: BoardSchema,
    delay: Duration,
    fetch_calls: AtomicUsize,
    fetch_failures: AtomicUsize,
    create_calls: AtomicUsize,
    create_failure: Option<String>,
    created: Mutex<Vec<(String, String, Vec<ColumnValue>)>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        FakeGateway {
            schema: sample_schema(),
            delay: Duration::ZERO,
            fetch_calls: AtomicUsize::new(0),
            fetch_failures: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            create_failure: None,
            created: Mutex::new(vec![]),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing_fetches(self, count: usize) -> Self {
        self.fetch_failures.store(count, Ordering::SeqCst);
        self
    }

    pub fn failing_creates(mut self, message: &str) -> Self {
        self.create_failure = Some(message.to_owned());
        self
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> Vec<(String, String, Vec<ColumnValue>)> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl BoardGateway for FakeGateway {
    async fn fetch_columns(&self, _board_id: &str) -> Result<BoardSchema, MondayError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let remaining = self.fetch_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fetch_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(MondayError::Other("fetch failed".to_string()));
        }
        Ok(self.schema.clone())
    }

    async fn create_item(
        &self,
        board_id: &str,
        item_name: &str,
        column_values: &[ColumnValue],
    ) -> Result<CreatedItem, MondayError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.create_failure {
            return Err(MondayError::Other(message.clone()));
        }
        self.created.lock().unwrap().push((
            board_id.to_owned(),
            item_name.to_owned(),
            column_values.to_vec(),
        ));
        Ok(CreatedItem {
            id: "9001".to_string(),
            name: item_name.to_owned(),
        })
    }
}

/// Board with one column of every supported type plus one unsupported.
///
pub fn sample_schema() -> BoardSchema {
    let column = |id: &str, title: &str, column_type: &str, settings: Option<&str>| BoardColumn {
        id: id.to_string(),
        title: title.to_string(),
        column_type: ColumnType::from(column_type),
        settings_raw: settings.map(str::to_owned),
    };
    BoardSchema {
        board_name: "Roadmap".to_string(),
        columns: vec![
            column("name", "Name", "name", None),
            column("text0", "Notes", "text", None),
            column("numbers0", "Budget", "numbers", None),
            column(
                "status",
                "Status",
                "status",
                Some(r#"{"labels": {"0": "Working on it", "1": "Done", "2": "Stuck"}}"#),
            ),
            column("date4", "Due", "date", None),
            column("person", "Owner", "people", None),
        ],
    }
}
