//! monday.com API module.
//!
//! This module provides the board gateway used by the item form: fetching a
//! board's name and column definitions, and creating items with encoded
//! column values. The schema cache and retry policy sit in front of it.

mod cache;
mod client;
mod error;
mod queries;
mod resource;
mod retry;
#[cfg(test)]
pub(crate) mod testing;

pub use cache::{CachePolicy, SchemaCache};
pub use error::MondayError;
pub use resource::*;
pub use retry::RetryPolicy;

use async_trait::async_trait;
use client::Client;
use log::*;
use serde::Deserialize;
use serde_json::{json, Value};

/// Default GraphQL endpoint of the monday.com API.
///
pub const DEFAULT_API_URL: &str = "https://api.monday.com/v2";

/// Remote operations the item form needs from a board service.
///
#[async_trait]
pub trait BoardGateway: Send + Sync {
    /// Returns the board's name and column definitions. A response that does
    /// not describe a board yields [`BoardSchema::unknown`].
    ///
    async fn fetch_columns(&self, board_id: &str) -> Result<BoardSchema, MondayError>;

    /// Creates an item with the given name and column values on the board.
    ///
    async fn create_item(
        &self,
        board_id: &str,
        item_name: &str,
        column_values: &[ColumnValue],
    ) -> Result<CreatedItem, MondayError>;
}

/// Responsible for asynchronous interaction with the monday.com API including
/// transformation of response data into explicitly-defined types.
///
pub struct Monday {
    client: Client,
}

impl Monday {
    /// Returns a new instance for the given access token and API URL.
    ///
    pub fn new(access_token: &str, api_url: &str) -> Result<Monday, MondayError> {
        debug!("Initializing monday.com client for {}...", api_url);
        Ok(Monday {
            client: Client::new(access_token, api_url)?,
        })
    }
}

#[derive(Deserialize)]
struct BoardsData {
    #[serde(default)]
    boards: Vec<Option<BoardModel>>,
}

#[derive(Deserialize)]
struct BoardModel {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    columns: Vec<Value>,
}

#[async_trait]
impl BoardGateway for Monday {
    async fn fetch_columns(&self, board_id: &str) -> Result<BoardSchema, MondayError> {
        debug!("Requesting columns for board {}...", board_id);

        let data = self
            .client
            .execute(queries::GET_BOARD_COLUMNS, json!({ "boardId": [board_id] }))
            .await?;

        let board = match data.map(serde_json::from_value::<BoardsData>) {
            Some(Ok(data)) => data.boards.into_iter().next().flatten(),
            Some(Err(e)) => {
                warn!("Unexpected shape of board {} response: {}", board_id, e);
                None
            }
            None => None,
        };
        let Some(board) = board else {
            warn!("No board returned for id {}, using placeholder.", board_id);
            return Ok(BoardSchema::unknown());
        };

        let columns: Vec<BoardColumn> = board
            .columns
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<BoardColumn>(value) {
                Ok(column) => Some(column),
                Err(e) => {
                    warn!("Skipping unreadable column on board {}: {}", board_id, e);
                    None
                }
            })
            .collect();

        debug!("Retrieved {} columns for board {}", columns.len(), board_id);

        Ok(BoardSchema {
            board_name: board
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| BoardSchema::UNKNOWN_BOARD.to_owned()),
            columns,
        })
    }

    async fn create_item(
        &self,
        board_id: &str,
        item_name: &str,
        column_values: &[ColumnValue],
    ) -> Result<CreatedItem, MondayError> {
        debug!(
            "Creating item '{}' with {} column value(s) on board {}...",
            item_name,
            column_values.len(),
            board_id
        );

        let variables = json!({
            "boardId": board_id,
            "itemName": item_name,
            "columnValues": encode_column_values(column_values)?,
        });
        let data = self.client.execute(queries::CREATE_ITEM, variables).await?;

        let created = data
            .and_then(|mut data| data.get_mut("create_item").map(Value::take))
            .filter(|created| !created.is_null())
            .ok_or_else(|| MondayError::MalformedResponse("create_item missing".to_string()))?;
        Ok(serde_json::from_value(created)?)
    }
}
