//! GraphQL documents sent to the monday.com API.

/// Fetch a board's name and column definitions.
///
pub const GET_BOARD_COLUMNS: &str = r#"
query ($boardId: [ID!]) {
  boards (ids: $boardId) {
    id
    name
    columns {
      id
      title
      type
      settings_str
    }
  }
}
"#;

/// Create an item with a JSON-encoded map of column values.
///
pub const CREATE_ITEM: &str = r#"
mutation ($boardId: ID!, $itemName: String!, $columnValues: JSON) {
  create_item (
    board_id: $boardId
    item_name: $itemName
    column_values: $columnValues
  ) {
    id
    name
  }
}
"#;
