//! HTTP client for monday.com API requests.
//!
//! This module provides a low-level wrapper for posting GraphQL documents to
//! the monday.com API, handling authentication and unwrapping the response
//! envelope.

use super::MondayError;
use log::*;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Value};

/// Response envelope shared by every GraphQL operation.
///
#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<ErrorEntry>>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    message: String,
}

/// Posts GraphQL documents to monday.com and returns the `data` payload.
///
pub struct Client {
    pub(crate) access_token: String,
    pub(crate) api_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given access token and API URL.
    ///
    pub fn new(access_token: &str, api_url: &str) -> Result<Self, MondayError> {
        Ok(Client {
            access_token: access_token.to_owned(),
            api_url: api_url.to_owned(),
            http_client: reqwest::Client::builder()
                .user_agent(concat!("monday-tui/", env!("CARGO_PKG_VERSION")))
                .build()?,
        })
    }

    /// Execute a GraphQL document with variables. Returns the `data` field
    /// of the response, which may be absent, or the first error reported by
    /// transport, status code or GraphQL layer.
    ///
    pub async fn execute(&self, query: &str, variables: Value) -> Result<Option<Value>, MondayError> {
        let response = self
            .http_client
            .post(&self.api_url)
            .header(AUTHORIZATION, format!("Bearer {}", &self.access_token))
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("Unable to read response"));
            error!("API request failed with status {}: {}", status, message);
            return Err(MondayError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let envelope: Envelope = serde_json::from_slice(&bytes).map_err(|e| {
            error!(
                "Failed to deserialize API response: {}. Response body: {}",
                e,
                String::from_utf8_lossy(&bytes)
            );
            e
        })?;

        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            let message = errors
                .into_iter()
                .map(|entry| entry.message)
                .collect::<Vec<_>>()
                .join("; ");
            error!("API returned errors: {}", message);
            return Err(MondayError::GraphQl(message));
        }
        if let Some(message) = envelope.error_message {
            error!("API returned error message: {}", message);
            return Err(MondayError::GraphQl(message));
        }

        Ok(envelope.data)
    }
}
