//! HTTP client for the chat backend.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::session::Backend;

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

pub struct ChatClient {
    client: Client,
    base_url: String,
}

impl ChatClient {
    /// `timeout` bounds each request when set; without it an unresponsive
    /// backend keeps the session pending until the connection dies.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST the message to `/chat` and return the reply text.
    ///
    /// The HTTP status code is not part of the contract: an error page or
    /// any other unparseable body fails JSON decoding and surfaces as the
    /// same error a dead connection would.
    pub async fn send_message(&self, message: &str) -> Result<String> {
        let url = format!("{}/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { message })
            .send()
            .await?;

        let body: ChatResponse = response.json().await?;
        Ok(body.response)
    }
}

#[async_trait]
impl Backend for ChatClient {
    async fn send(&self, message: &str) -> Result<String> {
        self.send_message(message).await
    }
}
