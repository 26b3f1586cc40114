use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::utils::api::{Api, RequestError};

pub const RATE_LIMIT_STATUS: u16 = 429;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DemoChatRequest {
    pub query: String,
    pub language: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DemoAnswer {
    pub answer: String,
    #[serde(default)]
    pub processing_time_ms: Option<f64>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DemoError {
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("API error: {0}")]
    Status(u16),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("Malformed demo response: {0}")]
    Decode(String),
}

impl DemoError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, DemoError::RateLimited)
    }
}

/// Maps a response status onto the demo error taxonomy. Any 429 is a rate
/// limit regardless of the body; every other non-2xx collapses into `Status`.
pub fn check_status(status: u16) -> Result<(), DemoError> {
    match status {
        RATE_LIMIT_STATUS => Err(DemoError::RateLimited),
        200..=299 => Ok(()),
        other => Err(DemoError::Status(other)),
    }
}

/// Source of demo answers. The page talks to the HTTP API; tests plug in fakes.
#[async_trait(?Send)]
pub trait DemoBackend {
    async fn ask(&self, query: &str) -> Result<DemoAnswer, DemoError>;
}

pub struct HttpDemoBackend {
    config: Config,
}

impl HttpDemoBackend {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl DemoBackend for HttpDemoBackend {
    async fn ask(&self, query: &str) -> Result<DemoAnswer, DemoError> {
        let body = DemoChatRequest {
            query: query.to_string(),
            language: self.config.language.clone(),
        };
        let response = Api::post(&self.config.demo_chat_url())
            .json(&body)?
            .send_with_timeout(self.config.api_timeout_ms)
            .await?;

        check_status(response.status())?;

        response
            .json::<DemoAnswer>()
            .await
            .map_err(|e| DemoError::Decode(e.to_string()))
    }
}
