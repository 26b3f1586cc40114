use futures::future::{self, Either};
use futures::pin_mut;
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use std::future::Future;
use thiserror::Error;
use web_sys::AbortController;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Request timed out after {0}ms")]
    Timeout(u32),
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Failed to encode request body: {0}")]
    Encode(String),
    #[error("Browser API unavailable: {0}")]
    Browser(String),
}

impl From<gloo_net::Error> for RequestError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => RequestError::Encode(e.to_string()),
            other => RequestError::Transport(other.to_string()),
        }
    }
}

/// Races `request` against `deadline`.
///
/// Whichever future loses is dropped before this returns, so a deadline
/// backed by a browser timer is cleared on every completion path.
pub async fn with_timeout<F, D, T>(
    request: F,
    deadline: D,
    timeout_ms: u32,
) -> Result<T, RequestError>
where
    F: Future<Output = Result<T, RequestError>>,
    D: Future<Output = ()>,
{
    pin_mut!(request);
    pin_mut!(deadline);
    match future::select(request, deadline).await {
        Either::Left((result, _deadline)) => result,
        Either::Right(((), _request)) => Err(RequestError::Timeout(timeout_ms)),
    }
}

/// Thin wrapper over `gloo_net` requests against the public demo endpoints.
pub struct Api;

pub struct ApiRequest {
    request: Request,
    url: String,
}

impl ApiRequest {
    fn new(url: &str, method: &str) -> Self {
        let request = match method {
            "POST" => Request::post(url),
            "PUT" => Request::put(url),
            _ => Request::get(url),
        };
        Self {
            request,
            url: url.to_string(),
        }
    }

    /// Set the request body as JSON
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self, RequestError> {
        self.request = self.request.json(data)?;
        Ok(self)
    }

    pub async fn send(self) -> Result<Response, RequestError> {
        self.request.send().await.map_err(RequestError::from)
    }

    /// Sends the request, aborting the underlying fetch if no response
    /// headers arrive within `timeout_ms`.
    pub async fn send_with_timeout(self, timeout_ms: u32) -> Result<Response, RequestError> {
        let controller = AbortController::new()
            .map_err(|e| RequestError::Browser(format!("{:?}", e)))?;
        let signal = controller.signal();
        let request = self.request.abort_signal(Some(&signal));

        let send = async move { request.send().await.map_err(RequestError::from) };
        let result = with_timeout(send, TimeoutFuture::new(timeout_ms), timeout_ms).await;

        if let Err(RequestError::Timeout(_)) = result {
            tracing::warn!("Aborting request to {} after {}ms", self.url, timeout_ms);
            controller.abort();
        }
        result
    }
}

impl Api {
    pub fn post(url: &str) -> ApiRequest {
        ApiRequest::new(url, "POST")
    }
}
