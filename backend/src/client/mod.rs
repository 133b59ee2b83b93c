//! HTTP client for the booking API, used by the `study-rooms-cli` binary.
//!
//! The client owns transport details only: base URL resolution, request
//! timeout and JSON encoding. Turning responses into terminal output lives in
//! [`render`].

pub mod render;

use std::time::Duration;

use mockable::Env;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::REQUEST_ID_HEADER;

/// Environment variable naming the API base URL.
pub const API_ENV: &str = "STUDY_API";

/// Base URL used when neither `--api` nor `STUDY_API` is set.
pub const DEFAULT_API: &str = "http://127.0.0.1:8000";

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolve the API base URL: `--api` flag, then `STUDY_API`, then the
/// loopback default. Trailing slashes are dropped.
///
/// # Examples
/// ```
/// use mockable::DefaultEnv;
/// use study_rooms::client::resolve_api;
///
/// let base = resolve_api(Some("http://rooms.example:9000/".to_owned()), &DefaultEnv::new());
/// assert_eq!(base, "http://rooms.example:9000");
/// ```
pub fn resolve_api<E: Env>(flag: Option<String>, env: &E) -> String {
    let base = flag
        .filter(|value| !value.trim().is_empty())
        .or_else(|| env.string(API_ENV).filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_API.to_owned());
    base.trim().trim_end_matches('/').to_owned()
}

/// Failure to obtain any HTTP response.
#[derive(Debug, Error)]
#[error("Cannot reach API at {base} ({kind}): {source}")]
pub struct UnreachableError {
    /// Base URL that was tried.
    pub base: String,
    /// Failure class, e.g. `Timeout` or `ConnectError`.
    pub kind: &'static str,
    /// Underlying transport error.
    #[source]
    pub source: reqwest::Error,
}

fn classify(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "Timeout"
    } else if error.is_connect() {
        "ConnectError"
    } else if error.is_builder() {
        "InvalidURL"
    } else {
        "RequestError"
    }
}

/// Status, request id and decoded body of an API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase.
    pub reason: String,
    /// Value of `X-Request-ID`, if sent.
    pub request_id: Option<String>,
    /// Decoded payload.
    pub body: ResponseBody,
}

/// Response payload, decoded as JSON when possible.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// No body.
    Empty,
    /// Valid JSON.
    Json(Value),
    /// Anything else, verbatim.
    Text(String),
}

impl ResponseBody {
    fn decode(text: String) -> Self {
        if text.trim().is_empty() {
            return Self::Empty;
        }
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }
}

/// Booking creation payload sent by `book`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBooking {
    /// Booking owner.
    pub user_id: i64,
    /// Room to book.
    pub room_id: i64,
    /// Start date-time as typed.
    pub start: String,
    /// End date-time as typed.
    pub end: String,
    /// Number of people.
    pub group_size: i64,
}

/// Reqwest-backed API client.
pub struct ApiClient {
    client: Client,
    base: String,
}

impl ApiClient {
    /// Build a client with the standard request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base, REQUEST_TIMEOUT)
    }

    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: base.into(),
        })
    }

    /// Base URL requests are sent to.
    pub fn base(&self) -> &str {
        &self.base
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{path}", self.base))
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse, UnreachableError> {
        let unreachable = |source: reqwest::Error| UnreachableError {
            base: self.base.clone(),
            kind: classify(&source),
            source,
        };
        let response = request.send().await.map_err(unreachable)?;
        let status = response.status();
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let text = response.text().await.map_err(unreachable)?;
        Ok(ApiResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_owned(),
            request_id,
            body: ResponseBody::decode(text),
        })
    }

    /// `GET /rooms`.
    pub async fn rooms(&self) -> Result<ApiResponse, UnreachableError> {
        self.send(self.request(Method::GET, "/rooms")).await
    }

    /// `GET /search`.
    pub async fn search(
        &self,
        date: &str,
        start: &str,
        end: &str,
    ) -> Result<ApiResponse, UnreachableError> {
        let request = self
            .request(Method::GET, "/search")
            .query(&[("date", date), ("start", start), ("end", end)]);
        self.send(request).await
    }

    /// `POST /bookings`.
    pub async fn book(&self, booking: &NewBooking) -> Result<ApiResponse, UnreachableError> {
        self.send(self.request(Method::POST, "/bookings").json(booking))
            .await
    }

    /// `GET /users/{user_id}/bookings`.
    pub async fn mine(&self, user_id: i64) -> Result<ApiResponse, UnreachableError> {
        self.send(self.request(Method::GET, &format!("/users/{user_id}/bookings")))
            .await
    }

    /// `DELETE /bookings/{booking_id}`.
    pub async fn cancel(&self, booking_id: i64) -> Result<ApiResponse, UnreachableError> {
        self.send(self.request(Method::DELETE, &format!("/bookings/{booking_id}")))
            .await
    }
}
