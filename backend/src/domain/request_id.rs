//! Request-scoped correlation identifier.
//!
//! `RequestId` follows a request from the middleware through services and
//! into error envelopes. It lives in task-local storage so handlers and
//! services can read it without threading it through every call.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`RequestId::scope`] when moving work onto another task.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    /// Task-local storage for the current request identifier.
    pub(crate) static REQUEST_ID: RequestId;
}

/// Header carrying the request identifier on every response.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request identifier rendered as 32 lowercase hex digits.
///
/// # Examples
/// ```
/// use study_rooms::domain::RequestId;
///
/// async fn handler() {
///     if let Some(id) = RequestId::current() {
///         println!("request id: {id}");
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generate a new random request identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn generate() -> Self { Self(Uuid::new_v4()) }

    /// Construct a request identifier from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the current request identifier if one is in scope.
    #[must_use]
    #[rustfmt::skip]
    pub fn current() -> Option<Self> { REQUEST_ID.try_with(|id| *id).ok() }

    /// Execute the provided future with the supplied identifier in scope.
    ///
    /// # Examples
    /// ```
    /// use study_rooms::domain::RequestId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let id: RequestId = "00000000000000000000000000000000"
    ///     .parse()
    ///     .expect("valid id");
    /// let observed = RequestId::scope(id, async move { RequestId::current() }).await;
    /// assert_eq!(observed, Some(id));
    /// # });
    /// ```
    pub async fn scope<Fut>(request_id: RequestId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_ID.scope(request_id, fut).await
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl std::str::FromStr for RequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
