//! Request context middleware.
//!
//! Each incoming request receives a [`RequestId`] and a [`RequestContext`]
//! (id, method, path) held in task-local storage, so error envelopes can be
//! built without access to the request. Every response carries an
//! `X-Request-ID` header. Responses produced from an error carry an
//! [`ErrorLogEntry`] extension which is appended to the [`ErrorLog`] before
//! the response leaves the middleware.

use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde_json::Value;
use tokio::task_local;
use tracing::{debug, error, warn};

use crate::domain::ports::ErrorLog;
use crate::domain::{REQUEST_ID_HEADER, RequestId};

task_local! {
    static REQUEST_CONTEXT: RequestContext;
}

/// Per-request metadata echoed in error envelopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Identifier echoed in `X-Request-ID`.
    pub request_id: RequestId,
    /// HTTP method.
    pub method: String,
    /// Request path without the query string.
    pub path: String,
}

impl RequestContext {
    /// Returns the context of the request being served, if any.
    pub fn current() -> Option<Self> {
        REQUEST_CONTEXT.try_with(Clone::clone).ok()
    }

    /// Run `fut` with this context and its request id in scope.
    pub async fn scope<Fut>(self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        let request_id = self.request_id;
        RequestId::scope(request_id, REQUEST_CONTEXT.scope(self, fut)).await
    }
}

/// Error envelope to be appended to the error log, attached to the response
/// as an extension by the HTTP error mapper.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorLogEntry(pub Value);

/// Middleware assigning request ids and recording error envelopes.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::App;
/// use study_rooms::domain::ports::FixtureErrorLog;
/// use study_rooms::middleware::RequestTrace;
///
/// let _app = App::new().wrap(RequestTrace::new(Arc::new(FixtureErrorLog)));
/// ```
#[derive(Clone)]
pub struct RequestTrace {
    error_log: Arc<dyn ErrorLog>,
}

impl RequestTrace {
    /// Wrap services with request ids and error logging to `error_log`.
    pub fn new(error_log: Arc<dyn ErrorLog>) -> Self {
        Self { error_log }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware {
            service,
            error_log: Arc::clone(&self.error_log),
        }))
    }
}

/// Service wrapper produced by [`RequestTrace`].
pub struct RequestTraceMiddleware<S> {
    service: S,
    error_log: Arc<dyn ErrorLog>,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let context = RequestContext {
            request_id: RequestId::generate(),
            method: req.method().to_string(),
            path: req.path().to_owned(),
        };
        let request_id = context.request_id;
        let error_log = Arc::clone(&self.error_log);
        let fut = self.service.call(req);
        Box::pin(context.scope(async move {
            let mut res = fut.await?;

            let entry = res.response().extensions().get::<ErrorLogEntry>().cloned();
            if let Some(ErrorLogEntry(entry)) = entry {
                match error_log.append(&entry).await {
                    Ok(()) => debug!(request_id = %request_id, "error envelope logged"),
                    Err(err) => warn!(
                        request_id = %request_id,
                        error = %err,
                        "failed to append error envelope"
                    ),
                }
            }

            match HeaderValue::from_str(&request_id.to_string()) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                }
                Err(err) => {
                    error!(
                        error = %err,
                        request_id = %request_id,
                        "failed to encode request identifier header"
                    );
                }
            }
            Ok(res)
        }))
    }
}
