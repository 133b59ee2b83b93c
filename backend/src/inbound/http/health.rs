//! Health endpoint: readiness probe for supervisors and load balancers.
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shared readiness flag, flipped once the listener is bound.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

/// Body of the health probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` once serving, `starting` before.
    #[schema(example = "ok")]
    pub status: String,
}

/// Readiness probe. Return 200 once the ledger is loaded and the server is
/// bound; return 503 otherwise.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic", body = HealthResponse),
        (status = 503, description = "Server is still starting", body = HealthResponse)
    )
)]
#[get("/health")]
pub async fn health(state: web::Data<HealthState>) -> HttpResponse {
    let (mut response, status) = if state.is_ready() {
        (HttpResponse::Ok(), "ok")
    } else {
        (HttpResponse::ServiceUnavailable(), "starting")
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(HealthResponse {
            status: status.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    #[rstest]
    #[case(false, StatusCode::SERVICE_UNAVAILABLE, "starting")]
    #[case(true, StatusCode::OK, "ok")]
    #[actix_web::test]
    async fn health_reflects_readiness(
        #[case] ready: bool,
        #[case] expected: StatusCode,
        #[case] status: &str,
    ) {
        let state = web::Data::new(HealthState::new());
        if ready {
            state.mark_ready();
        }
        let app = test::init_service(App::new().app_data(state).service(health)).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(res.status(), expected);
        assert_eq!(
            res.headers()
                .get(header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok()),
            Some("no-store")
        );
        let body: HealthResponse = test::read_body_json(res).await;
        assert_eq!(body.status, status);
    }
}
