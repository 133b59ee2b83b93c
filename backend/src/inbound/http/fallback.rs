//! Extractor error handlers and the catch-all route.
//!
//! Malformed JSON bodies and query strings become `VALIDATION_ERROR`
//! envelopes; unmatched routes become `HTTP_ERROR` with status 404.

use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::Value;

use crate::domain::{Error, ValidationIssue};
use crate::inbound::http::ApiResult;

fn section_issue(section: &str, msg: String, kind: &str) -> ValidationIssue {
    ValidationIssue {
        loc: vec![Value::from(section)],
        msg,
        kind: kind.to_owned(),
    }
}

/// JSON body configuration mapping parse failures to validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::validation(vec![section_issue("body", err.to_string(), "json_invalid")]).into()
    })
}

/// Query string configuration mapping parse failures to validation errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        Error::validation(vec![section_issue("query", err.to_string(), "query_invalid")]).into()
    })
}

/// Default service for routes nothing else matched.
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    tracing::debug!(path = %req.path(), method = %req.method(), "no route matched");
    Err(Error::http("Not Found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Page {
        #[expect(dead_code, reason = "Only deserialisation is exercised")]
        page: u32,
    }

    async fn echo(_body: web::Json<Value>) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn paged(_query: web::Query<Page>) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn unmatched_route_is_http_error() {
        let app = test::init_service(App::new().default_service(web::to(not_found))).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"]["code"], "HTTP_ERROR");
        assert_eq!(body["error"]["message"], "Not Found");
    }

    #[actix_web::test]
    async fn malformed_json_is_validation_error() {
        let app = test::init_service(
            App::new()
                .app_data(json_config())
                .route("/echo", web::post().to(echo)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/echo")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["validation_errors"][0]["type"], "json_invalid");
    }

    #[actix_web::test]
    async fn malformed_query_is_validation_error() {
        let app = test::init_service(
            App::new()
                .app_data(query_config())
                .route("/paged", web::get().to(paged)),
        )
        .await;
        let req = test::TestRequest::get().uri("/paged?page=first").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"]["validation_errors"][0]["loc"][0], "query");
    }
}
