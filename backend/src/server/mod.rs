//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerSettings};

use std::io;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::BookingService;
use crate::domain::ports::ErrorLog;
use crate::inbound::http::bookings::{cancel_booking, create_booking, list_user_bookings};
use crate::inbound::http::fallback::{json_config, not_found, query_config};
use crate::inbound::http::health::{HealthState, health};
use crate::inbound::http::meta::{api_info, root};
use crate::inbound::http::rooms::{list_rooms, search_rooms};
use crate::inbound::http::state::HttpState;
use crate::middleware::RequestTrace;
use crate::outbound::{FileOutbox, JsonFileStore, NdjsonErrorLog};

const OUTBOX_DIR: &str = "outbox";

/// Shared state handed to every worker's [`App`].
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness flag flipped once the server is bound.
    pub health_state: web::Data<HealthState>,
    /// Ports consumed by the HTTP handlers.
    pub http_state: web::Data<HttpState>,
    /// Sink for error envelopes.
    pub error_log: Arc<dyn ErrorLog>,
}

/// Assemble the application: routes, extractor configuration, request
/// tracing and, in debug builds, Swagger UI under `/docs`.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        error_log,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(RequestTrace::new(error_log))
        .service(root)
        .service(api_info)
        .service(health)
        .service(list_rooms)
        .service(search_rooms)
        .service(create_booking)
        .service(list_user_bookings)
        .service(cancel_booking);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app.default_service(web::to(not_found))
}

/// Open the data directory and load the booking service behind the HTTP
/// state.
///
/// # Errors
/// Returns [`io::Error`] when the data directory, outbox or error log cannot
/// be opened, or when the stored catalogue cannot be loaded.
pub async fn build_dependencies(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
) -> io::Result<AppDependencies> {
    let store = Arc::new(JsonFileStore::open(config.data_dir())?);
    let outbox = Arc::new(FileOutbox::open(config.data_dir().join(OUTBOX_DIR))?);
    let error_log: Arc<dyn ErrorLog> = Arc::new(NdjsonErrorLog::open(config.data_dir())?);

    let service = BookingService::bootstrap(
        store.as_ref(),
        Arc::clone(&store),
        outbox,
        Arc::new(DefaultClock),
        config.rules,
    )
    .await
    .map_err(|err| io::Error::other(err.to_string()))?;

    Ok(AppDependencies {
        health_state,
        http_state: web::Data::new(HttpState::from_service(Arc::new(service))),
        error_log,
    })
}

/// Construct an Actix HTTP server over the configured data directory.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: bind address, data directory and business rules.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`io::Error`] when loading state, binding the socket or
/// starting the server fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> io::Result<Server> {
    let deps = build_dependencies(health_state.clone(), &config).await?;
    let (host, port) = config.bind_addr();

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind((host, port))?
        .run();

    info!(
        host,
        port,
        data_dir = %config.data_dir().display(),
        "study rooms API listening"
    );
    health_state.mark_ready();
    Ok(server)
}
