//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::RuntimeMode;
use crate::doc::ApiDoc;
use crate::domain::HealthService;
use crate::domain::ports::{DatabaseProbe, UnconfiguredDatabaseProbe};
use crate::inbound::http::health::{health_check, health_info, root, system_info};
use crate::inbound::http::route_not_found;
use crate::inbound::http::state::HttpState;
use crate::middleware::{ErrorBoundary, RequestObserver};
use crate::outbound::persistence::DieselDatabaseProbe;

/// Build the handler state, probing the database through the configured
/// pool or reporting it unhealthy when none is attached.
pub fn build_http_state(config: &ServerConfig) -> HttpState {
    let database: Arc<dyn DatabaseProbe> = match &config.db_pool {
        Some(pool) => Arc::new(DieselDatabaseProbe::new(pool.clone())),
        None => Arc::new(UnconfiguredDatabaseProbe),
    };
    HttpState::new(HealthService::new(database, Arc::new(DefaultClock)))
}

/// Assemble the application: routes, documentation and middleware.
///
/// The error boundary wraps everything else, so it also sees failures raised
/// by the request observer and panics from any handler.
pub fn build_app(
    state: web::Data<HttpState>,
    mode: RuntimeMode,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .service(root)
        .service(health_check)
        .service(health_info)
        .service(system_info)
        .service(web::redirect("/docs", "/docs/"))
        .service(SwaggerUi::new("/docs/{_:.*}").url("/docs/json", ApiDoc::openapi()))
        .default_service(web::to(route_not_found))
        .wrap(RequestObserver::new(mode))
        .wrap(ErrorBoundary::new(mode))
}

/// Construct an Actix HTTP server from `config`.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let state = web::Data::new(build_http_state(&config));
    let mode = config.mode;
    let server = HttpServer::new(move || build_app(state.clone(), mode))
        .bind(config.bind_addr)?
        .run();

    info!(
        bind_addr = %config.bind_addr,
        mode = %mode,
        database = config.has_database(),
        "server listening"
    );
    Ok(server)
}
