//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::future::Future;
use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::CakeService;
use crate::domain::ports::CakeRepository;
use crate::inbound::http::auth::AccountDirectory;
use crate::inbound::http::configure_api;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::middleware::{SanitizeQuery, Trace, security_headers};
use crate::outbound::memory::InMemoryCakeRepository;
use crate::outbound::persistence::DieselCakeRepository;

/// Wire a repository into the cake service and expose it through both
/// HTTP-facing ports.
pub fn http_state_with<R>(repository: R, accounts: AccountDirectory) -> HttpState
where
    R: CakeRepository + 'static,
{
    let service = Arc::new(CakeService::new(Arc::new(repository)));
    HttpState::new(service.clone(), service, accounts)
}

fn build_http_state(config: &ServerConfig) -> HttpState {
    let accounts = config.accounts.clone();
    match &config.db_pool {
        Some(pool) => http_state_with(DieselCakeRepository::new(pool.clone()), accounts),
        None => {
            info!("no database configured; cakes are kept in memory");
            http_state_with(InMemoryCakeRepository::new(), accounts)
        }
    }
}

/// Assemble the application: the versioned cake API, health probes and, in
/// debug builds, Swagger UI.
///
/// `Trace` is the outermost middleware so rejections raised by the inner
/// layers still carry a trace identifier.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(SanitizeQuery)
        .wrap(security_headers())
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Switch both health probes to `503` once `shutdown` resolves.
///
/// # Examples
/// ```
/// use actix_web::web;
/// use cake_manager::inbound::http::health::HealthState;
/// use cake_manager::server::drain_on;
///
/// # actix_web::rt::System::new().block_on(async {
/// let health = web::Data::new(HealthState::new());
/// drain_on(health.clone(), std::future::ready(())).await;
/// assert!(health.is_draining());
/// # });
/// ```
pub async fn drain_on<F>(health_state: web::Data<HealthState>, shutdown: F)
where
    F: Future<Output = ()>,
{
    shutdown.await;
    info!("shutdown requested; draining health probes");
    health_state.begin_drain();
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Readiness is flipped once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    info!(bind_addr = %config.bind_addr, database = config.uses_database(), "server listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;

    #[actix_web::test]
    async fn shutdown_drains_probes_of_the_running_app() {
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        let state = web::Data::new(http_state_with(
            InMemoryCakeRepository::new(),
            AccountDirectory::default(),
        ));
        let app = test::init_service(build_app(health.clone(), state)).await;

        drain_on(health.clone(), std::future::ready(())).await;

        for uri in ["/health/ready", "/health/live"] {
            let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE, "{uri}");
        }
    }
}
