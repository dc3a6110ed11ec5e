//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use users_backend::Trace;
#[cfg(debug_assertions)]
use users_backend::doc::ApiDoc;
use users_backend::inbound::http::health::HealthState;
use users_backend::inbound::http::state::HttpState;
use users_backend::inbound::http::{configure, json_config, route_not_found};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .configure(configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(route_not_found))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] containing the bind address and clock.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    // Built once so every worker shares one store.
    let http_state = build_http_state(&config);

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Full-stack wiring checks against the assembled application.

    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use mockable::Clock;
    use serde_json::{Value, json};

    use super::*;

    struct FixtureClock;

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
                .single()
                .expect("valid timestamp")
        }
    }

    fn config() -> ServerConfig {
        ServerConfig::new(([127, 0, 0, 1], 0).into()).with_clock(Arc::new(FixtureClock))
    }

    #[actix_web::test]
    async fn wired_app_creates_users_with_clock_timestamps() {
        let config = config();
        let app = actix_test::init_service(build_app(
            web::Data::new(HealthState::new()),
            build_http_state(&config),
        ))
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/users")
            .set_json(json!({"name": "Ana", "email": "ana@example.com", "age": 30}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(response.headers().contains_key("trace-id"));

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["data"]["id"], "1");
        assert_eq!(body["data"]["createdAt"], "2024-03-01T12:00:00Z");
    }

    #[actix_web::test]
    async fn failure_trace_id_matches_response_header() {
        let config = config();
        let app = actix_test::init_service(build_app(
            web::Data::new(HealthState::new()),
            build_http_state(&config),
        ))
        .await;

        let request = actix_test::TestRequest::delete().uri("/users/42").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let header = response
            .headers()
            .get("trace-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .expect("trace id header");

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["traceId"], header.as_str());
        assert_eq!(body["message"], "Error al eliminar usuario");
    }

    #[test]
    fn config_reports_bind_address() {
        assert_eq!(config().bind_addr().port(), 0);
    }
}
