//! HTTP inbound adapter exposing REST endpoints.
//!
//! [`configure`] registers every route so the server and the tests build the
//! same application. Requests that match no route, and JSON bodies that fail
//! to parse, are answered with the failure envelope rather than Actix's
//! plain-text defaults.

pub mod envelope;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

use crate::domain::Error;

pub use error::ApiResult;
use error::ApiFailure;

/// Domain message for bodies that are not valid JSON for the endpoint.
pub const INVALID_BODY_MESSAGE: &str = "Datos de entrada inválidos";
/// Context reported alongside [`INVALID_BODY_MESSAGE`].
pub const INVALID_BODY_CONTEXT: &str = "Error al procesar la solicitud";

/// Register user and health routes.
///
/// `/users/stats` is registered ahead of `/users/{id}` so the literal segment
/// wins.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_backend::inbound::http::{configure, json_config};
///
/// let app = App::new().app_data(json_config()).configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::create_user)
        .service(users::list_active_users)
        .service(users::user_stats)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(health::health)
        .service(health::ready)
        .service(health::live);
}

/// JSON extractor configuration rendering parse failures as failure envelopes.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        let error = Error::invalid_request(INVALID_BODY_MESSAGE)
            .with_details(json!({ "reason": err.to_string() }));
        ApiFailure::new(error, INVALID_BODY_CONTEXT).into()
    })
}

/// Fallback handler for requests that match no route.
pub async fn route_not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(ApiFailure::absent(
        Error::not_found("Ruta no encontrada"),
        format!("No se encontró la ruta {}", req.uri()),
    ))
}
