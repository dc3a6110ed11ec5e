//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep [`Error`] HTTP-agnostic while handlers turn domain failures
//! into the failure envelope:
//!
//! ```json
//! {"success":false,"code":"conflict","error":"El email ya está en uso",
//!  "message":"Error al crear usuario","traceId":"…"}
//! ```
//!
//! `error` carries the domain message and `message` names the operation that
//! failed.
//!
//! Failures raised by the domain answer `400` whatever their code; only
//! storage faults escalate to `503` or `500`. Handlers that find nothing to
//! return mark their failure as absent with [`ApiFailure::absent`], which
//! answers `404`.

use std::borrow::Cow;
use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Client-facing text replacing internal error messages.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiFailure>;

/// Domain error paired with the operation context reported to clients.
#[derive(Debug, Clone)]
pub struct ApiFailure {
    error: Error,
    context: Cow<'static, str>,
    status: StatusCode,
}

impl ApiFailure {
    /// Wrap `error` with a context message.
    pub fn new(error: Error, context: impl Into<Cow<'static, str>>) -> Self {
        let status = status_for(error.code());
        Self {
            error,
            context: context.into(),
            status,
        }
    }

    /// Wrap `error` for a resource the handler could not find; answers `404`.
    pub fn absent(error: Error, context: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            ..Self::new(error, context)
        }
    }

    /// Underlying domain error.
    #[must_use]
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Operation context shown as the envelope `message`.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.error)
    }
}

/// Attach an operation context to domain results.
///
/// # Examples
/// ```
/// use users_backend::domain::Error;
/// use users_backend::inbound::http::error::{ApiResult, ErrorContext};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("Usuario no encontrado")).context("Error al eliminar usuario")
/// }
///
/// let failure = handler().expect_err("missing user");
/// assert_eq!(failure.context(), "Error al eliminar usuario");
/// ```
pub trait ErrorContext<T> {
    /// Convert the error side into an [`ApiFailure`] carrying `context`.
    fn context(self, context: &'static str) -> ApiResult<T>;
}

impl<T> ErrorContext<T> for Result<T, Error> {
    fn context(self, context: &'static str) -> ApiResult<T> {
        self.map_err(|error| ApiFailure::new(error, context))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FailureEnvelope<'a> {
    success: bool,
    code: ErrorCode,
    error: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::NotFound | ErrorCode::Conflict => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for ApiFailure {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = self.error.trace_id();
        let internal = matches!(self.error.code(), ErrorCode::InternalError);
        match self.error.code() {
            ErrorCode::InternalError => error!(
                trace_id = trace_id.unwrap_or_default(),
                context = %self.context,
                error = %self.error,
                "request failed with internal error"
            ),
            ErrorCode::ServiceUnavailable => warn!(
                trace_id = trace_id.unwrap_or_default(),
                context = %self.context,
                error = %self.error,
                "request failed with unavailable dependency"
            ),
            _ => {}
        }

        let envelope = FailureEnvelope {
            success: false,
            code: self.error.code(),
            error: if internal {
                INTERNAL_ERROR_MESSAGE
            } else {
                self.error.message()
            },
            message: &self.context,
            trace_id,
            details: if internal { None } else { self.error.details() },
        };

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(envelope)
    }
}
