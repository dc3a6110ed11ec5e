//! OpenAPI schema definitions for domain types and response envelopes.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their JSON shape and live in the inbound adapter
//! layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with stored state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Failure envelope rendered by [`crate::inbound::http::error::ApiFailure`].
#[derive(ToSchema)]
#[schema(as = Failure, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct FailureSchema {
    /// Always `false`.
    #[schema(example = false)]
    success: bool,
    /// Stable machine-readable error code.
    code: ErrorCodeSchema,
    /// Domain message describing what went wrong.
    #[schema(example = "El email ya está en uso")]
    error: String,
    /// Operation that failed.
    #[schema(example = "Error al crear usuario")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details for client errors.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserSchema {
    /// Storage-assigned identifier.
    #[schema(example = "1")]
    id: String,
    /// Display name, at least two characters once trimmed.
    #[schema(example = "Juan Pérez")]
    name: String,
    /// Unique email address.
    #[schema(example = "juan.perez@example.com")]
    email: String,
    /// Age in years, 0 to 120.
    #[schema(example = 25, minimum = 0, maximum = 120)]
    age: u8,
    /// Creation time, RFC 3339.
    #[schema(example = "2024-03-01T12:00:00Z")]
    created_at: String,
    /// Whether the user appears in the active list.
    is_active: bool,
}

/// OpenAPI schema for [`crate::domain::UserStats`].
#[derive(ToSchema)]
#[schema(as = UserStats, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserStatsSchema {
    /// Count of all users.
    #[schema(example = 3)]
    total: u64,
    /// Count of active users.
    #[schema(example = 2)]
    active: u64,
    /// Mean age of all users, two decimals.
    #[schema(example = 30.0)]
    average_age: f64,
}

/// Success envelope carrying one user.
#[derive(ToSchema)]
#[schema(as = UserResponse)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserResponseSchema {
    #[schema(example = true)]
    success: bool,
    data: UserSchema,
    #[schema(example = "Usuario obtenido exitosamente")]
    message: String,
}

/// Success envelope carrying the active users.
#[derive(ToSchema)]
#[schema(as = UserListResponse)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserListResponseSchema {
    #[schema(example = true)]
    success: bool,
    data: Vec<UserSchema>,
    #[schema(example = "Usuarios activos obtenidos exitosamente")]
    message: String,
}

/// Success envelope carrying directory statistics.
#[derive(ToSchema)]
#[schema(as = UserStatsResponse)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserStatsResponseSchema {
    #[schema(example = true)]
    success: bool,
    data: UserStatsSchema,
    #[schema(example = "Estadísticas obtenidas exitosamente")]
    message: String,
}

/// Success envelope confirming a delete.
#[derive(ToSchema)]
#[schema(as = DeletedUserResponse)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct DeletedUserResponseSchema {
    #[schema(example = true)]
    success: bool,
    data: crate::inbound::http::users::DeletedUser,
    #[schema(example = "Usuario eliminado exitosamente")]
    message: String,
}
