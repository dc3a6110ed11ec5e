//! Users API handlers.
//!
//! ```text
//! POST   /users        {"name":"Juan Pérez","email":"juan.perez@example.com","age":25}
//! GET    /users
//! GET    /users/stats
//! GET    /users/{id}
//! PUT    /users/{id}   {"age":26,"isActive":false}
//! DELETE /users/{id}
//! ```
//!
//! Handlers translate JSON into the driving-port requests and wrap results in
//! the success envelope. They apply no business rules of their own.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;
use utoipa::ToSchema;

use crate::domain::ports::{CreateUserRequest, UpdateUserRequest};
use crate::domain::{Error, USER_NOT_FOUND_MESSAGE};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::ApiSuccess;
use crate::inbound::http::error::{ApiFailure, ErrorContext};
use crate::inbound::http::schemas::{
    DeletedUserResponseSchema, FailureSchema, UserListResponseSchema, UserResponseSchema,
    UserStatsResponseSchema,
};
use crate::inbound::http::state::HttpState;

const CREATE_CONTEXT: &str = "Error al crear usuario";
const GET_CONTEXT: &str = "Error al obtener usuario";
const UPDATE_CONTEXT: &str = "Error al actualizar usuario";
const DELETE_CONTEXT: &str = "Error al eliminar usuario";
const LIST_ACTIVE_CONTEXT: &str = "Error al obtener usuarios activos";
const STATS_CONTEXT: &str = "Error al obtener estadísticas";

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
    #[schema(example = "Juan Pérez")]
    pub name: String,
    #[schema(example = "juan.perez@example.com")]
    pub email: String,
    #[schema(example = 25)]
    #[serde(deserialize_with = "whole_years")]
    pub age: i64,
}

impl From<CreateUserBody> for CreateUserRequest {
    fn from(value: CreateUserBody) -> Self {
        let CreateUserBody { name, email, age } = value;
        Self { name, email, age }
    }
}

/// Request body for `PUT /users/{id}`. Omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "optional_whole_years")]
    pub age: Option<i64>,
    pub is_active: Option<bool>,
}

impl From<UpdateUserBody> for UpdateUserRequest {
    fn from(value: UpdateUserBody) -> Self {
        let UpdateUserBody {
            name,
            email,
            age,
            is_active,
        } = value;
        Self {
            name,
            email,
            age,
            is_active,
        }
    }
}

/// Read an integral age from any JSON number with no fractional part, so
/// `25` and `25.0` agree. Values beyond `i64` saturate and fail range
/// validation in the domain.
fn years_from_number(number: &Number) -> Option<i64> {
    if let Some(years) = number.as_i64() {
        return Some(years);
    }
    if number.is_u64() {
        return Some(i64::MAX);
    }
    let value = number.as_f64()?;
    // `as` saturates out-of-range floats.
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}

fn whole_years<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    years_from_number(&number)
        .ok_or_else(|| D::Error::custom(format!("age must be a whole number, got {number}")))
}

fn optional_whole_years<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Number>::deserialize(deserializer)?
        .map(|number| {
            years_from_number(&number).ok_or_else(|| {
                D::Error::custom(format!("age must be a whole number, got {number}"))
            })
        })
        .transpose()
}

/// Payload returned after a delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedUser {
    #[schema(example = "1")]
    pub id: String,
}

fn user_missing(context: &'static str) -> ApiFailure {
    ApiFailure::absent(Error::not_found(USER_NOT_FOUND_MESSAGE), context)
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "User created", body = UserResponseSchema),
        (status = 400, description = "Validation failed, email in use or malformed body", body = FailureSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserBody>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users
        .create_user(payload.into_inner().into())
        .await
        .context(CREATE_CONTEXT)?;
    Ok(HttpResponse::Created().json(ApiSuccess::new(user, "Usuario creado exitosamente")))
}

/// List users whose activity flag is set.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Active users", body = UserListResponseSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["users"],
    operation_id = "getActiveUsers"
)]
#[get("/users")]
pub async fn list_active_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state
        .users_query
        .list_active_users()
        .await
        .context(LIST_ACTIVE_CONTEXT)?;
    Ok(HttpResponse::Ok().json(ApiSuccess::new(
        users,
        "Usuarios activos obtenidos exitosamente",
    )))
}

/// Directory totals and mean age.
#[utoipa::path(
    get,
    path = "/users/stats",
    responses(
        (status = 200, description = "User statistics", body = UserStatsResponseSchema),
        (status = 500, description = "Internal server error", body = FailureSchema)
    ),
    tags = ["users"],
    operation_id = "getUserStats"
)]
#[get("/users/stats")]
pub async fn user_stats(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let stats = state
        .users_query
        .user_stats()
        .await
        .context(STATS_CONTEXT)?;
    Ok(HttpResponse::Ok().json(ApiSuccess::new(
        stats,
        "Estadísticas obtenidas exitosamente",
    )))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User found", body = UserResponseSchema),
        (status = 400, description = "Blank identifier", body = FailureSchema),
        (status = 404, description = "User not found", body = FailureSchema)
    ),
    tags = ["users"],
    operation_id = "getUserById"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users_query
        .get_user_by_id(&path)
        .await
        .context(GET_CONTEXT)?
        .ok_or_else(|| user_missing("No se encontró el usuario solicitado"))?;
    Ok(HttpResponse::Ok().json(ApiSuccess::new(user, "Usuario obtenido exitosamente")))
}

/// Apply a partial update.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "User updated", body = UserResponseSchema),
        (status = 400, description = "Validation failed, email in use or malformed body", body = FailureSchema),
        (status = 404, description = "User not found", body = FailureSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserBody>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users
        .update_user(&path, payload.into_inner().into())
        .await
        .context(UPDATE_CONTEXT)?
        .ok_or_else(|| user_missing("No se encontró el usuario para actualizar"))?;
    Ok(HttpResponse::Ok().json(ApiSuccess::new(user, "Usuario actualizado exitosamente")))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = DeletedUserResponseSchema),
        (status = 400, description = "Blank identifier or unknown user", body = FailureSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    state
        .users
        .delete_user(&id)
        .await
        .context(DELETE_CONTEXT)?;
    Ok(HttpResponse::Ok().json(ApiSuccess::new(
        DeletedUser { id },
        "Usuario eliminado exitosamente",
    )))
}
