//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every users and health endpoint together with the
//! schema wrappers from [`crate::inbound::http::schemas`], which describe
//! domain types without coupling them to utoipa.
//!
//! The document is served by Swagger UI in debug builds and printed by the
//! `openapi-dump` binary.

use crate::inbound::http::health::HealthSummary;
use crate::inbound::http::schemas::{
    DeletedUserResponseSchema, ErrorCodeSchema, FailureSchema, UserListResponseSchema,
    UserResponseSchema, UserSchema, UserStatsResponseSchema, UserStatsSchema,
};
use crate::inbound::http::users::{CreateUserBody, DeletedUser, UpdateUserBody};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users backend API",
        description = "User directory with validation, email uniqueness and statistics."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_active_users,
        crate::inbound::http::users::user_stats,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateUserBody,
        UpdateUserBody,
        DeletedUser,
        UserSchema,
        UserStatsSchema,
        UserResponseSchema,
        UserListResponseSchema,
        UserStatsResponseSchema,
        DeletedUserResponseSchema,
        FailureSchema,
        ErrorCodeSchema,
        HealthSummary,
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document's surface.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/users")]
    #[case("/users/stats")]
    #[case("/users/{id}")]
    #[case("/health")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn id_path_documents_get_put_and_delete() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/users/{id}").expect("id path");
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.delete.is_some());
    }

    #[rstest]
    #[case("User")]
    #[case("UserStats")]
    #[case("Failure")]
    #[case("ErrorCode")]
    fn domain_schemas_are_registered(#[case] name: &str) {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components registered");
        assert!(components.schemas.contains_key(name), "missing {name}");
    }
}
