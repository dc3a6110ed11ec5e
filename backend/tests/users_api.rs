//! End-to-end HTTP coverage of the users API over in-memory storage.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};
use users_backend::Trace;
use users_backend::domain::UserService;
use users_backend::inbound::http::health::HealthState;
use users_backend::inbound::http::state::HttpState;
use users_backend::inbound::http::{configure, json_config, route_not_found};
use users_backend::outbound::persistence::InMemoryUserRepository;

async fn init_app()
-> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let repo = Arc::new(InMemoryUserRepository::new(Arc::new(mockable::DefaultClock)));
    let service = Arc::new(UserService::new(repo));
    let health = web::Data::new(HealthState::new());
    health.mark_ready();

    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::new(service.clone(), service)))
            .app_data(health)
            .app_data(json_config())
            .wrap(Trace)
            .configure(configure)
            .default_service(web::to(route_not_found)),
    )
    .await
}

async fn send<S>(app: &S, request: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

fn create(body: Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post().uri("/users").set_json(body)
}

#[actix_web::test]
async fn user_lifecycle() {
    let app = init_app().await;

    let (status, body) = send(
        &app,
        create(json!({"name": "Juan Pérez", "email": "juan.perez@example.com", "age": 25})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "1");
    assert_eq!(body["data"]["isActive"], true);

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/users/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "juan.perez@example.com");

    let (status, body) = send(
        &app,
        actix_test::TestRequest::put()
            .uri("/users/1")
            .set_json(json!({"name": "Juan P.", "isActive": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Juan P.");
    assert_eq!(body["data"]["email"], "juan.perez@example.com");
    assert_eq!(body["data"]["isActive"], false);

    let (_, body) = send(&app, actix_test::TestRequest::get().uri("/users")).await;
    assert_eq!(body["data"], json!([]));

    let (status, body) = send(&app, actix_test::TestRequest::delete().uri("/users/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"id": "1"}));

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/users/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Usuario no encontrado");
}

#[actix_web::test]
async fn duplicate_email_answers_400_with_conflict_code() {
    let app = init_app().await;
    let payload = json!({"name": "Ana", "email": "ana@example.com", "age": 30});

    let (status, _) = send(&app, create(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, create(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "success": false,
            "code": "conflict",
            "error": "El email ya está en uso",
            "message": "Error al crear usuario",
            "traceId": body["traceId"].clone(),
        })
    );
    assert!(body["traceId"].is_string());
}

#[rstest]
#[case(json!({"name": "Ana", "email": "invalid-email", "age": 30}), "Email inválido")]
#[case(json!({"name": "Ana", "email": "ana@example.com", "age": 121}), "Edad debe estar entre 0 y 120 años")]
#[case(json!({"name": " A ", "email": "ana@example.com", "age": 30}), "El nombre debe tener al menos 2 caracteres")]
#[actix_web::test]
async fn invalid_fields_are_rejected(#[case] payload: Value, #[case] expected: &str) {
    let app = init_app().await;

    let (status, body) = send(&app, create(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], expected);

    let (_, stats) = send(&app, actix_test::TestRequest::get().uri("/users/stats")).await;
    assert_eq!(stats["data"]["total"], 0);
}

#[actix_web::test]
async fn stats_reflect_directory() {
    let app = init_app().await;
    for (name, email, age) in [
        ("Ana", "ana@example.com", 20),
        ("Bea", "bea@example.com", 30),
        ("Cai", "cai@example.com", 40),
    ] {
        send(&app, create(json!({"name": name, "email": email, "age": age}))).await;
    }
    send(
        &app,
        actix_test::TestRequest::put()
            .uri("/users/3")
            .set_json(json!({"isActive": false})),
    )
    .await;

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/users/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"total": 3, "active": 2, "averageAge": 30.0})
    );
}

#[actix_web::test]
async fn deleting_unknown_user_answers_400() {
    let app = init_app().await;

    let (status, body) = send(&app, actix_test::TestRequest::delete().uri("/users/999")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["error"], "Usuario no encontrado");
    assert_eq!(body["message"], "Error al eliminar usuario");
}

#[actix_web::test]
async fn whole_float_age_is_accepted() {
    let app = init_app().await;

    let (status, body) = send(
        &app,
        create(json!({"name": "Ana", "email": "ana@example.com", "age": 25.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["age"], 25);
}

#[actix_web::test]
async fn unknown_route_message_keeps_query_string() {
    let app = init_app().await;

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/nope?page=2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Ruta no encontrada");
    assert_eq!(body["message"], "No se encontró la ruta /nope?page=2");
}

#[actix_web::test]
async fn blank_id_is_rejected() {
    let app = init_app().await;

    let (status, body) = send(&app, actix_test::TestRequest::delete().uri("/users/%20")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ID de usuario requerido");
    assert_eq!(body["message"], "Error al eliminar usuario");
}

#[actix_web::test]
async fn health_endpoints_answer() {
    let app = init_app().await;

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "API funcionando correctamente");
    assert!(body["timestamp"].is_string());

    let (status, _) = send(&app, actix_test::TestRequest::get().uri("/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
}
