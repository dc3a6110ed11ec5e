//! Behavioural coverage of the user service over the in-memory repository.

use std::sync::Arc;

use rstest::{fixture, rstest};
use users_backend::domain::ports::{CreateUserRequest, UpdateUserRequest, UsersCommand, UsersQuery};
use users_backend::domain::{ErrorCode, UserService, UserStats};
use users_backend::outbound::persistence::InMemoryUserRepository;

type Service = UserService<InMemoryUserRepository>;

struct Directory {
    repo: Arc<InMemoryUserRepository>,
    service: Service,
}

#[fixture]
fn directory() -> Directory {
    let repo = Arc::new(InMemoryUserRepository::new(Arc::new(mockable::DefaultClock)));
    let service = UserService::new(repo.clone());
    Directory { repo, service }
}

fn request(name: &str, email: &str, age: i64) -> CreateUserRequest {
    CreateUserRequest {
        name: name.to_owned(),
        email: email.to_owned(),
        age,
    }
}

#[rstest]
#[tokio::test]
async fn juan_perez_round_trip(directory: Directory) {
    let created = directory
        .service
        .create_user(request("Juan Pérez", "juan.perez@example.com", 25))
        .await
        .expect("create");
    assert!(created.is_active());

    let fetched = directory
        .service
        .get_user_by_id(created.id().as_ref())
        .await
        .expect("get")
        .expect("present");
    assert_eq!(fetched, created);

    let duplicate = directory
        .service
        .create_user(request("Otro", "juan.perez@example.com", 40))
        .await
        .expect_err("duplicate email");
    assert_eq!(duplicate.code(), ErrorCode::Conflict);
    assert_eq!(duplicate.message(), "El email ya está en uso");
    assert_eq!(directory.repo.len(), 1);
}

#[rstest]
#[case(121, false)]
#[case(120, true)]
#[case(0, true)]
#[case(-1, false)]
#[tokio::test]
async fn age_boundaries(directory: Directory, #[case] age: i64, #[case] accepted: bool) {
    let outcome = directory
        .service
        .create_user(request("Edge Case", "edge@example.com", age))
        .await;

    match outcome {
        Ok(user) => {
            assert!(accepted, "age {age} should be rejected");
            assert_eq!(i64::from(user.age().years()), age);
        }
        Err(error) => {
            assert!(!accepted, "age {age} should be accepted");
            assert_eq!(error.message(), "Edad debe estar entre 0 y 120 años");
        }
    }
}

#[rstest]
#[tokio::test]
async fn delete_then_get_is_absent(directory: Directory) {
    let user = directory
        .service
        .create_user(request("Temp", "temp@example.com", 33))
        .await
        .expect("create");

    directory
        .service
        .delete_user(user.id().as_ref())
        .await
        .expect("delete");
    let after = directory
        .service
        .get_user_by_id(user.id().as_ref())
        .await
        .expect("get");
    assert!(after.is_none());

    let again = directory
        .service
        .delete_user(user.id().as_ref())
        .await
        .expect_err("second delete");
    assert_eq!(again.message(), "Usuario no encontrado");
}

#[rstest]
#[tokio::test]
async fn delete_unknown_id_reports_not_found(directory: Directory) {
    let error = directory
        .service
        .delete_user("999")
        .await
        .expect_err("unknown id");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Usuario no encontrado");
}

#[rstest]
#[tokio::test]
async fn partial_update_leaves_other_fields(directory: Directory) {
    let user = directory
        .service
        .create_user(request("Original", "keep@example.com", 30))
        .await
        .expect("create");

    let updated = directory
        .service
        .update_user(
            user.id().as_ref(),
            UpdateUserRequest {
                name: Some("Updated Name".to_owned()),
                age: Some(31),
                ..UpdateUserRequest::default()
            },
        )
        .await
        .expect("update")
        .expect("present");

    assert_eq!(updated.name().as_ref(), "Updated Name");
    assert_eq!(updated.age().years(), 31);
    assert_eq!(updated.email().as_ref(), "keep@example.com");
    assert_eq!(updated.created_at(), user.created_at());
}

#[rstest]
#[tokio::test]
async fn email_moves_only_when_free(directory: Directory) {
    let first = directory
        .service
        .create_user(request("First", "first@example.com", 20))
        .await
        .expect("create");
    directory
        .service
        .create_user(request("Second", "second@example.com", 20))
        .await
        .expect("create");

    let own = UpdateUserRequest {
        email: Some("first@example.com".to_owned()),
        ..UpdateUserRequest::default()
    };
    directory
        .service
        .update_user(first.id().as_ref(), own)
        .await
        .expect("own email is fine");

    let taken = UpdateUserRequest {
        email: Some("second@example.com".to_owned()),
        ..UpdateUserRequest::default()
    };
    let error = directory
        .service
        .update_user(first.id().as_ref(), taken)
        .await
        .expect_err("taken email");
    assert_eq!(error.code(), ErrorCode::Conflict);

    let unchanged = directory
        .service
        .get_user_by_id(first.id().as_ref())
        .await
        .expect("get")
        .expect("present");
    assert_eq!(unchanged.email().as_ref(), "first@example.com");
}

#[rstest]
#[tokio::test]
async fn stats_and_active_list_track_deactivation(directory: Directory) {
    assert_eq!(
        directory.service.user_stats().await.expect("stats"),
        UserStats {
            total: 0,
            active: 0,
            average_age: 0.0,
        }
    );

    let mut ids = Vec::new();
    for (name, email, age) in [
        ("Ana", "ana@example.com", 20),
        ("Bea", "bea@example.com", 30),
        ("Cai", "cai@example.com", 40),
    ] {
        let user = directory
            .service
            .create_user(request(name, email, age))
            .await
            .expect("create");
        ids.push(user.id().to_string());
    }

    directory
        .service
        .update_user(
            &ids[2],
            UpdateUserRequest {
                is_active: Some(false),
                ..UpdateUserRequest::default()
            },
        )
        .await
        .expect("deactivate");

    let stats = directory.service.user_stats().await.expect("stats");
    assert_eq!(
        stats,
        UserStats {
            total: 3,
            active: 2,
            average_age: 30.0,
        }
    );

    let active = directory
        .service
        .list_active_users()
        .await
        .expect("active");
    let active_ids: Vec<String> = active.iter().map(|user| user.id().to_string()).collect();
    assert_eq!(active_ids, ids[..2]);
}

#[rstest]
#[tokio::test]
async fn average_age_rounds_to_two_decimals(directory: Directory) {
    for (email, age) in [("a@example.com", 20), ("b@example.com", 21), ("c@example.com", 21)] {
        directory
            .service
            .create_user(request("Someone", email, age))
            .await
            .expect("create");
    }

    let stats = directory.service.user_stats().await.expect("stats");
    assert!((stats.average_age - 20.67).abs() < f64::EPSILON);
}
