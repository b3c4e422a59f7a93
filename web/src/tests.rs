/*
 * SPDX-FileCopyrightText: 2025 Showcase Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::authorization::{decode_token, encode_token};
use crate::error::WebError;
use axum::Extension;
use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;
use chrono::Utc;
use core::types::*;
use entity::user;
use password_auth::generate_hash;
use sea_orm::{DatabaseBackend, MockDatabase};
use std::sync::Arc;
use tokio_test::block_on;
use uuid::Uuid;

fn create_mock_cli() -> Cli {
    Cli {
        log_level: "info".to_string(),
        debug: true,
        ip: "127.0.0.1".to_string(),
        port: 3000,
        serve_url: "http://127.0.0.1:8000".to_string(),
        cors_origins: None,
        database_url: Some("mock://test".to_string()),
        database_url_file: None,
        jwt_secret_file: "/nonexistent/test_jwt".to_string(),
        jwt_expiry_hours: 24,
        disable_registration: false,
    }
}

fn mock_user(password: &str) -> MUser {
    user::Model {
        id: Uuid::new_v4(),
        username: "testuser".to_string(),
        email: "test@example.com".to_string(),
        password: generate_hash(password),
        last_login_at: Utc::now().naive_utc(),
        created_at: Utc::now().naive_utc(),
    }
}

fn mock_project(owner: Uuid) -> MProject {
    let now = Utc::now().naive_utc();
    entity::project::Model {
        id: Uuid::new_v4(),
        title: "Test Project".to_string(),
        description: None,
        repository_url: None,
        source_code: None,
        status: entity::project::ProjectStatus::Pending,
        created_by: owner,
        created_at: now,
        updated_at: now,
    }
}

fn mock_state(db: sea_orm::DatabaseConnection) -> Arc<ServerState> {
    Arc::new(ServerState {
        db,
        cli: create_mock_cli(),
    })
}

fn state_with_users(batches: Vec<Vec<MUser>>) -> Arc<ServerState> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(batches)
        .into_connection();

    mock_state(db)
}

fn empty_state() -> Arc<ServerState> {
    mock_state(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}

fn write_secret(name: &str, secret: &str) -> String {
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, secret).unwrap();
    path.to_str().unwrap().to_string()
}

mod token_tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let id = Uuid::new_v4();
        let token = encode_token(b"test-secret", id, 24).unwrap();
        assert!(!token.is_empty());

        let data = decode_token(b"test-secret", &token).unwrap();
        assert_eq!(data.claims.id, id);
        assert!(data.claims.exp > data.claims.iat);
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let id = Uuid::new_v4();
        let token = encode_token(b"test-secret", id, 24).unwrap();

        decode_token(b"other-secret", &token).unwrap_err();
    }

    #[test]
    fn test_token_rejects_expired() {
        let id = Uuid::new_v4();
        let token = encode_token(b"test-secret", id, -2).unwrap();

        decode_token(b"test-secret", &token).unwrap_err();
    }

    #[test]
    fn test_token_rejects_garbage() {
        decode_token(b"test-secret", "not.a.token").unwrap_err();
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (WebError::BadRequest("x".to_string()), 400),
            (WebError::Unauthorized("x".to_string()), 401),
            (WebError::Forbidden("x".to_string()), 403),
            (WebError::NotFound("x".to_string()), 404),
            (WebError::Conflict("x".to_string()), 409),
            (WebError::InternalServerError("x".to_string()), 500),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status().as_u16(), status);
        }
    }

    #[test]
    fn test_not_found_or_forbidden_is_404() {
        let err = WebError::not_found_or_forbidden("Comment");
        assert_eq!(err.into_response().status().as_u16(), 404);
    }

    #[test]
    fn test_invalid_credentials_is_single_message() {
        // Unknown email and bad password must be indistinguishable.
        assert_eq!(
            WebError::invalid_credentials().to_string(),
            WebError::invalid_credentials().to_string()
        );
    }
}

mod router_tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http::header::CONTENT_TYPE;
    use tower::ServiceExt;

    #[test]
    fn test_malformed_json_is_bad_request() {
        let app = crate::create_router(empty_state());

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/users/signup")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"email":"a@b.com"}"#))
            .unwrap();

        let response = block_on(app.oneshot(request)).unwrap();
        assert_eq!(response.status().as_u16(), 400);
    }

    #[test]
    fn test_me_without_token_is_unauthorized() {
        let app = crate::create_router(empty_state());

        let request = Request::builder()
            .method("GET")
            .uri("/api/v1/users/me")
            .body(Body::empty())
            .unwrap();

        let response = block_on(app.oneshot(request)).unwrap();
        assert_eq!(response.status().as_u16(), 401);
    }

    #[test]
    fn test_unknown_route_is_not_found() {
        let app = crate::create_router(empty_state());

        let request = Request::builder()
            .method("GET")
            .uri("/api/v1/nope")
            .body(Body::empty())
            .unwrap();

        let response = block_on(app.oneshot(request)).unwrap();
        assert_eq!(response.status().as_u16(), 404);
    }
}

mod auth_tests {
    use super::*;
    use crate::endpoints::auth::*;

    #[test]
    fn test_signup_duplicate_email_conflicts() {
        let state = state_with_users(vec![vec![mock_user("secret1")]]);

        let body = MakeUserRequest {
            email: "test@example.com".to_string(),
            password: "secret1".to_string(),
            username: "abc".to_string(),
        };

        let err = block_on(post_signup(State(state), Ok(Json(body)))).unwrap_err();
        assert_eq!(err.into_response().status().as_u16(), 409);
    }

    #[test]
    fn test_signup_rejects_short_password() {
        let state = state_with_users(vec![]);

        let body = MakeUserRequest {
            email: "a@b.com".to_string(),
            password: "12345".to_string(),
            username: "abc".to_string(),
        };

        let err = block_on(post_signup(State(state), Ok(Json(body)))).unwrap_err();
        assert_eq!(err.into_response().status().as_u16(), 400);
    }

    #[test]
    fn test_signup_rejects_short_username() {
        let state = state_with_users(vec![]);

        let body = MakeUserRequest {
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
            username: "ab".to_string(),
        };

        let err = block_on(post_signup(State(state), Ok(Json(body)))).unwrap_err();
        assert_eq!(err.into_response().status().as_u16(), 400);
    }

    #[test]
    fn test_signup_rejects_invalid_email() {
        let state = state_with_users(vec![]);

        let body = MakeUserRequest {
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
            username: "abc".to_string(),
        };

        let err = block_on(post_signup(State(state), Ok(Json(body)))).unwrap_err();
        assert_eq!(err.into_response().status().as_u16(), 400);
    }

    #[test]
    fn test_signup_disabled() {
        let mut cli = create_mock_cli();
        cli.disable_registration = true;
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let state = Arc::new(ServerState { db, cli });

        let body = MakeUserRequest {
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
            username: "abc".to_string(),
        };

        let err = block_on(post_signup(State(state), Ok(Json(body)))).unwrap_err();
        assert_eq!(err.into_response().status().as_u16(), 400);
    }

    #[test]
    fn test_signin_unknown_email_unauthorized() {
        let state = state_with_users(vec![vec![]]);

        let body = MakeLoginRequest {
            email: "nobody@example.com".to_string(),
            password: "secret1".to_string(),
        };

        let err = block_on(post_signin(State(state), Ok(Json(body)))).unwrap_err();
        assert_eq!(err.into_response().status().as_u16(), 401);
    }

    #[test]
    fn test_signin_wrong_password_unauthorized() {
        let state = state_with_users(vec![vec![mock_user("secret1")]]);

        let body = MakeLoginRequest {
            email: "test@example.com".to_string(),
            password: "wrong-password".to_string(),
        };

        let err = block_on(post_signin(State(state), Ok(Json(body)))).unwrap_err();
        assert_eq!(err.into_response().status().as_u16(), 401);
    }

    #[test]
    fn test_signin_issues_token_for_user() {
        let user = mock_user("secret1");
        let secret_file = write_secret("showcase-web-signin-secret", "signin-secret");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user.clone()], vec![user.clone()]])
            .into_connection();

        let mut cli = create_mock_cli();
        cli.jwt_secret_file = secret_file;
        let state = Arc::new(ServerState { db, cli });

        let body = MakeLoginRequest {
            email: "test@example.com".to_string(),
            password: "secret1".to_string(),
        };

        let res = block_on(post_signin(State(state), Ok(Json(body)))).unwrap();
        let session = res.0.message;

        assert!(!session.token.is_empty());
        assert_eq!(session.user_id, user.id);
        assert_eq!(session.email, "test@example.com");
        assert_eq!(session.username, "testuser");

        let data = decode_token(b"signin-secret", &session.token).unwrap();
        assert_eq!(data.claims.id, user.id);
    }

    #[test]
    fn test_request_serialization() {
        let request = MakeUserRequest {
            email: "test@example.com".to_string(),
            password: "secret1".to_string(),
            username: "testuser".to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains("testuser"));

        let response = SignupResponse {
            user_id: Uuid::new_v4(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("userId"));
    }
}

mod user_tests {
    use super::*;
    use crate::endpoints::user::*;

    #[test]
    fn test_me_returns_profile() {
        let user = mock_user("secret1");

        let res = block_on(get(Extension(user.clone()))).unwrap();
        assert_eq!(res.0.message.user_id, user.id);
        assert_eq!(res.0.message.email, "test@example.com");
        assert_eq!(res.0.message.username, "testuser");
    }
}

mod project_tests {
    use super::*;
    use crate::endpoints::projects::*;

    #[test]
    fn test_create_project_requires_title() {
        let state = empty_state();

        let body = MakeProjectRequest {
            title: "   ".to_string(),
            description: None,
            repository_url: None,
            source_code: None,
        };

        let err = block_on(post(
            State(state),
            Extension(mock_user("secret1")),
            Ok(Json(body)),
        ))
        .unwrap_err();
        assert_eq!(err.into_response().status().as_u16(), 400);
    }

    #[test]
    fn test_create_project_rejects_bad_repository_url() {
        let state = empty_state();

        let body = MakeProjectRequest {
            title: "My Project".to_string(),
            description: None,
            repository_url: Some("definitely not a url".to_string()),
            source_code: None,
        };

        let err = block_on(post(
            State(state),
            Extension(mock_user("secret1")),
            Ok(Json(body)),
        ))
        .unwrap_err();
        assert_eq!(err.into_response().status().as_u16(), 400);
    }

    #[test]
    fn test_create_project_accepts_git_repository_url() {
        let user = mock_user("secret1");
        let mut created = mock_project(user.id);
        created.repository_url = Some("https://github.com/foo/bar.git".to_string());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![created]])
            .into_connection();
        let state = mock_state(db);

        let body = MakeProjectRequest {
            title: "Test Project".to_string(),
            description: None,
            repository_url: Some("https://github.com/foo/bar.git".to_string()),
            source_code: None,
        };

        let (status, res) = block_on(post(State(state), Extension(user), Ok(Json(body)))).unwrap();
        assert_eq!(status.as_u16(), 201);
        assert!(res.0.message.repository_url.is_some());
    }

    #[test]
    fn test_create_project_defaults_to_pending() {
        let user = mock_user("secret1");
        let created = mock_project(user.id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![created.clone()]])
            .into_connection();
        let state = mock_state(db);

        let body = MakeProjectRequest {
            title: "Test Project".to_string(),
            description: None,
            repository_url: None,
            source_code: None,
        };

        let (status, res) = block_on(post(State(state), Extension(user), Ok(Json(body)))).unwrap();
        assert_eq!(status.as_u16(), 201);
        assert_eq!(
            res.0.message.status,
            entity::project::ProjectStatus::Pending
        );
    }

    #[test]
    fn test_update_foreign_project_is_hidden() {
        // No row matches (id, created_by), so the mock returns nothing.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<MProject>::new()])
            .into_connection();
        let state = mock_state(db);

        let body = PatchProjectRequest {
            title: Some("New Title".to_string()),
            description: None,
            repository_url: None,
        };

        let err = block_on(put(
            State(state),
            Extension(mock_user("secret1")),
            Path(Uuid::new_v4()),
            Ok(Json(body)),
        ))
        .unwrap_err();
        assert_eq!(err.into_response().status().as_u16(), 404);
    }
}

mod comment_tests {
    use super::*;
    use crate::endpoints::comments::*;

    #[test]
    fn test_comment_listing_includes_author() {
        let user = mock_user("secret1");
        let project = mock_project(user.id);

        let newer = entity::comment::Model {
            id: Uuid::new_v4(),
            project: project.id,
            content: "Second".to_string(),
            created_by: user.id,
            created_at: Utc::now().naive_utc(),
        };
        let older = entity::comment::Model {
            id: Uuid::new_v4(),
            project: project.id,
            content: "First".to_string(),
            created_by: user.id,
            created_at: Utc::now().naive_utc() - chrono::Duration::hours(1),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![project.clone()]])
            .append_query_results(vec![vec![
                (newer.clone(), user.clone()),
                (older.clone(), user.clone()),
            ]])
            .into_connection();
        let state = mock_state(db);

        let res = block_on(get(State(state), Path(project.id))).unwrap();
        let comments = res.0.message;

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].content, "Second");
        assert_eq!(comments[1].content, "First");
        assert_eq!(comments[0].author.as_ref().unwrap().username, "testuser");
    }

    #[test]
    fn test_delete_foreign_comment_is_hidden() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<MComment>::new()])
            .into_connection();
        let state = mock_state(db);

        let err = block_on(delete(
            State(state),
            Extension(mock_user("secret1")),
            Path(Uuid::new_v4()),
        ))
        .unwrap_err();

        let response = err.into_response();
        assert_eq!(response.status().as_u16(), 404);
    }

    #[test]
    fn test_comment_on_missing_project_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<MProject>::new()])
            .into_connection();
        let state = mock_state(db);

        let body = MakeCommentRequest {
            content: "Nice work".to_string(),
        };

        let err = block_on(post(
            State(state),
            Extension(mock_user("secret1")),
            Path(Uuid::new_v4()),
            Ok(Json(body)),
        ))
        .unwrap_err();
        assert_eq!(err.into_response().status().as_u16(), 404);
    }

    #[test]
    fn test_comment_requires_content() {
        let state = empty_state();

        let body = MakeCommentRequest {
            content: "".to_string(),
        };

        let err = block_on(post(
            State(state),
            Extension(mock_user("secret1")),
            Path(Uuid::new_v4()),
            Ok(Json(body)),
        ))
        .unwrap_err();
        assert_eq!(err.into_response().status().as_u16(), 400);
    }

    #[test]
    fn test_comment_listing_orders_most_recent_first() {
        use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QueryTrait};

        // Regression guard on the listing order.
        let query = EComment::find()
            .filter(CComment::Project.eq(Uuid::new_v4()))
            .order_by_desc(CComment::CreatedAt)
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(query.contains(r#"ORDER BY "comment"."created_at" DESC"#));
    }
}

mod improvement_tests {
    use super::*;
    use crate::endpoints::improvements::*;
    use entity::improvement::ImprovementStatus;

    fn mock_improvement(project: Uuid, author: Uuid) -> MImprovement {
        entity::improvement::Model {
            id: Uuid::new_v4(),
            project,
            title: "Faster builds".to_string(),
            description: "Cache the artifacts".to_string(),
            status: ImprovementStatus::Pending,
            created_by: author,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_improvement_listing_includes_author() {
        let user = mock_user("secret1");
        let project = mock_project(user.id);
        let improvement = mock_improvement(project.id, user.id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![project.clone()]])
            .append_query_results(vec![vec![(improvement.clone(), user.clone())]])
            .into_connection();
        let state = mock_state(db);

        let res = block_on(get(State(state), Path(project.id))).unwrap();
        let improvements = res.0.message;

        assert_eq!(improvements.len(), 1);
        assert_eq!(improvements[0].title, "Faster builds");
        assert_eq!(
            improvements[0].author.as_ref().unwrap().username,
            "testuser"
        );
    }

    #[test]
    fn test_improvement_requires_title_and_description() {
        let state = empty_state();

        let body = MakeImprovementRequest {
            title: "Faster builds".to_string(),
            description: " ".to_string(),
            status: None,
        };

        let err = block_on(post(
            State(state),
            Extension(mock_user("secret1")),
            Path(Uuid::new_v4()),
            Ok(Json(body)),
        ))
        .unwrap_err();
        assert_eq!(err.into_response().status().as_u16(), 400);
    }

    #[test]
    fn test_update_rejects_blank_description() {
        let user = mock_user("secret1");
        let improvement = mock_improvement(Uuid::new_v4(), user.id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![improvement.clone()]])
            .into_connection();
        let state = mock_state(db);

        let body = PatchImprovementRequest {
            title: None,
            description: Some("   ".to_string()),
            status: None,
        };

        let err = block_on(put(
            State(state),
            Extension(user),
            Path(improvement.id),
            Ok(Json(body)),
        ))
        .unwrap_err();
        assert_eq!(err.into_response().status().as_u16(), 400);
    }

    #[test]
    fn test_update_foreign_improvement_is_hidden() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<MImprovement>::new()])
            .into_connection();
        let state = mock_state(db);

        let body = PatchImprovementRequest {
            title: None,
            description: None,
            status: Some(ImprovementStatus::Accepted),
        };

        let err = block_on(put(
            State(state),
            Extension(mock_user("secret1")),
            Path(Uuid::new_v4()),
            Ok(Json(body)),
        ))
        .unwrap_err();
        assert_eq!(err.into_response().status().as_u16(), 404);
    }

    #[test]
    fn test_status_wire_format_is_lowercase() {
        let json = serde_json::to_string(&ImprovementStatus::Pending).unwrap();
        assert_eq!(json, r#""pending""#);
    }
}
