use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public auth routes (no authentication required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/token", post(handlers::obtain_token))
        .route("/api/auth/token/refresh", post(handlers::refresh_token))
        .with_state(service)
}

/// Protected auth routes (require JWT authentication)
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/me", get(handlers::get_me))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::{JwtValidator, TokenService};
    use crate::shared::test_helpers::InMemoryUserRepository;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::time::Duration;

    const SECRET: &str = "auth-routes-test-secret";

    fn server() -> (TestServer, Arc<InMemoryUserRepository>) {
        let users = Arc::new(InMemoryUserRepository::default());
        let service = Arc::new(AuthService::new(
            users.clone(),
            Arc::new(TokenService::new(
                SECRET,
                Duration::from_secs(3600),
                Duration::from_secs(86400),
            )),
            Arc::new(JwtValidator::new(SECRET, Duration::from_secs(0))),
        ));
        let router = public_routes(service.clone()).merge(
            protected_routes(service.clone()).route_layer(
                axum::middleware::from_fn_with_state(service, crate::core::middleware::auth_middleware),
            ),
        );
        (TestServer::new(router).unwrap(), users)
    }

    async fn register(server: &TestServer, username: &str) -> axum_test::TestResponse {
        server
            .post("/api/auth/register")
            .json(&json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": "reduce-reuse"
            }))
            .await
    }

    #[tokio::test]
    async fn test_register_then_duplicate_conflicts() {
        let (server, _) = server();
        let response = register(&server, "ranger").await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["username"], "ranger");
        assert_eq!(body["data"]["is_staff"], false);

        let duplicate = register(&server, "ranger").await;
        duplicate.assert_status(StatusCode::CONFLICT);
        let body: Value = duplicate.json();
        assert_eq!(body["message"], "A user with that username already exists.");
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let (server, _) = server();
        server
            .post("/api/auth/register")
            .json(&json!({ "username": "ranger", "password": "short" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_token_refresh_and_me() {
        let (server, users) = server();
        register(&server, "ranger").await.assert_status(StatusCode::CREATED);

        let wrong = server
            .post("/api/auth/token")
            .json(&json!({ "username": "ranger", "password": "not-it-at-all" }))
            .await;
        wrong.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = wrong.json();
        assert_eq!(
            body["message"],
            "No active account found with the given credentials"
        );

        let body: Value = server
            .post("/api/auth/token")
            .json(&json!({ "username": "ranger", "password": "reduce-reuse" }))
            .await
            .json();
        let access = body["data"]["access"].as_str().unwrap().to_string();
        let refresh = body["data"]["refresh"].as_str().unwrap().to_string();

        let me: Value = server
            .get("/api/auth/me")
            .add_header(axum::http::header::AUTHORIZATION, format!("Bearer {}", access))
            .await
            .json();
        assert_eq!(me["data"]["username"], "ranger");

        server
            .post("/api/auth/token/refresh")
            .json(&json!({ "refresh": &access }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .post("/api/auth/token/refresh")
            .json(&json!({ "refresh": &refresh }))
            .await
            .assert_status_ok();

        let id = me["data"]["id"].as_i64().unwrap();
        users.set_active(id, false);
        server
            .post("/api/auth/token/refresh")
            .json(&json!({ "refresh": &refresh }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .get("/api/auth/me")
            .add_header(axum::http::header::AUTHORIZATION, format!("Bearer {}", access))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
