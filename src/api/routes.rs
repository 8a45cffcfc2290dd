//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use std::time::Duration;

use axum::{Router, http::HeaderValue, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::config::settings::ServerConfig;
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Compression and CORS
/// 2. Request ID - generates/propagates request IDs
/// 3. Logging - logs requests with request IDs
/// 4. Error normalization - stamps the request ID onto error bodies
/// 5. Timeout - bounds handler time by `server.request_timeout`
///
/// # Routes
/// - `/member/*`, `/gathering/*`, `/invitation/*` - entity operations
/// - `/health`, `/health/ready`, `/health/live` - probes
/// - `/swagger-ui` and `/api-docs/openapi.json` - API documentation
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/member", handlers::members::member_routes())
        .nest("/gathering", handlers::gatherings::gathering_routes())
        .nest("/invitation", handlers::invitations::invitation_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout)))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer(&server.cors_origins))
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// Any origin when `origins` is empty, otherwise only the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.trim().parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::IdGenerator;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use axum::response::Response;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState::in_memory(Arc::new(IdGenerator::new(1)));
        create_router(state, &ServerConfig::default())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn json_of(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn register_john(app: &Router) -> i64 {
        let response = send(
            app,
            Method::POST,
            "/member/register",
            Some(json!({"first_name": "John", "last_name": "Doe", "email": "john@doe.com"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_of(response).await["id"].as_i64().unwrap()
    }

    async fn create_meetup(app: &Router, creator: i64) -> i64 {
        let response = send(
            app,
            Method::POST,
            "/gathering/create",
            Some(json!({
                "creator": creator,
                "name": "Rust meetup",
                "location": "Jakarta",
                "scheduled_at": "2025-06-01T18:00:00Z",
                "type": 1
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_of(response).await["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_member_lifecycle() {
        let app = app();
        let id = register_john(&app).await;

        let found = send(&app, Method::GET, &format!("/member/findByID?id={}", id), None).await;
        assert_eq!(found.status(), StatusCode::OK);
        let found = json_of(found).await;
        assert_eq!(found["first_name"], "John");
        assert_eq!(found["email"], "john@doe.com");

        let updated = send(
            &app,
            Method::POST,
            "/member/update",
            Some(json!({"id": id, "first_name": "Jane", "last_name": "Doe", "email": "jane@doe.com"})),
        )
        .await;
        assert_eq!(updated.status(), StatusCode::OK);
        let updated = json_of(updated).await;
        assert_eq!(updated["first_name"], "Jane");
        assert_eq!(updated["created_at"], found["created_at"]);

        let deleted = send(&app, Method::POST, &format!("/member/deleteByID?id={}", id), None).await;
        assert_eq!(deleted.status(), StatusCode::OK);
        assert!(json_of(deleted).await["deleted_at"].is_string());

        let gone = send(&app, Method::GET, &format!("/member/findByID?id={}", id), None).await;
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_of(gone).await["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email() {
        let response = send(
            &app(),
            Method::POST,
            "/member/register",
            Some(json!({"first_name": "John", "last_name": "Doe", "email": "not-an-email"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_of(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["errors"][0]["field"], "email");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        let response = send(&app(), Method::GET, "/gathering/findByID?id=abc", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_of(response).await;
        assert_eq!(body["code"], "BAD_REQUEST");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_update_of_unknown_gathering_is_not_found() {
        let response = send(
            &app(),
            Method::POST,
            "/gathering/update",
            Some(json!({"id": 999, "creator": 1, "name": "x", "location": "y", "type": 2})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invitation_flow() {
        let app = app();
        let member = register_john(&app).await;
        let gathering = create_meetup(&app, member).await;

        let invited = send(
            &app,
            Method::POST,
            "/invitation/invite",
            Some(json!({"member_id": member, "gathering_id": gathering, "status": 2})),
        )
        .await;
        assert_eq!(invited.status(), StatusCode::CREATED);
        let invitation = json_of(invited).await;
        assert_eq!(invitation["status"], 2);
        let invitation_id = invitation["id"].as_i64().unwrap();

        let attendees = send(
            &app,
            Method::GET,
            &format!("/gathering/attendees?id={}", gathering),
            None,
        )
        .await;
        assert_eq!(attendees.status(), StatusCode::OK);
        let attendees = json_of(attendees).await;
        assert_eq!(attendees.as_array().unwrap().len(), 1);
        assert_eq!(attendees[0]["member_id"], member);

        let deleted = send(
            &app,
            Method::POST,
            &format!("/invitation/deleteByID?id={}", invitation_id),
            None,
        )
        .await;
        assert_eq!(deleted.status(), StatusCode::OK);

        let attendances = send(
            &app,
            Method::GET,
            &format!("/member/attendances?id={}", member),
            None,
        )
        .await;
        assert_eq!(json_of(attendances).await, json!([]));
    }

    #[tokio::test]
    async fn test_delete_of_moved_invitation_is_ok() {
        let app = app();
        let member = register_john(&app).await;
        let first = create_meetup(&app, member).await;
        let second = create_meetup(&app, member).await;

        let invited = send(
            &app,
            Method::POST,
            "/invitation/invite",
            Some(json!({"member_id": member, "gathering_id": first, "status": 1})),
        )
        .await;
        let invitation_id = json_of(invited).await["id"].as_i64().unwrap();

        let moved = send(
            &app,
            Method::POST,
            "/invitation/update",
            Some(json!({"id": invitation_id, "member_id": member, "gathering_id": second, "status": 2})),
        )
        .await;
        assert_eq!(moved.status(), StatusCode::OK);

        let deleted = send(
            &app,
            Method::POST,
            &format!("/invitation/deleteByID?id={}", invitation_id),
            None,
        )
        .await;
        assert_eq!(deleted.status(), StatusCode::OK);
        let deleted = json_of(deleted).await;
        assert_eq!(deleted["gathering_id"], second);
        assert!(deleted["deleted_at"].is_string());
    }

    #[tokio::test]
    async fn test_invite_unknown_member_is_not_found() {
        let app = app();
        let gathering = create_meetup(&app, 1).await;

        let response = send(
            &app,
            Method::POST,
            "/invitation/invite",
            Some(json!({"member_id": 999, "gathering_id": gathering, "status": 1})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_of(response).await;
        assert_eq!(body["details"]["entity"], "member");
    }

    #[tokio::test]
    async fn test_unknown_route_has_error_body() {
        let response = send(&app(), Method::GET, "/member/findAll", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_of(response).await["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_health_and_openapi_are_served() {
        let app = app();

        let health = send(&app, Method::GET, "/health", None).await;
        assert_eq!(health.status(), StatusCode::OK);
        assert_eq!(json_of(health).await["status"], "healthy");

        let openapi = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
        assert_eq!(openapi.status(), StatusCode::OK);
        let openapi = json_of(openapi).await;
        assert!(openapi["paths"]["/invitation/invite"]["post"].is_object());
        assert!(openapi["paths"]["/member/findByID"]["get"].is_object());
    }

    #[tokio::test]
    async fn test_response_echoes_request_id() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }
}
