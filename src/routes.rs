//! Router assembly: user REST routes, GraphQL routes, and common
//! health/ready/version routes.

use crate::graphql::AppSchema;
use crate::handlers;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(handlers::users::list).post(handlers::users::create))
        .route(
            "/users/:id",
            axum::routing::put(handlers::users::update).delete(handlers::users::delete),
        )
        .with_state(state)
}

pub fn graphql_routes(schema: AppSchema) -> Router {
    Router::new()
        .route(
            "/graphql",
            get(handlers::graphql::graphiql).post(handlers::graphql::execute),
        )
        .with_state(schema)
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadyBody>, (axum::http::StatusCode, Json<ReadyBody>)> {
    if sqlx::query("SELECT 1").fetch_optional(&state.pool).await.is_err() {
        return Err((
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: Some("unavailable"),
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: Some("ok"),
    }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health, GET /ready (runs SELECT 1), GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sqlx::PgPool;
    use tower::ServiceExt;

    fn lazy_state() -> AppState {
        AppState {
            pool: PgPool::connect_lazy("postgres://localhost/quillpost_test").unwrap(),
        }
    }

    #[tokio::test]
    async fn health_responds_without_database() {
        let app = common_routes(lazy_state());
        let res = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn put_with_invalid_id_is_bad_request() {
        let app = user_routes(lazy_state());
        let res = app
            .oneshot(
                Request::put("/users/not-a-uuid")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"X"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn put_with_unknown_field_is_rejected() {
        let app = user_routes(lazy_state());
        let res = app
            .oneshot(
                Request::put("/users/5f3a0a37-98b1-4c1e-9fbb-2a8f0c1f9d4e")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"role":"admin"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        // serde deny_unknown_fields makes axum's Json extractor reject this
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn graphiql_is_served() {
        let pool = PgPool::connect_lazy("postgres://localhost/quillpost_test").unwrap();
        let app = graphql_routes(crate::graphql::build_schema(pool));
        let res = app
            .oneshot(Request::get("/graphql").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
