//! Server binary: creates the pool, applies migrations, mounts the REST,
//! GraphQL, and common routes.

use axum::Router;
use quillpost::{
    apply_migrations, build_schema, common_routes, ensure_database_exists, graphql_routes,
    user_routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("quillpost=info".parse()?))
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/quillpost".into());
    ensure_database_exists(&database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;
    apply_migrations(&pool).await?;

    let state = AppState { pool: pool.clone() };
    let schema = build_schema(pool);

    let app = Router::new()
        .merge(common_routes(state.clone()))
        .merge(user_routes(state))
        .merge(graphql_routes(schema))
        .layer(TraceLayer::new_for_http());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
