//! Quillpost: blogging backend exposing Users, Posts, and Products over
//! GraphQL and REST, backed by PostgreSQL.

pub mod error;
pub mod graphql;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use error::AppError;
pub use graphql::{build_schema, AppSchema};
pub use migration::apply_migrations;
pub use routes::{common_routes, graphql_routes, user_routes};
pub use service::{PostService, UserService};
pub use state::AppState;
pub use store::ensure_database_exists;
