//! Shared application state for all routes. The pool is the only shared
//! resource; it is cloned into each handler rather than held globally.

use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}
