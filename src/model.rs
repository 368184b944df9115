//! Typed entities and input shapes shared by the REST and GraphQL layers.

use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow, SimpleObject)]
#[graphql(complex)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct Post {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub view_count: i32,
    #[graphql(skip)]
    pub author_id: Option<Uuid>,
}

/// Declared in the schema and migrated, but wired to no query or mutation.
#[derive(Debug, Clone, Serialize, FromRow, SimpleObject)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: i32,
}

/// A user together with their posts, for the REST list endpoint.
#[derive(Debug, Serialize)]
pub struct UserWithPosts {
    #[serde(flatten)]
    pub user: User,
    pub posts: Vec<Post>,
}

/// Post fields supplied by a caller; no validation beyond nullability.
#[derive(Debug, Clone, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
}

/// Partial update restricted to an explicit field whitelist. Unknown
/// body fields are rejected rather than written through to the store.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_update_rejects_unknown_fields() {
        let res: Result<UserUpdate, _> = serde_json::from_str(r#"{"role":"admin"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn user_update_accepts_partial_body() {
        let upd: UserUpdate = serde_json::from_str(r#"{"name":"X"}"#).unwrap();
        assert_eq!(upd.name.as_deref(), Some("X"));
        assert!(upd.email.is_none());
        assert!(!upd.is_empty());
    }
}
