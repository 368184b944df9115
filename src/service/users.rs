//! User CRUD against PostgreSQL.

use crate::error::AppError;
use crate::model::{PostDraft, User, UserUpdate, UserWithPosts};
use crate::service::PostService;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

pub struct UserService;

impl UserService {
    /// List all users, unfiltered and unpaginated.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, AppError> {
        tracing::debug!("list users");
        let users = sqlx::query_as::<_, User>("SELECT id, email, name FROM users ORDER BY email")
            .fetch_all(pool)
            .await?;
        Ok(users)
    }

    /// List all users with their posts batch-loaded in a second query.
    pub async fn list_with_posts(pool: &PgPool) -> Result<Vec<UserWithPosts>, AppError> {
        let users = Self::list(pool).await?;
        let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
        let mut by_author: HashMap<Uuid, Vec<_>> = HashMap::new();
        for post in PostService::by_authors(pool, &ids).await? {
            if let Some(author_id) = post.author_id {
                by_author.entry(author_id).or_default().push(post);
            }
        }
        Ok(users
            .into_iter()
            .map(|user| {
                let posts = by_author.remove(&user.id).unwrap_or_default();
                UserWithPosts { user, posts }
            })
            .collect())
    }

    pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
        tracing::debug!(%id, "find user");
        let user = sqlx::query_as::<_, User>("SELECT id, email, name FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn exists(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Insert one user. Duplicate email surfaces as `AppError::Conflict`.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        name: Option<&str>,
    ) -> Result<User, AppError> {
        tracing::debug!(email, "create user");
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, name) VALUES ($1, $2) RETURNING id, email, name",
        )
        .bind(email)
        .bind(name)
        .fetch_one(pool)
        .await?;
        Ok(user)
    }

    /// Insert a user and any nested post drafts in one transaction, so a
    /// failure on any post rolls the whole create back.
    pub async fn create_with_posts(
        pool: &PgPool,
        email: &str,
        name: Option<&str>,
        drafts: &[PostDraft],
    ) -> Result<User, AppError> {
        tracing::debug!(email, posts = drafts.len(), "create user with posts");
        let mut tx = pool.begin().await?;
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, name) VALUES ($1, $2) RETURNING id, email, name",
        )
        .bind(email)
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;
        for draft in drafts {
            sqlx::query("INSERT INTO posts (title, content, author_id) VALUES ($1, $2, $3)")
                .bind(&draft.title)
                .bind(&draft.content)
                .bind(user.id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(user)
    }

    /// Partial update limited to the whitelisted fields in `UserUpdate`;
    /// omitted fields keep their stored values. Returns None if the id has
    /// no matching row.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        update: &UserUpdate,
    ) -> Result<Option<User>, AppError> {
        if update.is_empty() {
            return Err(AppError::BadRequest("no updatable fields in body".into()));
        }
        tracing::debug!(%id, "update user");
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = COALESCE($2, email),
                name = COALESCE($3, name)
            WHERE id = $1
            RETURNING id, email, name
            "#,
        )
        .bind(id)
        .bind(&update.email)
        .bind(&update.name)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }

    /// Delete one user. Their posts survive with author set to null
    /// (ON DELETE SET NULL). Returns the deleted row or None.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
        tracing::debug!(%id, "delete user");
        let user = sqlx::query_as::<_, User>(
            "DELETE FROM users WHERE id = $1 RETURNING id, email, name",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }
}
