//! Post CRUD and the publish/view-count state transitions.

use crate::error::AppError;
use crate::model::{Post, PostDraft};
use crate::service::UserService;
use sqlx::PgPool;
use uuid::Uuid;

const POST_COLUMNS: &str =
    "id, created_at, updated_at, title, content, published, view_count, author_id";

pub struct PostService;

impl PostService {
    /// List all posts, unfiltered and unpaginated.
    pub async fn list(pool: &PgPool) -> Result<Vec<Post>, AppError> {
        tracing::debug!("list posts");
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts ORDER BY created_at",
            POST_COLUMNS
        ))
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<Post>, AppError> {
        tracing::debug!(%id, "find post");
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts WHERE id = $1",
            POST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(post)
    }

    /// All posts of one author, published or not.
    pub async fn by_author(pool: &PgPool, author_id: Uuid) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts WHERE author_id = $1 ORDER BY created_at",
            POST_COLUMNS
        ))
        .bind(author_id)
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    /// Batch-load posts for a set of authors in one query.
    pub async fn by_authors(pool: &PgPool, author_ids: &[Uuid]) -> Result<Vec<Post>, AppError> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts WHERE author_id = ANY($1) ORDER BY created_at",
            POST_COLUMNS
        ))
        .bind(author_ids)
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    /// Published posts of one user. NotFound if the user id itself has no
    /// row, so a missing user is distinguishable from a user with no
    /// published posts.
    pub async fn published_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Post>, AppError> {
        if !UserService::exists(pool, user_id).await? {
            return Err(AppError::NotFound(format!("user {}", user_id)));
        }
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts WHERE author_id = $1 AND published ORDER BY created_at",
            POST_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    /// Insert one post connected to an existing author. NotFound if the
    /// author id has no row.
    pub async fn create(
        pool: &PgPool,
        draft: &PostDraft,
        author_id: Uuid,
    ) -> Result<Post, AppError> {
        if !UserService::exists(pool, author_id).await? {
            return Err(AppError::NotFound(format!("user {}", author_id)));
        }
        tracing::debug!(%author_id, title = %draft.title, "create post");
        let post = sqlx::query_as::<_, Post>(&format!(
            "INSERT INTO posts (title, content, author_id) VALUES ($1, $2, $3) RETURNING {}",
            POST_COLUMNS
        ))
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(author_id)
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    /// Flip `published` in a single statement; applying it twice restores
    /// the original value. Returns None if the id has no matching row.
    pub async fn toggle_publish(pool: &PgPool, id: Uuid) -> Result<Option<Post>, AppError> {
        tracing::debug!(%id, "toggle publish");
        let post = sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET published = NOT published, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            POST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(post)
    }

    /// Atomically add 1 to view_count; no read-modify-write, so concurrent
    /// increments never lose updates.
    pub async fn increment_view_count(pool: &PgPool, id: Uuid) -> Result<Option<Post>, AppError> {
        tracing::debug!(%id, "increment view count");
        let post = sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET view_count = view_count + 1, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            POST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(post)
    }

    /// Delete one post. Returns the deleted row or None.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<Post>, AppError> {
        tracing::debug!(%id, "delete post");
        let post = sqlx::query_as::<_, Post>(&format!(
            "DELETE FROM posts WHERE id = $1 RETURNING {}",
            POST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(post)
    }
}
