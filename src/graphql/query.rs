//! Query root: read-only pass-throughs to the services.

use crate::graphql::types::{parse_id, UserUniqueInput};
use crate::model::{Post, User};
use crate::service::{PostService, UserService};
use async_graphql::{Context, ErrorExtensions, Object, Result, ID};
use sqlx::PgPool;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All users, unfiltered and unpaginated.
    async fn all_users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let pool = ctx.data::<PgPool>()?;
        UserService::list(pool).await.map_err(|e| e.extend())
    }

    /// All posts, unfiltered and unpaginated.
    async fn all_posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let pool = ctx.data::<PgPool>()?;
        PostService::list(pool).await.map_err(|e| e.extend())
    }

    /// One post by id, or null when absent.
    async fn post_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Post>> {
        let pool = ctx.data::<PgPool>()?;
        let id = parse_id(&id)?;
        PostService::find(pool, id).await.map_err(|e| e.extend())
    }

    /// Published posts of one user; errors with `not_found` when the user
    /// id has no row.
    async fn posts_published_by_user(
        &self,
        ctx: &Context<'_>,
        user_unique_input: UserUniqueInput,
    ) -> Result<Vec<Post>> {
        let pool = ctx.data::<PgPool>()?;
        let user_id = parse_id(&user_unique_input.id)?;
        PostService::published_by_user(pool, user_id)
            .await
            .map_err(|e| e.extend())
    }
}
