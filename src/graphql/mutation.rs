//! Mutation root. Post mutations that can miss return the tagged
//! `PostPayload` union instead of a GraphQL error.

use crate::graphql::types::{parse_id, PostCreateInput, PostPayload, UserCreateInput};
use crate::model::{Post, PostDraft, User};
use crate::service::{PostService, UserService};
use async_graphql::{Context, ErrorExtensions, Object, Result, ID};
use sqlx::PgPool;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a user and any nested posts in one transaction. Duplicate
    /// email surfaces as a `conflict` error.
    async fn create_user(&self, ctx: &Context<'_>, data: UserCreateInput) -> Result<User> {
        let pool = ctx.data::<PgPool>()?;
        let drafts: Vec<PostDraft> = data
            .posts
            .unwrap_or_default()
            .into_iter()
            .map(PostDraft::from)
            .collect();
        UserService::create_with_posts(pool, &data.email, data.name.as_deref(), &drafts)
            .await
            .map_err(|e| e.extend())
    }

    /// Create a post connected to an existing author; `not_found` error
    /// when the author id has no row.
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        data: PostCreateInput,
        author_id: ID,
    ) -> Result<Post> {
        let pool = ctx.data::<PgPool>()?;
        let author_id = parse_id(&author_id)?;
        PostService::create(pool, &data.into(), author_id)
            .await
            .map_err(|e| e.extend())
    }

    async fn toggle_publish_post(&self, ctx: &Context<'_>, id: ID) -> Result<PostPayload> {
        let pool = ctx.data::<PgPool>()?;
        let post = PostService::toggle_publish(pool, parse_id(&id)?)
            .await
            .map_err(|e| e.extend())?;
        Ok(PostPayload::from_option(post, &id))
    }

    async fn increment_post_view_count(&self, ctx: &Context<'_>, id: ID) -> Result<PostPayload> {
        let pool = ctx.data::<PgPool>()?;
        let post = PostService::increment_view_count(pool, parse_id(&id)?)
            .await
            .map_err(|e| e.extend())?;
        Ok(PostPayload::from_option(post, &id))
    }

    /// Remove a post, returning the deleted row.
    async fn delete_post(&self, ctx: &Context<'_>, id: ID) -> Result<PostPayload> {
        let pool = ctx.data::<PgPool>()?;
        let post = PostService::delete(pool, parse_id(&id)?)
            .await
            .map_err(|e| e.extend())?;
        Ok(PostPayload::from_option(post, &id))
    }
}
