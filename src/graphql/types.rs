//! GraphQL-only shapes: relation fields, input objects, and the tagged
//! mutation payload.

use crate::error::AppError;
use crate::model::{Post, PostDraft, User};
use crate::service::{PostService, UserService};
use async_graphql::{ComplexObject, Context, ErrorExtensions, InputObject, Result, SimpleObject, Union, ID};
use sqlx::PgPool;
use uuid::Uuid;

pub(crate) fn parse_id(id: &ID) -> Result<Uuid> {
    Uuid::parse_str(id.as_str())
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id.as_str())).extend())
}

#[ComplexObject]
impl User {
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let pool = ctx.data::<PgPool>()?;
        PostService::by_author(pool, self.id)
            .await
            .map_err(|e| e.extend())
    }
}

#[ComplexObject]
impl Post {
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let Some(author_id) = self.author_id else {
            return Ok(None);
        };
        let pool = ctx.data::<PgPool>()?;
        UserService::find(pool, author_id)
            .await
            .map_err(|e| e.extend())
    }
}

#[derive(InputObject)]
pub struct PostCreateInput {
    pub title: String,
    pub content: Option<String>,
}

impl From<PostCreateInput> for PostDraft {
    fn from(input: PostCreateInput) -> Self {
        PostDraft {
            title: input.title,
            content: input.content,
        }
    }
}

#[derive(InputObject)]
pub struct UserCreateInput {
    pub email: String,
    pub name: Option<String>,
    pub posts: Option<Vec<PostCreateInput>>,
}

#[derive(InputObject)]
pub struct UserUniqueInput {
    pub id: ID,
}

#[derive(SimpleObject)]
pub struct PostNotFound {
    pub message: String,
}

/// Tagged result for post mutations, replacing ad-hoc error shapes with
/// an explicit schema-level alternative.
#[derive(Union)]
pub enum PostPayload {
    Post(Post),
    NotFound(PostNotFound),
}

impl PostPayload {
    pub fn from_option(post: Option<Post>, id: &ID) -> Self {
        match post {
            Some(post) => PostPayload::Post(post),
            None => PostPayload::NotFound(PostNotFound {
                message: format!("post {} not found", id.as_str()),
            }),
        }
    }
}
