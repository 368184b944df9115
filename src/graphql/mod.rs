//! GraphQL schema assembly.

mod mutation;
mod query;
pub mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

use crate::model::Product;
use async_graphql::{EmptySubscription, Schema};
use sqlx::PgPool;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the pool injected as context data. Product is
/// registered explicitly: it is part of the schema but referenced by no
/// query or mutation.
pub fn build_schema(pool: PgPool) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .register_output_type::<Product>()
        .data(pool)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> AppSchema {
        // connect_lazy never touches the network, so SDL inspection works
        // without a database.
        let pool = PgPool::connect_lazy("postgres://localhost/quillpost_test").unwrap();
        build_schema(pool)
    }

    #[tokio::test]
    async fn sdl_exposes_query_surface() {
        let sdl = schema().sdl();
        for op in [
            "allUsers",
            "allPosts",
            "postById",
            "postsPublishedByUser",
        ] {
            assert!(sdl.contains(op), "missing query {}", op);
        }
        assert!(sdl.contains("userUniqueInput: UserUniqueInput!"));
    }

    #[tokio::test]
    async fn sdl_exposes_mutation_surface() {
        let sdl = schema().sdl();
        for op in [
            "createUser",
            "createPost",
            "togglePublishPost",
            "incrementPostViewCount",
            "deletePost",
        ] {
            assert!(sdl.contains(op), "missing mutation {}", op);
        }
    }

    #[tokio::test]
    async fn post_mutations_return_tagged_payload() {
        let sdl = schema().sdl();
        assert!(sdl.contains("union PostPayload"));
        assert!(sdl.contains("togglePublishPost(id: ID!): PostPayload!"));
        assert!(sdl.contains("deletePost(id: ID!): PostPayload!"));
    }

    #[tokio::test]
    async fn product_is_registered_despite_no_operations() {
        let sdl = schema().sdl();
        assert!(sdl.contains("type Product"));
    }

    #[tokio::test]
    async fn post_exposes_relation_not_raw_fk() {
        let sdl = schema().sdl();
        assert!(sdl.contains("author: User"));
        assert!(sdl.contains("viewCount: Int!"));
        // the raw foreign key stays off the Post type
        let post_block = sdl
            .split("type Post ")
            .nth(1)
            .and_then(|rest| rest.split('}').next())
            .unwrap();
        assert!(!post_block.contains("authorId"));
    }
}
