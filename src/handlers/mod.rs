//! HTTP handlers for the user REST resource and the GraphQL endpoint.

pub mod graphql;
pub mod users;
