//! GraphQL schema builder for the back-office API.

pub mod resolvers;

pub use resolvers::{MutationRoot, QueryRoot, User};

use crate::registry::ModelRegistry;
use async_graphql::{EmptySubscription, Schema};
use std::sync::Arc;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema with the model registry injected as context data, so
/// every resolver reaches the store through the registry's connection entry.
pub fn build_schema(registry: Arc<ModelRegistry>) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(registry)
        .finish()
}

/// Exports the schema in SDL form, for clients and schema tooling.
pub fn export_sdl(registry: Arc<ModelRegistry>) -> String {
    build_schema(registry).sdl()
}
