use crate::graphql::AppSchema;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Html,
    routing::get,
};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

/// Upper bound on any single request, resolvers included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AtriumState {
    pub schema: AppSchema,
}

impl AtriumState {
    pub fn new(schema: AppSchema) -> Self {
        Self { schema }
    }
}

async fn graphql_handler(
    State(state): State<AtriumState>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// Interactive playground, served on GET for development use.
async fn playground_handler() -> Html<String> {
    Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

pub fn atrium_router(state: AtriumState) -> Router {
    Router::new()
        .route("/graphql", get(playground_handler).post(graphql_handler))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .fallback(not_found_handler)
        .with_state(state)
}
