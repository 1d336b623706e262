//! GraphQL HTTP handlers: GraphiQL on GET `/graphql`, query and mutation
//! execution on POST `/graphql`.

use std::sync::Arc;

use {
    async_graphql::http::GraphiQLSource,
    axum::{
        Json,
        extract::State,
        http::StatusCode,
        response::{Html, IntoResponse, Response},
    },
    spindle_execution::GraphQLRequest,
};

use crate::state::GatewayState;

/// Serve the GraphiQL explorer, unless it is disabled in the config.
pub async fn graphql_get_handler(State(state): State<Arc<GatewayState>>) -> Response {
    if !state.graphiql {
        return graphiql_disabled_response();
    }
    graphiql_response()
}

/// Execute a query or mutation.
///
/// Always answers 200 with a GraphQL response body; request and field
/// failures are reported in its `errors` list.
pub async fn graphql_handler(
    State(state): State<Arc<GatewayState>>,
    Json(request): Json<GraphQLRequest>,
) -> Response {
    Json(state.executor.execute_graphql(&request).await).into_response()
}

fn graphiql_response() -> Response {
    Html(GraphiQLSource::build().endpoint("/graphql").finish()).into_response()
}

fn graphiql_disabled_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "graphiql is disabled" })),
    )
        .into_response()
}
