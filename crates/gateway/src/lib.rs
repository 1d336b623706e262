//! HTTP gateway for spindle.
//!
//! Serves the directory schema at `/graphql` (queries and mutations on POST,
//! GraphiQL on GET) and a liveness probe at `/health`.

pub mod graphql_routes;
pub mod server;
pub mod state;

pub use {
    server::{build_gateway_app, start_gateway},
    state::{GatewayState, build_executor},
};
