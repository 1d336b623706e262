use std::sync::Arc;

use {
    spindle_config::SpindleConfig,
    spindle_execution::{Executor, ExecutorOptions},
    spindle_graphql::build_schema,
    spindle_resources::HttpResourceClient,
};

/// Everything a request handler needs; shared immutably by all connections.
pub struct GatewayState {
    pub executor: Executor,
    pub graphiql: bool,
    pub version: &'static str,
}

impl GatewayState {
    #[must_use]
    pub fn new(executor: Executor, graphiql: bool) -> Arc<Self> {
        Arc::new(Self {
            executor,
            graphiql,
            version: env!("CARGO_PKG_VERSION"),
        })
    }

    /// Build the executor for `config` and wrap it.
    pub fn from_config(config: &SpindleConfig) -> anyhow::Result<Arc<Self>> {
        Ok(Self::new(build_executor(config)?, config.graphql.graphiql))
    }
}

/// HTTP backend client, schema and executor wired from configuration.
pub fn build_executor(config: &SpindleConfig) -> anyhow::Result<Executor> {
    let client = HttpResourceClient::new(&config.backend.base_url, config.backend.timeout())?;
    let registry = build_schema(Arc::new(client))?;
    Ok(Executor::new(registry).with_options(ExecutorOptions {
        max_depth: config.graphql.max_depth,
    }))
}
