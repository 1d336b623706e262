//! Schema construction.

use std::sync::Arc;

use {
    spindle_resources::ResourceClient,
    spindle_schema::Registry,
};

use crate::{
    error::Result,
    mutations::{self, MUTATION},
    queries::{self, QUERY},
    types,
};

/// Build the registry with every field resolving through `client`.
///
/// The registry is immutable once built; share the returned `Arc` across
/// requests and executors.
pub fn build_schema(client: Arc<dyn ResourceClient>) -> Result<Arc<Registry>> {
    let registry = Registry::builder()
        .register(queries::query_root(&client)?)
        .register(mutations::mutation_root(&client)?)
        .register(types::company(&client)?)
        .register(types::user(&client)?)
        .query(QUERY)
        .mutation(MUTATION)
        .build()?;
    Ok(Arc::new(registry))
}
