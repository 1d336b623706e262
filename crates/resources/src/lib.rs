//! Backend access for spindle.
//!
//! [`ResourceClient`] is the seam between field resolution and the REST
//! services that own the data: one network round-trip per call, no retries,
//! no batching. [`HttpResourceClient`] is the `reqwest` implementation.
//!
//! [`ResourcePath`] templates (`/companies/{{value.companyId}}/users`) turn a
//! parent record and field arguments into a concrete path, and the resolvers
//! in [`resolvers`] glue the two together so schema fields can be declared
//! against backend collections directly.

pub mod client;
pub mod error;
pub mod path;
pub mod resolvers;

pub use {
    client::{HttpResourceClient, ResourceClient},
    error::{Error, Result},
    path::ResourcePath,
    resolvers::{CreateResolver, DeleteResolver, FetchResolver},
};
