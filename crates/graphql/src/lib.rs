//! The company directory schema.
//!
//! Declares the `Company` and `User` object types, the `Query` and `Mutation`
//! roots and the backend paths each relational field reads from. Everything
//! resolves through a [`spindle_resources::ResourceClient`], so the schema can
//! be pointed at the real REST backend or at an in-memory double.
//!
//! The gateway crate serves the schema over HTTP; this crate only defines it.

pub mod error;
pub mod mutations;
pub mod queries;
pub mod schema;
pub mod types;

pub use {
    error::{Error, Result},
    schema::build_schema,
};
