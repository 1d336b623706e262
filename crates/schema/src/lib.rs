//! Schema layer of the spindle gateway.
//!
//! A [`Registry`] holds named [`ObjectType`]s. Each type lists its
//! [`FieldDefinition`]s through a closure that runs on first access, so types
//! can point at each other (Company → User → Company) without any declaration
//! order. Fields reference other types by name only.
//!
//! A field either has no resolver, in which case the executor reads the value
//! straight off the parent record, or carries exactly one [`Resolver`] that
//! computes it, usually by calling a backend service.
//!
//! Registries are immutable once built and are meant to be shared behind an
//! `Arc` by every request in the process.

pub mod error;
pub mod registry;
pub mod resolver;
pub mod sdl;
pub mod types;

pub use {
    error::{Result, SchemaError},
    registry::{ObjectType, Registry, RegistryBuilder},
    resolver::{Arguments, FieldError, FieldResult, ResolveContext, Resolver, resolver_fn},
    types::{ArgumentDefinition, FieldDefinition, ScalarType, TypeRef},
};
