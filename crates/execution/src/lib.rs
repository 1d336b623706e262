//! Query validation and execution for spindle.
//!
//! A [`Request`] (built directly, or parsed from GraphQL text with
//! [`Request::parse`]) is validated against a [`spindle_schema::Registry`] and
//! then resolved by the [`Executor`]: sibling fields and list elements run
//! concurrently, mutation root fields run one after another, and every field
//! failure is reported at its response path without discarding the rest of
//! the result.

pub mod error;
pub mod executor;
mod parse;
pub mod request;
pub mod response;
pub mod validate;

pub use {
    error::{ErrorExtensions, PathSegment, ServerError, ValidationError, display_path},
    executor::{DEFAULT_MAX_DEPTH, Executor, ExecutorOptions},
    request::{Field, GraphQLRequest, OperationType, Request},
    response::Response,
    validate::validate,
};
