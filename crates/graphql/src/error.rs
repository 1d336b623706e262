//! Errors raised while assembling the schema.

use {spindle_schema::SchemaError, thiserror::Error};

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Resource(#[from] spindle_resources::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
