use thiserror::Error;

/// Invalid type or field registration. Raised while building a registry and
/// never at request time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("type `{name}` is defined more than once")]
    DuplicateType { name: String },

    #[error("field `{type_name}.{field}` is defined more than once")]
    DuplicateField { type_name: String, field: String },

    #[error("field `{type_name}.{field}` references unknown type `{target}`")]
    UnknownType {
        type_name: String,
        field: String,
        target: String,
    },

    #[error("{kind} root type `{name}` is not registered")]
    MissingRoot { kind: &'static str, name: String },

    #[error("no query root type configured")]
    NoQueryRoot,
}

impl SchemaError {
    #[must_use]
    pub fn duplicate_type(name: impl Into<String>) -> Self {
        Self::DuplicateType { name: name.into() }
    }

    #[must_use]
    pub fn duplicate_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::DuplicateField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    #[must_use]
    pub fn unknown_type(
        type_name: impl Into<String>,
        field: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            field: field.into(),
            target: target.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
