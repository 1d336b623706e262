use std::fmt;

use {
    serde::{Deserialize, Serialize},
    spindle_schema::ScalarType,
    thiserror::Error,
};

/// A request that cannot be executed. Detected before any resolver runs, so a
/// rejected request has no side effects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("syntax error: {message}")]
    Syntax { message: String },

    #[error("unknown operation named `{name}`")]
    UnknownOperation { name: String },

    #[error("document contains several operations; an operation name is required")]
    OperationNameRequired,

    #[error("{kind} operations are not supported")]
    UnsupportedOperation { kind: String },

    #[error("schema does not support mutations")]
    NoMutationType,

    #[error("unknown fragment `{name}`")]
    UnknownFragment { name: String },

    #[error("fragment `{name}` spreads itself")]
    FragmentCycle { name: String },

    #[error("variable `${name}` is not defined")]
    UnknownVariable { name: String },

    #[error("invalid value for variable `${name}`: {message}")]
    InvalidVariable { name: String, message: String },

    #[error("cannot query field `{field}` on type `{type_name}`")]
    UnknownField { type_name: String, field: String },

    #[error("unknown argument `{argument}` on field `{type_name}.{field}`")]
    UnknownArgument {
        type_name: String,
        field: String,
        argument: String,
    },

    #[error("field `{type_name}.{field}` argument `{argument}` of type `{ty}!` is required")]
    MissingArgument {
        type_name: String,
        field: String,
        argument: String,
        ty: ScalarType,
    },

    #[error("field `{type_name}.{field}` argument `{argument}` expects type `{ty}`")]
    InvalidArgument {
        type_name: String,
        field: String,
        argument: String,
        ty: ScalarType,
    },

    #[error("field `{field}` of type `{ty}` must not have a selection set")]
    SelectionOnScalar { field: String, ty: String },

    #[error("field `{field}` of type `{ty}` must have a selection set")]
    MissingSelection { field: String, ty: String },

    #[error("fields `{first}` and `{second}` both use the response key `{key}`")]
    ConflictingKey {
        key: String,
        first: String,
        second: String,
    },

    #[error("query exceeds the maximum depth of {max}")]
    TooDeep { max: usize },
}

impl ValidationError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Syntax { .. } => "GRAPHQL_PARSE_FAILED",
            _ => "GRAPHQL_VALIDATION_FAILED",
        }
    }
}

/// One element of a response path: an object key or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(idx) => write!(f, "{idx}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        Self::Index(idx)
    }
}

/// Render a path as `company.users.0.name`.
#[must_use]
pub fn display_path(path: &[PathSegment]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorExtensions {
    pub code: String,
}

/// An entry of the response `errors` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ErrorExtensions>,
}

impl ServerError {
    #[must_use]
    pub fn new(message: impl Into<String>, path: Vec<PathSegment>) -> Self {
        Self {
            message: message.into(),
            path,
            extensions: None,
        }
    }

    #[must_use]
    pub fn validation(err: &ValidationError, path: Vec<PathSegment>) -> Self {
        Self {
            message: err.to_string(),
            path,
            extensions: Some(ErrorExtensions {
                code: err.code().to_string(),
            }),
        }
    }

    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.extensions.as_ref().map(|ext| ext.code.as_str())
    }
}

impl From<ValidationError> for ServerError {
    fn from(err: ValidationError) -> Self {
        Self::validation(&err, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use {super::*, serde_json::json};

    #[test]
    fn serializes_like_graphql_errors() {
        let err = ServerError::new(
            "boom",
            vec!["company".into(), "users".into(), 1.into(), "company".into()],
        );
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"message": "boom", "path": ["company", "users", 1, "company"]})
        );
        assert_eq!(display_path(&err.path), "company.users.1.company");
    }

    #[test]
    fn validation_errors_carry_a_code() {
        let err = ServerError::from(ValidationError::NoMutationType);
        assert_eq!(err.code(), Some("GRAPHQL_VALIDATION_FAILED"));
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "message": "schema does not support mutations",
                "extensions": {"code": "GRAPHQL_VALIDATION_FAILED"}
            })
        );
    }
}
