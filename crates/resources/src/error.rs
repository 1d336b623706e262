use {reqwest::Method, spindle_schema::FieldError, thiserror::Error};

/// Transport-level failure of a backend call, or a malformed path template.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to build HTTP client: {source}")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {path} failed: {source}")]
    Request {
        method: Method,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {path} returned HTTP {status}: {body}")]
    Status {
        method: Method,
        path: String,
        status: u16,
        body: String,
    },

    #[error("{method} {path} returned a malformed body: {source}")]
    Decode {
        method: Method,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid resource url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid path template `{template}`: {reason}")]
    Template { template: String, reason: String },
}

impl Error {
    #[must_use]
    pub fn status(
        method: Method,
        path: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        Self::Status {
            method,
            path: path.into(),
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Template {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// HTTP status of the failed call, when the backend answered at all.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<Error> for FieldError {
    fn from(err: Error) -> Self {
        FieldError::other(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
