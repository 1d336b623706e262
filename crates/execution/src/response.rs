use {
    serde::{Deserialize, Serialize},
    serde_json::Value,
};

use crate::error::{PathSegment, ServerError};

/// Result of one operation. `data` is always present in the serialized form
/// (null when the request was rejected); `errors` only when non-empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ServerError>,
}

impl Response {
    #[must_use]
    pub fn new(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// A rejected request: no data, only errors.
    #[must_use]
    pub fn from_errors(errors: Vec<ServerError>) -> Self {
        Self { data: None, errors }
    }

    #[must_use]
    pub fn with_errors(mut self, errors: Vec<ServerError>) -> Self {
        self.errors = errors;
        self
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Look up a value in `data` by response path.
    #[must_use]
    pub fn get(&self, path: &[PathSegment]) -> Option<&Value> {
        path.iter()
            .try_fold(self.data.as_ref()?, |value, segment| match segment {
                PathSegment::Key(key) => value.get(key),
                PathSegment::Index(idx) => value.get(*idx),
            })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use {super::*, serde_json::json};

    #[test]
    fn rejected_response_keeps_null_data() {
        let response = Response::from_errors(vec![ServerError::new("nope", Vec::new())]);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"data": null, "errors": [{"message": "nope"}]})
        );
        assert!(!response.is_ok());
    }

    #[test]
    fn successful_response_omits_errors() {
        let response = Response::new(json!({"company": {"users": [{"firstName": "Ann"}]}}));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"data": {"company": {"users": [{"firstName": "Ann"}]}}})
        );
        assert_eq!(
            response.get(&["company".into(), "users".into(), 0.into(), "firstName".into()]),
            Some(&json!("Ann"))
        );
        assert_eq!(response.get(&["user".into()]), None);
    }
}
