use {
    serde::{Deserialize, Serialize},
    serde_json::{Map, Value},
    spindle_schema::Arguments,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    #[default]
    Query,
    Mutation,
}

impl OperationType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

/// One requested field: its schema name, optional alias, constant arguments
/// and nested selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub arguments: Arguments,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selection_set: Vec<Field>,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn select(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.selection_set.extend(fields);
        self
    }

    /// Key under which the field appears in the response.
    #[must_use]
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// A structured operation with every argument already bound to a constant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default)]
    pub operation: OperationType,
    pub selection_set: Vec<Field>,
}

impl Request {
    #[must_use]
    pub fn query(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            operation: OperationType::Query,
            selection_set: fields.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn mutation(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            operation: OperationType::Mutation,
            selection_set: fields.into_iter().collect(),
        }
    }
}

/// GraphQL-over-HTTP request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
}

impl GraphQLRequest {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = Some(variables);
        self
    }

    #[must_use]
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use {super::*, serde_json::json};

    #[test]
    fn structured_request_from_json() {
        let request: Request = serde_json::from_value(json!({
            "operation": "mutation",
            "selectionSet": [{
                "name": "deleteUser",
                "arguments": {"id": "9"},
                "selectionSet": [{"name": "id"}, {"name": "firstName", "alias": "first"}]
            }]
        }))
        .unwrap();

        assert_eq!(
            request,
            Request::mutation([Field::new("deleteUser")
                .arg("id", "9")
                .select([Field::new("id"), Field::new("firstName").alias("first")])])
        );
        assert_eq!(request.selection_set[0].selection_set[1].response_key(), "first");
    }

    #[test]
    fn graphql_request_body_uses_camel_case() {
        let body: GraphQLRequest = serde_json::from_value(json!({
            "query": "query Q($id: ID) { user(id: $id) { id } }",
            "operationName": "Q",
            "variables": {"id": "1"}
        }))
        .unwrap();
        assert_eq!(body.operation_name.as_deref(), Some("Q"));
        assert_eq!(body.variables.unwrap()["id"], "1");
    }
}
