//! Turn GraphQL source text into a structured [`Request`].
//!
//! Variables are bound here, fragments are inlined and `@skip`/`@include`
//! are applied, so the executor only ever sees constant arguments and plain
//! field selections.

use std::collections::HashMap;

use {
    async_graphql::{
        Name, Value as ConstValue,
        parser::{
            Positioned, parse_query,
            types::{
                Directive, DocumentOperations, ExecutableDocument, FragmentDefinition,
                OperationDefinition, OperationType as GqlOperationType, Selection, SelectionSet,
            },
        },
    },
    serde_json::{Map, Value},
};

use crate::{
    error::ValidationError,
    request::{Field, GraphQLRequest, OperationType, Request},
};

type Result<T> = std::result::Result<T, ValidationError>;

impl Request {
    /// Parse `source`, pick the operation and bind `variables`.
    ///
    /// Undeclared variables referenced in the document are an error; declared
    /// ones fall back to their default value, then to `null`.
    pub fn parse(
        source: &str,
        operation_name: Option<&str>,
        variables: &Map<String, Value>,
    ) -> Result<Self> {
        let document = parse_query(source).map_err(|e| ValidationError::Syntax {
            message: e.to_string(),
        })?;
        let operation = select_operation(&document, operation_name)?;

        let operation_type = match operation.ty {
            GqlOperationType::Query => OperationType::Query,
            GqlOperationType::Mutation => OperationType::Mutation,
            GqlOperationType::Subscription => {
                return Err(ValidationError::UnsupportedOperation {
                    kind: "subscription".into(),
                });
            },
        };

        let bindings = bind_variables(operation, variables)?;
        let lowering = Lowering {
            fragments: &document.fragments,
            variables: &bindings,
        };
        let mut selection_set = Vec::new();
        lowering.selection_set(
            &operation.selection_set.node,
            &mut selection_set,
            &mut Vec::new(),
        )?;

        Ok(Self {
            operation: operation_type,
            selection_set,
        })
    }
}

impl TryFrom<&GraphQLRequest> for Request {
    type Error = ValidationError;

    fn try_from(req: &GraphQLRequest) -> Result<Self> {
        let empty = Map::new();
        Request::parse(
            &req.query,
            req.operation_name.as_deref(),
            req.variables.as_ref().unwrap_or(&empty),
        )
    }
}

fn select_operation<'d>(
    document: &'d ExecutableDocument,
    operation_name: Option<&str>,
) -> Result<&'d OperationDefinition> {
    match (&document.operations, operation_name) {
        (DocumentOperations::Single(op), _) => Ok(&op.node),
        (DocumentOperations::Multiple(ops), Some(name)) => ops
            .iter()
            .find(|(op_name, _)| op_name.as_str() == name)
            .map(|(_, op)| &op.node)
            .ok_or_else(|| ValidationError::UnknownOperation { name: name.into() }),
        (DocumentOperations::Multiple(ops), None) => {
            let mut iter = ops.values();
            match (iter.next(), iter.next()) {
                (Some(op), None) => Ok(&op.node),
                _ => Err(ValidationError::OperationNameRequired),
            }
        },
    }
}

fn bind_variables(
    operation: &OperationDefinition,
    provided: &Map<String, Value>,
) -> Result<HashMap<String, ConstValue>> {
    let mut bound = HashMap::with_capacity(operation.variable_definitions.len());
    for def in &operation.variable_definitions {
        let name = def.node.name.node.to_string();
        let value = match provided.get(&name) {
            Some(json) => ConstValue::from_json(json.clone()).map_err(|e| {
                ValidationError::InvalidVariable {
                    name: name.clone(),
                    message: e.to_string(),
                }
            })?,
            None => def
                .node
                .default_value
                .as_ref()
                .map(|default| default.node.clone())
                .unwrap_or(ConstValue::Null),
        };
        bound.insert(name, value);
    }
    Ok(bound)
}

struct Lowering<'d> {
    fragments: &'d HashMap<Name, Positioned<FragmentDefinition>>,
    variables: &'d HashMap<String, ConstValue>,
}

impl Lowering<'_> {
    fn selection_set(
        &self,
        set: &SelectionSet,
        out: &mut Vec<Field>,
        spreading: &mut Vec<String>,
    ) -> Result<()> {
        for item in &set.items {
            match &item.node {
                Selection::Field(field) => {
                    if !self.included(&field.node.directives)? {
                        continue;
                    }
                    let mut lowered = Field {
                        name: field.node.name.node.to_string(),
                        alias: field.node.alias.as_ref().map(|a| a.node.to_string()),
                        ..Field::default()
                    };
                    for (name, value) in &field.node.arguments {
                        let value = value.node.clone().into_const_with(self.variable())?;
                        lowered.arguments.insert(name.node.to_string(), to_json(value)?);
                    }
                    self.selection_set(
                        &field.node.selection_set.node,
                        &mut lowered.selection_set,
                        spreading,
                    )?;
                    out.push(lowered);
                },
                Selection::FragmentSpread(spread) => {
                    if !self.included(&spread.node.directives)? {
                        continue;
                    }
                    let name = spread.node.fragment_name.node.to_string();
                    if spreading.contains(&name) {
                        return Err(ValidationError::FragmentCycle { name });
                    }
                    let fragment = self
                        .fragments
                        .iter()
                        .find(|(frag_name, _)| frag_name.as_str() == name)
                        .map(|(_, frag)| frag)
                        .ok_or_else(|| ValidationError::UnknownFragment { name: name.clone() })?;
                    spreading.push(name);
                    self.selection_set(&fragment.node.selection_set.node, out, spreading)?;
                    spreading.pop();
                },
                Selection::InlineFragment(inline) => {
                    if !self.included(&inline.node.directives)? {
                        continue;
                    }
                    self.selection_set(&inline.node.selection_set.node, out, spreading)?;
                },
            }
        }
        Ok(())
    }

    /// Variable lookup used when turning argument values into constants.
    fn variable(&self) -> impl FnMut(Name) -> Result<ConstValue> + '_ {
        move |name: Name| {
            self.variables
                .get(name.as_str())
                .cloned()
                .ok_or_else(|| ValidationError::UnknownVariable {
                    name: name.to_string(),
                })
        }
    }

    /// Apply `@skip(if:)` and `@include(if:)`.
    fn included(&self, directives: &[Positioned<Directive>]) -> Result<bool> {
        for directive in directives {
            let name = directive.node.name.node.as_str();
            if name != "skip" && name != "include" {
                continue;
            }
            let condition = match directive
                .node
                .arguments
                .iter()
                .find(|(arg, _)| arg.node.as_str() == "if")
            {
                Some((_, value)) => value.node.clone().into_const_with(self.variable())?,
                None => ConstValue::Null,
            };
            let condition = matches!(condition, ConstValue::Boolean(true));
            if (name == "skip" && condition) || (name == "include" && !condition) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn to_json(value: ConstValue) -> Result<Value> {
    value.into_json().map_err(|e| ValidationError::Syntax {
        message: e.to_string(),
    })
}
