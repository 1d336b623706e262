//! Resolution of a validated [`Request`] against a [`Registry`].
//!
//! Every step returns its value together with the errors it produced;
//! parents merge children in selection order, so concurrent resolutions never
//! share mutable state.

use std::sync::Arc;

use {
    futures::future::{BoxFuture, FutureExt, join_all},
    serde_json::{Map, Value},
    spindle_schema::{ObjectType, Registry, ResolveContext, TypeRef},
    tracing::{debug, info, warn},
};

use crate::{
    error::{PathSegment, ServerError, ValidationError, display_path},
    request::{Field, GraphQLRequest, OperationType, Request},
    response::Response,
    validate::{TYPENAME_FIELD, validate},
};

/// Selections nested deeper than this are rejected.
pub const DEFAULT_MAX_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorOptions {
    pub max_depth: usize,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Executes requests against one immutable registry. Cheap to clone and safe
/// to share across concurrent requests.
#[derive(Debug, Clone)]
pub struct Executor {
    registry: Arc<Registry>,
    options: ExecutorOptions,
}

/// A resolved subtree and the errors recorded while producing it.
#[derive(Debug, Default)]
struct Resolved {
    value: Value,
    errors: Vec<ServerError>,
}

impl Resolved {
    fn value(value: Value) -> Self {
        Self {
            value,
            errors: Vec::new(),
        }
    }

    fn error(error: ServerError) -> Self {
        Self {
            value: Value::Null,
            errors: vec![error],
        }
    }
}

impl Executor {
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            options: ExecutorOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ExecutorOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    #[must_use]
    pub fn options(&self) -> ExecutorOptions {
        self.options
    }

    /// Parse a GraphQL-over-HTTP body and execute it.
    pub async fn execute_graphql(&self, request: &GraphQLRequest) -> Response {
        match Request::try_from(request) {
            Ok(request) => self.execute(&request).await,
            Err(err) => {
                debug!(error = %err, "rejecting unparsable request");
                Response::from_errors(vec![err.into()])
            },
        }
    }

    /// Validate and run `request`.
    ///
    /// A request with validation errors yields `data: null` and no resolver
    /// is invoked. Otherwise field failures null the field and are reported
    /// alongside the partial data.
    pub async fn execute(&self, request: &Request) -> Response {
        let errors = validate(&self.registry, request, self.options.max_depth);
        if !errors.is_empty() {
            debug!(
                operation = request.operation.as_str(),
                errors = errors.len(),
                "request failed validation"
            );
            return Response::from_errors(errors);
        }

        let (root, serial) = match request.operation {
            OperationType::Query => (self.registry.query_type(), false),
            OperationType::Mutation => match self.registry.mutation_type() {
                Some(root) => (root, true),
                None => {
                    return Response::from_errors(vec![ValidationError::NoMutationType.into()]);
                },
            },
        };

        let resolved = self
            .selection_set(root, &Value::Null, &request.selection_set, &[], serial)
            .await;
        info!(
            operation = request.operation.as_str(),
            fields = request.selection_set.len(),
            errors = resolved.errors.len(),
            "request completed"
        );
        Response::new(resolved.value).with_errors(resolved.errors)
    }

    /// Resolve `fields` against `parent`, concurrently unless `serial`.
    fn selection_set<'a>(
        &'a self,
        ty: &'a ObjectType,
        parent: &'a Value,
        fields: &'a [Field],
        path: &'a [PathSegment],
        serial: bool,
    ) -> BoxFuture<'a, Resolved> {
        async move {
            let child_path = |field: &Field| {
                let mut child = path.to_vec();
                child.push(PathSegment::Key(field.response_key().to_string()));
                child
            };

            let results = if serial {
                let mut results = Vec::with_capacity(fields.len());
                for field in fields {
                    results.push(self.field(ty, parent, field, child_path(field)).await);
                }
                results
            } else {
                join_all(
                    fields
                        .iter()
                        .map(|field| self.field(ty, parent, field, child_path(field))),
                )
                .await
            };

            let mut object = Map::with_capacity(fields.len());
            let mut errors = Vec::new();
            for (field, resolved) in fields.iter().zip(results) {
                object.insert(field.response_key().to_string(), resolved.value);
                errors.extend(resolved.errors);
            }
            Resolved {
                value: Value::Object(object),
                errors,
            }
        }
        .boxed()
    }

    fn field<'a>(
        &'a self,
        ty: &'a ObjectType,
        parent: &'a Value,
        field: &'a Field,
        path: Vec<PathSegment>,
    ) -> BoxFuture<'a, Resolved> {
        async move {
            if field.name == TYPENAME_FIELD {
                return Resolved::value(Value::String(ty.name().to_string()));
            }
            let Some(def) = ty.field(&field.name) else {
                return Resolved::value(Value::Null);
            };

            let value = match def.get_resolver() {
                Some(resolver) => {
                    let ctx = ResolveContext::new(parent, &field.arguments);
                    match resolver.resolve(ctx).await {
                        Ok(value) => value,
                        Err(err) => {
                            warn!(
                                path = %display_path(&path),
                                error = %err,
                                "field resolution failed"
                            );
                            return Resolved::error(ServerError::new(err.to_string(), path));
                        },
                    }
                },
                None => parent.get(&field.name).cloned().unwrap_or(Value::Null),
            };
            debug!(path = %display_path(&path), "resolved field");

            self.complete(&def.ty, value, field, path).await
        }
        .boxed()
    }

    /// Shape a resolved value according to the field's declared type.
    fn complete<'a>(
        &'a self,
        ty: &'a TypeRef,
        value: Value,
        field: &'a Field,
        path: Vec<PathSegment>,
    ) -> BoxFuture<'a, Resolved> {
        async move {
            if value.is_null() {
                return Resolved::value(Value::Null);
            }
            match ty {
                TypeRef::Scalar(scalar) => match scalar.coerce_output(&value) {
                    Some(value) => Resolved::value(value),
                    None => Resolved::error(ServerError::new(
                        format!("cannot represent value {value} as `{scalar}`"),
                        path,
                    )),
                },
                TypeRef::Object(name) => {
                    let Some(object_type) = self.registry.object(name) else {
                        return Resolved::value(Value::Null);
                    };
                    if !value.is_object() {
                        return Resolved::error(ServerError::new(
                            format!("expected an object of type `{name}`"),
                            path,
                        ));
                    }
                    self.selection_set(object_type, &value, &field.selection_set, &path, false)
                        .await
                },
                TypeRef::List(name) => {
                    let Value::Array(items) = value else {
                        return Resolved::error(ServerError::new(
                            format!("expected a list of type `[{name}]`"),
                            path,
                        ));
                    };
                    let item_ty = TypeRef::Object(name.clone());
                    let results = join_all(items.into_iter().enumerate().map(|(idx, item)| {
                        let mut item_path = path.clone();
                        item_path.push(PathSegment::Index(idx));
                        self.complete(&item_ty, item, field, item_path)
                    }))
                    .await;

                    let mut list = Vec::with_capacity(results.len());
                    let mut errors = Vec::new();
                    for resolved in results {
                        list.push(resolved.value);
                        errors.extend(resolved.errors);
                    }
                    Resolved {
                        value: Value::Array(list),
                        errors,
                    }
                },
            }
        }
        .boxed()
    }
}
