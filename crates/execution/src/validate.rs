//! Static checks of a [`Request`] against a [`Registry`].
//!
//! Runs over the whole document before execution starts and reports every
//! problem it finds, each at the response path of the offending field.

use std::collections::HashMap;

use spindle_schema::{ObjectType, Registry, TypeRef};

use crate::{
    error::{PathSegment, ServerError, ValidationError},
    request::{Field, OperationType, Request},
};

/// Meta field answered by the executor for every object type.
pub const TYPENAME_FIELD: &str = "__typename";

/// Validate `request`; an empty result means it may be executed.
#[must_use]
pub fn validate(registry: &Registry, request: &Request, max_depth: usize) -> Vec<ServerError> {
    let mut errors = Vec::new();
    let root = match request.operation {
        OperationType::Query => registry.query_type(),
        OperationType::Mutation => match registry.mutation_type() {
            Some(root) => root,
            None => {
                errors.push(ServerError::from(ValidationError::NoMutationType));
                return errors;
            },
        },
    };

    let mut walker = Walker {
        registry,
        max_depth,
        errors: &mut errors,
        path: Vec::new(),
    };
    walker.selection_set(root, &request.selection_set, 1);
    errors
}

struct Walker<'a> {
    registry: &'a Registry,
    max_depth: usize,
    errors: &'a mut Vec<ServerError>,
    path: Vec<PathSegment>,
}

impl Walker<'_> {
    fn report(&mut self, err: ValidationError) {
        self.errors
            .push(ServerError::validation(&err, self.path.clone()));
    }

    fn selection_set(&mut self, ty: &ObjectType, fields: &[Field], depth: usize) {
        let mut keys: HashMap<&str, &Field> = HashMap::with_capacity(fields.len());
        for field in fields {
            self.path.push(PathSegment::Key(field.response_key().to_string()));
            if let Some(previous) = keys.insert(field.response_key(), field) {
                self.report(ValidationError::ConflictingKey {
                    key: field.response_key().to_string(),
                    first: previous.name.clone(),
                    second: field.name.clone(),
                });
            } else {
                self.field(ty, field, depth);
            }
            self.path.pop();
        }
    }

    fn field(&mut self, ty: &ObjectType, field: &Field, depth: usize) {
        if field.name == TYPENAME_FIELD {
            if !field.selection_set.is_empty() {
                self.report(ValidationError::SelectionOnScalar {
                    field: field.name.clone(),
                    ty: "String".into(),
                });
            }
            return;
        }

        let Some(def) = ty.field(&field.name) else {
            self.report(ValidationError::UnknownField {
                type_name: ty.name().to_string(),
                field: field.name.clone(),
            });
            return;
        };

        for (name, value) in &field.arguments {
            match def.get_argument(name) {
                None => self.report(ValidationError::UnknownArgument {
                    type_name: ty.name().to_string(),
                    field: field.name.clone(),
                    argument: name.clone(),
                }),
                Some(arg) if !value.is_null() && !arg.ty.accepts_input(value) => {
                    self.report(ValidationError::InvalidArgument {
                        type_name: ty.name().to_string(),
                        field: field.name.clone(),
                        argument: name.clone(),
                        ty: arg.ty,
                    });
                },
                Some(_) => {},
            }
        }
        for arg in def.arguments.iter().filter(|arg| arg.required) {
            let supplied = field
                .arguments
                .get(&arg.name)
                .is_some_and(|value| !value.is_null());
            if !supplied {
                self.report(ValidationError::MissingArgument {
                    type_name: ty.name().to_string(),
                    field: field.name.clone(),
                    argument: arg.name.clone(),
                    ty: arg.ty,
                });
            }
        }

        match &def.ty {
            TypeRef::Scalar(_) => {
                if !field.selection_set.is_empty() {
                    self.report(ValidationError::SelectionOnScalar {
                        field: field.name.clone(),
                        ty: def.ty.to_string(),
                    });
                }
            },
            TypeRef::Object(name) | TypeRef::List(name) => {
                if field.selection_set.is_empty() {
                    self.report(ValidationError::MissingSelection {
                        field: field.name.clone(),
                        ty: def.ty.to_string(),
                    });
                } else if depth >= self.max_depth {
                    self.report(ValidationError::TooDeep {
                        max: self.max_depth,
                    });
                } else if let Some(child) = self.registry.object(name) {
                    self.selection_set(child, &field.selection_set, depth + 1);
                }
            },
        }
    }
}
