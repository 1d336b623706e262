use std::{fmt, sync::Arc};

use serde_json::{Number, Value};

use crate::resolver::Resolver;

/// Built-in leaf types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Id,
    String,
    Int,
    Float,
    Boolean,
}

impl ScalarType {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::String => "String",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
        }
    }

    /// Whether a non-null argument value is acceptable input for this scalar.
    #[must_use]
    pub fn accepts_input(self, value: &Value) -> bool {
        match self {
            Self::Id => value.is_string() || value.is_i64() || value.is_u64(),
            Self::String => value.is_string(),
            Self::Int => value.as_i64().is_some_and(|n| i32::try_from(n).is_ok()),
            Self::Float => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }

    /// Coerce a backend value into this scalar's response representation.
    ///
    /// Returns `None` when the value cannot be represented; `null` passes
    /// through unchanged.
    #[must_use]
    pub fn coerce_output(self, value: &Value) -> Option<Value> {
        if value.is_null() {
            return Some(Value::Null);
        }
        match self {
            Self::Id => match value {
                Value::String(_) => Some(value.clone()),
                Value::Number(n) if n.is_i64() || n.is_u64() => Some(Value::String(n.to_string())),
                _ => None,
            },
            Self::String => match value {
                Value::String(_) => Some(value.clone()),
                Value::Number(n) => Some(Value::String(n.to_string())),
                Value::Bool(b) => Some(Value::String(b.to_string())),
                _ => None,
            },
            Self::Int => match value {
                Value::Number(n) => integral(n)
                    .filter(|i| i32::try_from(*i).is_ok())
                    .map(Value::from),
                Value::Bool(b) => Some(Value::from(i64::from(*b))),
                _ => None,
            },
            Self::Float => match value {
                Value::Number(_) => Some(value.clone()),
                Value::Bool(b) => Some(Value::from(if *b { 1.0 } else { 0.0 })),
                _ => None,
            },
            Self::Boolean => match value {
                Value::Bool(_) => Some(value.clone()),
                _ => None,
            },
        }
    }
}

fn integral(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared output type of a field. Object types are referenced by name and
/// looked up in the registry when needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Scalar(ScalarType),
    Object(String),
    List(String),
}

impl TypeRef {
    #[must_use]
    pub fn object(name: impl Into<String>) -> Self {
        Self::Object(name.into())
    }

    #[must_use]
    pub fn list(name: impl Into<String>) -> Self {
        Self::List(name.into())
    }

    /// Name of the referenced object type, if any.
    #[must_use]
    pub fn object_name(&self) -> Option<&str> {
        match self {
            Self::Scalar(_) => None,
            Self::Object(name) | Self::List(name) => Some(name),
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => write!(f, "{scalar}"),
            Self::Object(name) => f.write_str(name),
            Self::List(name) => write!(f, "[{name}]"),
        }
    }
}

/// An argument accepted by a field. Required arguments are non-nullable and
/// must be supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDefinition {
    pub name: String,
    pub ty: ScalarType,
    pub required: bool,
}

impl ArgumentDefinition {
    #[must_use]
    pub fn optional(name: impl Into<String>, ty: ScalarType) -> Self {
        Self {
            name: name.into(),
            ty,
            required: false,
        }
    }

    #[must_use]
    pub fn required(name: impl Into<String>, ty: ScalarType) -> Self {
        Self {
            name: name.into(),
            ty,
            required: true,
        }
    }
}

impl fmt::Display for ArgumentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)?;
        if self.required {
            f.write_str("!")?;
        }
        Ok(())
    }
}

/// One named, typed attribute of an [`ObjectType`](crate::ObjectType).
#[derive(Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: TypeRef,
    pub arguments: Vec<ArgumentDefinition>,
    pub description: Option<String>,
    resolver: Option<Arc<dyn Resolver>>,
}

impl FieldDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            arguments: Vec::new(),
            description: None,
            resolver: None,
        }
    }

    #[must_use]
    pub fn scalar(name: impl Into<String>, ty: ScalarType) -> Self {
        Self::new(name, TypeRef::Scalar(ty))
    }

    #[must_use]
    pub fn object(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, TypeRef::object(type_name))
    }

    #[must_use]
    pub fn list(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, TypeRef::list(type_name))
    }

    #[must_use]
    pub fn argument(mut self, argument: ArgumentDefinition) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Attach the resolver. A field carries at most one; calling this again
    /// replaces the previous one.
    #[must_use]
    pub fn resolver(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn get_resolver(&self) -> Option<&Arc<dyn Resolver>> {
        self.resolver.as_ref()
    }

    #[must_use]
    pub fn get_argument(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("arguments", &self.arguments)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn id_output_accepts_integers() {
        assert_eq!(ScalarType::Id.coerce_output(&json!(42)), Some(json!("42")));
        assert_eq!(ScalarType::Id.coerce_output(&json!("a1")), Some(json!("a1")));
        assert_eq!(ScalarType::Id.coerce_output(&json!(1.5)), None);
    }

    #[test]
    fn int_output_rejects_fractions_and_overflow() {
        assert_eq!(ScalarType::Int.coerce_output(&json!(21)), Some(json!(21)));
        assert_eq!(ScalarType::Int.coerce_output(&json!(21.0)), Some(json!(21)));
        assert_eq!(ScalarType::Int.coerce_output(&json!(2.5)), None);
        assert_eq!(ScalarType::Int.coerce_output(&json!(1_i64 << 40)), None);
        assert_eq!(ScalarType::Int.coerce_output(&json!("21")), None);
    }

    #[test]
    fn objects_are_never_scalars() {
        for scalar in [
            ScalarType::Id,
            ScalarType::String,
            ScalarType::Int,
            ScalarType::Float,
            ScalarType::Boolean,
        ] {
            assert_eq!(scalar.coerce_output(&json!({"a": 1})), None, "{scalar}");
            assert_eq!(scalar.coerce_output(&json!([1])), None, "{scalar}");
            assert_eq!(scalar.coerce_output(&Value::Null), Some(Value::Null));
        }
    }

    #[test]
    fn input_acceptance() {
        assert!(ScalarType::Int.accepts_input(&json!(21)));
        assert!(!ScalarType::Int.accepts_input(&json!("21")));
        assert!(ScalarType::Id.accepts_input(&json!(9)));
        assert!(ScalarType::Id.accepts_input(&json!("9")));
        assert!(!ScalarType::String.accepts_input(&json!(9)));
        assert!(ScalarType::Float.accepts_input(&json!(9)));
        assert!(!ScalarType::Boolean.accepts_input(&json!(0)));
    }

    #[test]
    fn type_ref_display() {
        assert_eq!(TypeRef::Scalar(ScalarType::Id).to_string(), "ID");
        assert_eq!(TypeRef::object("Company").to_string(), "Company");
        assert_eq!(TypeRef::list("User").to_string(), "[User]");
        assert_eq!(
            ArgumentDefinition::required("age", ScalarType::Int).to_string(),
            "age: Int!"
        );
    }
}
