use std::{
    collections::{HashMap, HashSet},
    fmt,
    sync::{Arc, OnceLock},
};

use crate::{
    error::{Result, SchemaError},
    types::FieldDefinition,
};

type FieldsThunk = Box<dyn Fn() -> Vec<FieldDefinition> + Send + Sync>;

struct FieldMap {
    ordered: Vec<FieldDefinition>,
    by_name: HashMap<String, usize>,
}

impl FieldMap {
    fn new(ordered: Vec<FieldDefinition>) -> Self {
        let mut by_name = HashMap::with_capacity(ordered.len());
        for (idx, field) in ordered.iter().enumerate() {
            by_name.entry(field.name.clone()).or_insert(idx);
        }
        Self { ordered, by_name }
    }
}

/// A named object type. Its field list is produced by a closure the first
/// time it is needed and cached from then on.
pub struct ObjectType {
    name: String,
    description: Option<String>,
    thunk: FieldsThunk,
    fields: OnceLock<FieldMap>,
}

impl ObjectType {
    pub fn new<F>(name: impl Into<String>, fields: F) -> Self
    where
        F: Fn() -> Vec<FieldDefinition> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: None,
            thunk: Box::new(fields),
            fields: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn field_map(&self) -> &FieldMap {
        self.fields.get_or_init(|| FieldMap::new((self.thunk)()))
    }

    /// Look up a field by name. `None` means the type has no such field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        let map = self.field_map();
        map.by_name.get(name).map(|idx| &map.ordered[*idx])
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.field_map().ordered.iter()
    }
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectType")
            .field("name", &self.name)
            .field("evaluated", &self.fields.get().is_some())
            .finish()
    }
}

/// Collects type registrations; [`build`](Self::build) validates the whole
/// graph once every type is known.
#[derive(Default)]
pub struct RegistryBuilder {
    types: Vec<ObjectType>,
    query: Option<String>,
    mutation: Option<String>,
}

impl RegistryBuilder {
    /// Register an object type whose fields come from `fields`. The closure is
    /// not called here, so it may mention types registered later.
    #[must_use]
    pub fn object<F>(self, name: impl Into<String>, fields: F) -> Self
    where
        F: Fn() -> Vec<FieldDefinition> + Send + Sync + 'static,
    {
        self.register(ObjectType::new(name, fields))
    }

    #[must_use]
    pub fn register(mut self, ty: ObjectType) -> Self {
        self.types.push(ty);
        self
    }

    #[must_use]
    pub fn query(mut self, type_name: impl Into<String>) -> Self {
        self.query = Some(type_name.into());
        self
    }

    #[must_use]
    pub fn mutation(mut self, type_name: impl Into<String>) -> Self {
        self.mutation = Some(type_name.into());
        self
    }

    pub fn build(self) -> Result<Registry> {
        let mut types: HashMap<String, Arc<ObjectType>> = HashMap::with_capacity(self.types.len());
        for ty in self.types {
            if types.contains_key(ty.name()) {
                return Err(SchemaError::duplicate_type(ty.name()));
            }
            types.insert(ty.name.clone(), Arc::new(ty));
        }

        let mut names: Vec<&String> = types.keys().collect();
        names.sort();
        for name in names {
            let ty = &types[name];
            let mut seen = HashSet::new();
            for field in ty.fields() {
                if !seen.insert(field.name.as_str()) {
                    return Err(SchemaError::duplicate_field(ty.name(), &field.name));
                }
                if let Some(target) = field.ty.object_name()
                    && !types.contains_key(target)
                {
                    return Err(SchemaError::unknown_type(ty.name(), &field.name, target));
                }
            }
        }

        let query_name = self.query.ok_or(SchemaError::NoQueryRoot)?;
        let query = root(&types, "query", query_name)?;
        let mutation = self
            .mutation
            .map(|name| root(&types, "mutation", name))
            .transpose()?;

        Ok(Registry {
            types,
            query,
            mutation,
        })
    }
}

fn root(
    types: &HashMap<String, Arc<ObjectType>>,
    kind: &'static str,
    name: String,
) -> Result<Arc<ObjectType>> {
    types
        .get(&name)
        .cloned()
        .ok_or(SchemaError::MissingRoot { kind, name })
}

/// Immutable, validated set of object types plus the query and optional
/// mutation roots.
pub struct Registry {
    types: HashMap<String, Arc<ObjectType>>,
    query: Arc<ObjectType>,
    mutation: Option<Arc<ObjectType>>,
}

impl Registry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    #[must_use]
    pub fn object(&self, name: &str) -> Option<&ObjectType> {
        self.types.get(name).map(Arc::as_ref)
    }

    #[must_use]
    pub fn query_type(&self) -> &ObjectType {
        &self.query
    }

    #[must_use]
    pub fn mutation_type(&self) -> Option<&ObjectType> {
        self.mutation.as_deref()
    }

    /// All registered types, sorted by name.
    #[must_use]
    pub fn types(&self) -> Vec<&ObjectType> {
        let mut all: Vec<&ObjectType> = self.types.values().map(Arc::as_ref).collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.types.len())
            .field("query", &self.query.name())
            .field("mutation", &self.mutation.as_ref().map(|m| m.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use std::sync::atomic::{AtomicUsize, Ordering};

    use {
        super::*,
        crate::types::{ScalarType, TypeRef},
    };

    fn query_type() -> ObjectType {
        ObjectType::new("Query", || {
            vec![FieldDefinition::object("company", "Company")]
        })
    }

    #[test]
    fn mutually_recursive_types_register_in_any_order() {
        let registry = Registry::builder()
            .register(query_type())
            .object("User", || {
                vec![
                    FieldDefinition::scalar("firstName", ScalarType::String),
                    FieldDefinition::object("company", "Company"),
                ]
            })
            .object("Company", || {
                vec![
                    FieldDefinition::scalar("name", ScalarType::String),
                    FieldDefinition::list("users", "User"),
                ]
            })
            .query("Query")
            .build()
            .unwrap();

        let user = registry.object("User").unwrap();
        assert_eq!(user.field("company").unwrap().ty, TypeRef::object("Company"));
        let company = registry.object("Company").unwrap();
        assert_eq!(company.field("users").unwrap().ty, TypeRef::list("User"));
        assert!(company.field("ceo").is_none());
    }

    #[test]
    fn fields_closure_runs_once_and_lazily() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let ty = ObjectType::new("Company", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            vec![FieldDefinition::scalar("name", ScalarType::String)]
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let registry = Registry::builder()
            .register(ty)
            .register(query_type())
            .query("Query")
            .build()
            .unwrap();
        let company = registry.object("Company").unwrap();
        assert!(company.field("name").is_some());
        assert!(company.field("name").is_some());
        assert_eq!(company.fields().count(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn duplicate_type_names_are_rejected() {
        let err = Registry::builder()
            .register(query_type())
            .object("Company", Vec::new)
            .object("Company", Vec::new)
            .query("Query")
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::duplicate_type("Company"));
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let err = Registry::builder()
            .register(query_type())
            .object("Company", || {
                vec![
                    FieldDefinition::scalar("name", ScalarType::String),
                    FieldDefinition::scalar("name", ScalarType::Id),
                ]
            })
            .query("Query")
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::duplicate_field("Company", "name"));
    }

    #[test]
    fn references_to_unregistered_types_are_rejected() {
        let err = Registry::builder()
            .register(query_type())
            .object("Company", || vec![FieldDefinition::list("users", "User")])
            .query("Query")
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::unknown_type("Company", "users", "User"));
    }

    #[test]
    fn roots_must_exist() {
        let err = Registry::builder()
            .object("Company", Vec::new)
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::NoQueryRoot);

        let err = Registry::builder()
            .register(query_type())
            .object("Company", Vec::new)
            .query("Query")
            .mutation("Mutation")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingRoot {
                kind: "mutation",
                name: "Mutation".into()
            }
        );
    }
}
