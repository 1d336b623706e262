//! Side-effecting root fields. Each performs exactly one backend call.

use std::sync::Arc;

use {
    spindle_resources::{CreateResolver, DeleteResolver, ResourceClient},
    spindle_schema::{ArgumentDefinition, FieldDefinition, ObjectType, Resolver, ScalarType},
};

use crate::{error::Result, types::USER};

pub const MUTATION: &str = "Mutation";

pub fn mutation_root(client: &Arc<dyn ResourceClient>) -> Result<ObjectType> {
    let add_user: Arc<dyn Resolver> = Arc::new(CreateResolver::new(Arc::clone(client), "/users")?);
    let delete_user: Arc<dyn Resolver> =
        Arc::new(DeleteResolver::new(Arc::clone(client), "/users/{{args.id}}")?);

    Ok(ObjectType::new(MUTATION, move || {
        vec![
            FieldDefinition::object("addUser", USER)
                .argument(ArgumentDefinition::required("firstName", ScalarType::String))
                .argument(ArgumentDefinition::required("age", ScalarType::Int))
                .argument(ArgumentDefinition::optional("companyId", ScalarType::Id))
                .resolver(Arc::clone(&add_user)),
            FieldDefinition::object("deleteUser", USER)
                .argument(ArgumentDefinition::required("id", ScalarType::Id))
                .resolver(Arc::clone(&delete_user)),
        ]
    }))
}
