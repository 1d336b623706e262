//! Read-only root fields.

use std::sync::Arc;

use {
    spindle_resources::{FetchResolver, ResourceClient},
    spindle_schema::{ArgumentDefinition, FieldDefinition, ObjectType, Resolver, ScalarType},
};

use crate::{
    error::Result,
    types::{COMPANY, USER},
};

pub const QUERY: &str = "Query";

pub fn query_root(client: &Arc<dyn ResourceClient>) -> Result<ObjectType> {
    let user: Arc<dyn Resolver> =
        Arc::new(FetchResolver::new(Arc::clone(client), "/users/{{args.id}}")?);
    let company: Arc<dyn Resolver> = Arc::new(FetchResolver::new(
        Arc::clone(client),
        "/companies/{{args.id}}",
    )?);

    Ok(ObjectType::new(QUERY, move || {
        vec![
            FieldDefinition::object("user", USER)
                .argument(ArgumentDefinition::optional("id", ScalarType::Id))
                .resolver(Arc::clone(&user)),
            FieldDefinition::object("company", COMPANY)
                .argument(ArgumentDefinition::optional("id", ScalarType::Id))
                .resolver(Arc::clone(&company)),
        ]
    }))
}
