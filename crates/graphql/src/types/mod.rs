//! Object types of the directory.

use std::sync::Arc;

use {
    spindle_resources::{FetchResolver, ResourceClient},
    spindle_schema::{FieldDefinition, ObjectType, Resolver, ScalarType},
};

use crate::error::Result;

pub const COMPANY: &str = "Company";
pub const USER: &str = "User";

// ── Company ──────────────────────────────────────────────────────────────────

pub fn company(client: &Arc<dyn ResourceClient>) -> Result<ObjectType> {
    let users: Arc<dyn Resolver> = Arc::new(FetchResolver::new(
        Arc::clone(client),
        "/companies/{{value.id}}/users",
    )?);

    Ok(ObjectType::new(COMPANY, move || {
        vec![
            FieldDefinition::scalar("id", ScalarType::Id),
            FieldDefinition::scalar("name", ScalarType::String),
            FieldDefinition::scalar("description", ScalarType::String),
            FieldDefinition::list("users", USER)
                .description("Users employed by this company.")
                .resolver(Arc::clone(&users)),
        ]
    })
    .with_description("A company users can belong to."))
}

// ── User ─────────────────────────────────────────────────────────────────────

pub fn user(client: &Arc<dyn ResourceClient>) -> Result<ObjectType> {
    let company: Arc<dyn Resolver> = Arc::new(FetchResolver::new(
        Arc::clone(client),
        "/companies/{{value.companyId}}",
    )?);

    Ok(ObjectType::new(USER, move || {
        vec![
            FieldDefinition::scalar("id", ScalarType::Id),
            FieldDefinition::scalar("firstName", ScalarType::String),
            FieldDefinition::scalar("age", ScalarType::Int),
            FieldDefinition::object("company", COMPANY)
                .description("Null when the user has no company.")
                .resolver(Arc::clone(&company)),
        ]
    }))
}
