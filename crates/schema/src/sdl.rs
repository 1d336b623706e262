//! Render a registry as GraphQL SDL.

use std::fmt::Write;

use crate::registry::{ObjectType, Registry};

impl Registry {
    /// Print every type as SDL: the query root, the mutation root, then the
    /// remaining object types by name.
    #[must_use]
    pub fn to_sdl(&self) -> String {
        let mut out = String::new();
        out.push_str("schema {\n");
        let _ = writeln!(out, "  query: {}", self.query_type().name());
        if let Some(mutation) = self.mutation_type() {
            let _ = writeln!(out, "  mutation: {}", mutation.name());
        }
        out.push_str("}\n");

        let query = self.query_type().name();
        let mutation = self.mutation_type().map(ObjectType::name);

        write_type(&mut out, self.query_type());
        if let Some(ty) = self.mutation_type() {
            write_type(&mut out, ty);
        }
        for ty in self.types() {
            if ty.name() == query || Some(ty.name()) == mutation {
                continue;
            }
            write_type(&mut out, ty);
        }
        out
    }
}

fn write_type(out: &mut String, ty: &ObjectType) {
    out.push('\n');
    if let Some(description) = ty.description() {
        write_block_string(out, description);
    }
    let _ = writeln!(out, "type {} {{", ty.name());
    for field in ty.fields() {
        if let Some(description) = &field.description {
            let _ = writeln!(out, "  \"{}\"", escape_string(description));
        }
        out.push_str("  ");
        out.push_str(&field.name);
        if !field.arguments.is_empty() {
            let args: Vec<String> = field.arguments.iter().map(ToString::to_string).collect();
            let _ = write!(out, "({})", args.join(", "));
        }
        let _ = writeln!(out, ": {}", field.ty);
    }
    out.push_str("}\n");
}

/// Type descriptions print as block strings. Multi-line text, or text ending
/// in a quote, gets its delimiters on their own lines.
fn write_block_string(out: &mut String, text: &str) {
    let escaped = text.replace("\"\"\"", "\\\"\"\"");
    if escaped.contains('\n') || escaped.ends_with('"') {
        let _ = writeln!(out, "\"\"\"\n{escaped}\n\"\"\"");
    } else {
        let _ = writeln!(out, "\"\"\"{escaped}\"\"\"");
    }
}

/// Escape a description for a single-line GraphQL string literal.
fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", u32::from(c));
            },
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use crate::{ArgumentDefinition, FieldDefinition, ObjectType, Registry, ScalarType};

    #[test]
    fn prints_roots_first() {
        let registry = Registry::builder()
            .object("User", || {
                vec![
                    FieldDefinition::scalar("id", ScalarType::Id),
                    FieldDefinition::scalar("age", ScalarType::Int),
                ]
            })
            .object("Query", || {
                vec![
                    FieldDefinition::object("user", "User")
                        .argument(ArgumentDefinition::optional("id", ScalarType::Id)),
                ]
            })
            .object("Mutation", || {
                vec![
                    FieldDefinition::object("deleteUser", "User")
                        .argument(ArgumentDefinition::required("id", ScalarType::Id))
                        .description("Remove a user"),
                ]
            })
            .query("Query")
            .mutation("Mutation")
            .build()
            .unwrap();

        let expected = "\
schema {
  query: Query
  mutation: Mutation
}

type Query {
  user(id: ID): User
}

type Mutation {
  \"Remove a user\"
  deleteUser(id: ID!): User
}

type User {
  id: ID
  age: Int
}
";
        assert_eq!(registry.to_sdl(), expected);
    }

    #[test]
    fn escapes_descriptions() {
        let registry = Registry::builder()
            .register(
                ObjectType::new("Query", || {
                    vec![
                        FieldDefinition::scalar("motto", ScalarType::String)
                            .description(r#"Says "hi" \ waves"#),
                    ]
                })
                .with_description(r#"Roots with """quotes""" inside"#),
            )
            .register(
                ObjectType::new("Note", || vec![FieldDefinition::scalar("id", ScalarType::Id)])
                    .with_description("Ends in \"quote\""),
            )
            .query("Query")
            .build()
            .unwrap();

        let sdl = registry.to_sdl();
        assert!(sdl.contains("\"\"\"Roots with \\\"\"\"quotes\\\"\"\" inside\"\"\"\ntype Query {"));
        assert!(sdl.contains(r#"  "Says \"hi\" \\ waves""#), "{sdl}");
        assert!(sdl.contains("\"\"\"\nEnds in \"quote\"\n\"\"\"\ntype Note {"), "{sdl}");
    }
}
