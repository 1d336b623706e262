//! One-shot commands that run against the configured backend without
//! starting the HTTP server.

use {
    anyhow::{Context, Result},
    serde_json::{Map, Value},
    spindle_config::SpindleConfig,
    spindle_execution::GraphQLRequest,
    spindle_gateway::build_executor,
};

/// Execute one operation and print the JSON response to stdout.
pub async fn run_query(
    config: &SpindleConfig,
    query: String,
    variables: Option<&str>,
    operation: Option<String>,
) -> Result<()> {
    let executor = build_executor(config)?;
    let mut request = GraphQLRequest::new(query);
    if let Some(raw) = variables {
        request = request.variables(parse_variables(raw)?);
    }
    if let Some(name) = operation {
        request = request.operation_name(name);
    }

    let response = executor.execute_graphql(&request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Print the schema as SDL.
pub fn print_schema(config: &SpindleConfig) -> Result<()> {
    let executor = build_executor(config)?;
    print!("{}", executor.registry().to_sdl());
    Ok(())
}

fn parse_variables(raw: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(raw).context("--variables must be JSON")? {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("--variables must be a JSON object, got {other}"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn variables_must_be_an_object() {
        let vars = parse_variables(r#"{"id": "5", "age": 21}"#).unwrap();
        assert_eq!(vars["id"], "5");
        assert_eq!(vars["age"], 21);

        assert!(parse_variables("[1, 2]").is_err());
        assert!(parse_variables("{id: 5}").is_err());
    }
}
