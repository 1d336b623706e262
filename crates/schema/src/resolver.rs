//! The per-field resolver contract.

use std::{error::Error as StdError, future::Future, sync::Arc};

use {async_trait::async_trait, serde_json::Value, thiserror::Error};

/// Arguments passed to a field, keyed by argument name.
pub type Arguments = serde_json::Map<String, Value>;

pub type FieldResult = Result<Value, FieldError>;

/// Failure of a single field. The executor records it at the field's path and
/// nulls the field; it never aborts the request.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("{message}")]
    Message { message: String },

    #[error("{context}: {source}")]
    External {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error(transparent)]
    Other(Box<dyn StdError + Send + Sync>),
}

impl FieldError {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn external(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::External {
            context: context.into(),
            source: Box::new(source),
        }
    }

    #[must_use]
    pub fn other(source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Other(Box::new(source))
    }
}

/// What a resolver gets to see: its parent record and its own arguments.
/// Sibling results are deliberately absent.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub parent: &'a Value,
    pub args: &'a Arguments,
}

impl<'a> ResolveContext<'a> {
    #[must_use]
    pub fn new(parent: &'a Value, args: &'a Arguments) -> Self {
        Self { parent, args }
    }

    /// Read a property of the parent record. Missing keys and non-object
    /// parents both yield `None`.
    #[must_use]
    pub fn parent_field(&self, name: &str) -> Option<&'a Value> {
        self.parent.get(name).filter(|v| !v.is_null())
    }

    #[must_use]
    pub fn arg(&self, name: &str) -> Option<&'a Value> {
        self.args.get(name).filter(|v| !v.is_null())
    }
}

/// Computes the value of one field, possibly suspending on external I/O.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, ctx: ResolveContext<'_>) -> FieldResult;
}

struct FnResolver<F>(F);

#[async_trait]
impl<F, Fut> Resolver for FnResolver<F>
where
    F: Fn(Value, Arguments) -> Fut + Send + Sync,
    Fut: Future<Output = FieldResult> + Send,
{
    async fn resolve(&self, ctx: ResolveContext<'_>) -> FieldResult {
        (self.0)(ctx.parent.clone(), ctx.args.clone()).await
    }
}

/// Wrap an async closure as a [`Resolver`]. The closure receives owned copies
/// of the parent record and the arguments.
pub fn resolver_fn<F, Fut>(f: F) -> Arc<dyn Resolver>
where
    F: Fn(Value, Arguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = FieldResult> + Send + 'static,
{
    Arc::new(FnResolver(f))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use {super::*, serde_json::json};

    #[tokio::test]
    async fn closure_resolver_sees_parent_and_args() {
        let resolver = resolver_fn(|parent, args| async move {
            let name = parent["name"].as_str().unwrap_or_default().to_string();
            let suffix = args
                .get("suffix")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Ok(json!(format!("{name}{suffix}")))
        });

        let parent = json!({"name": "Acme"});
        let mut args = Arguments::new();
        args.insert("suffix".into(), json!(" Inc"));

        let value = resolver
            .resolve(ResolveContext::new(&parent, &args))
            .await
            .unwrap();
        assert_eq!(value, json!("Acme Inc"));
    }

    #[test]
    fn null_parent_fields_read_as_missing() {
        let parent = json!({"companyId": null, "id": "1"});
        let args = Arguments::new();
        let ctx = ResolveContext::new(&parent, &args);
        assert!(ctx.parent_field("companyId").is_none());
        assert!(ctx.parent_field("missing").is_none());
        assert_eq!(ctx.parent_field("id"), Some(&json!("1")));
    }
}
