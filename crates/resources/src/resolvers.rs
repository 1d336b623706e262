//! Field resolvers backed by a [`ResourceClient`].
//!
//! Each resolver renders its [`ResourcePath`] against the parent record and
//! arguments. When the path cannot be rendered (the lookup key is absent) the
//! field is null and no request is made.

use std::sync::Arc;

use {
    async_trait::async_trait,
    serde_json::{Map, Value},
    spindle_schema::{FieldResult, ResolveContext, Resolver},
    tracing::debug,
};

use crate::{client::ResourceClient, error::Result, path::ResourcePath};

/// GET a record or collection.
pub struct FetchResolver {
    client: Arc<dyn ResourceClient>,
    path: ResourcePath,
}

impl FetchResolver {
    pub fn new(client: Arc<dyn ResourceClient>, template: &str) -> Result<Self> {
        Ok(Self {
            client,
            path: ResourcePath::parse(template)?,
        })
    }
}

#[async_trait]
impl Resolver for FetchResolver {
    async fn resolve(&self, ctx: ResolveContext<'_>) -> FieldResult {
        let Some(path) = self.path.render(ctx) else {
            debug!(template = %self.path, "lookup key absent, skipping fetch");
            return Ok(Value::Null);
        };
        Ok(self.client.fetch(&path).await?)
    }
}

/// POST the field's non-null arguments as a JSON object.
pub struct CreateResolver {
    client: Arc<dyn ResourceClient>,
    path: ResourcePath,
}

impl CreateResolver {
    pub fn new(client: Arc<dyn ResourceClient>, template: &str) -> Result<Self> {
        Ok(Self {
            client,
            path: ResourcePath::parse(template)?,
        })
    }
}

#[async_trait]
impl Resolver for CreateResolver {
    async fn resolve(&self, ctx: ResolveContext<'_>) -> FieldResult {
        let Some(path) = self.path.render(ctx) else {
            return Ok(Value::Null);
        };
        let payload: Map<String, Value> = ctx
            .args
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(self.client.create(&path, Value::Object(payload)).await?)
    }
}

/// DELETE the addressed record.
pub struct DeleteResolver {
    client: Arc<dyn ResourceClient>,
    path: ResourcePath,
}

impl DeleteResolver {
    pub fn new(client: Arc<dyn ResourceClient>, template: &str) -> Result<Self> {
        Ok(Self {
            client,
            path: ResourcePath::parse(template)?,
        })
    }
}

#[async_trait]
impl Resolver for DeleteResolver {
    async fn resolve(&self, ctx: ResolveContext<'_>) -> FieldResult {
        let Some(path) = self.path.render(ctx) else {
            return Ok(Value::Null);
        };
        Ok(self.client.delete(&path).await?)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use std::sync::Mutex;

    use {
        super::*,
        crate::error::Error,
        reqwest::Method,
        serde_json::json,
        spindle_schema::{Arguments, FieldError},
    };

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, String, Option<Value>)>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<(String, String, Option<Value>)> {
            self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
        }
    }

    #[async_trait]
    impl ResourceClient for Recorder {
        async fn fetch(&self, path: &str) -> Result<Value> {
            self.calls
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(("GET".into(), path.into(), None));
            Ok(json!({"path": path}))
        }

        async fn create(&self, path: &str, payload: Value) -> Result<Value> {
            self.calls
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(("POST".into(), path.into(), Some(payload.clone())));
            Ok(payload)
        }

        async fn delete(&self, path: &str) -> Result<Value> {
            self.calls
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(("DELETE".into(), path.into(), None));
            Err(Error::status(Method::DELETE, path, 404, "{}"))
        }
    }

    fn args(value: Value) -> Arguments {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn fetch_skips_request_without_key() {
        let recorder = Arc::new(Recorder::default());
        let resolver = FetchResolver::new(recorder.clone(), "/companies/{{value.companyId}}").unwrap();

        let parent = json!({"id": "1", "firstName": "Bo"});
        let value = resolver
            .resolve(ResolveContext::new(&parent, &Arguments::new()))
            .await
            .unwrap();
        assert_eq!(value, Value::Null);
        assert!(recorder.calls().is_empty());

        let parent = json!({"id": "1", "companyId": "5"});
        let value = resolver
            .resolve(ResolveContext::new(&parent, &Arguments::new()))
            .await
            .unwrap();
        assert_eq!(value, json!({"path": "/companies/5"}));
        assert_eq!(recorder.calls().len(), 1);
    }

    #[tokio::test]
    async fn create_sends_non_null_arguments() {
        let recorder = Arc::new(Recorder::default());
        let resolver = CreateResolver::new(recorder.clone(), "/users").unwrap();

        let args = args(json!({"firstName": "Bo", "age": 21, "companyId": null}));
        let value = resolver
            .resolve(ResolveContext::new(&Value::Null, &args))
            .await
            .unwrap();
        assert_eq!(value, json!({"firstName": "Bo", "age": 21}));
        assert_eq!(
            recorder.calls(),
            vec![(
                "POST".to_string(),
                "/users".to_string(),
                Some(json!({"firstName": "Bo", "age": 21}))
            )]
        );
    }

    #[tokio::test]
    async fn transport_errors_become_field_errors() {
        let recorder = Arc::new(Recorder::default());
        let resolver = DeleteResolver::new(recorder.clone(), "/users/{{args.id}}").unwrap();

        let args = args(json!({"id": "9"}));
        let err = resolver
            .resolve(ResolveContext::new(&Value::Null, &args))
            .await
            .unwrap_err();
        assert!(matches!(err, FieldError::Other(_)));
        assert_eq!(err.to_string(), "DELETE /users/9 returned HTTP 404: {}");
    }
}
