// src/core/tool.rs

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;

use super::error::ToolkitError;
use super::schema::ObjectSchema;

/// Boxed async body of a tool. Receives parameters that already passed the
/// tool's schema when the calling adapter validates.
pub type ExecuteFn =
    Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value, ToolkitError>> + Send + Sync>;

/// An immutable unit of capability: name, description, parameter schema and
/// execution body.
///
/// Wallet access is captured by the execute closure at construction, so the
/// descriptor itself carries no client state. Cloning shares the closure.
#[derive(Clone)]
pub struct ToolDescriptor {
    name: String,
    description: String,
    parameters: ObjectSchema,
    execute: ExecuteFn,
}

impl ToolDescriptor {
    /// Builds a descriptor. Fails on an empty name.
    pub fn new<F>(
        name: &str,
        description: &str,
        parameters: ObjectSchema,
        execute: F,
    ) -> Result<Self, ToolkitError>
    where
        F: Fn(Value) -> BoxFuture<'static, Result<Value, ToolkitError>> + Send + Sync + 'static,
    {
        if name.trim().is_empty() {
            return Err(ToolkitError::Config("tool name must not be empty".into()));
        }
        Ok(Self {
            name: name.into(),
            description: description.into(),
            parameters,
            execute: Arc::new(execute),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &ObjectSchema {
        &self.parameters
    }

    /// Runs the tool body.
    pub async fn execute(&self, parameters: Value) -> Result<Value, ToolkitError> {
        (self.execute)(parameters).await
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
