//! The in-memory registry the two transports (stdio, HTTP) share: one
//! `Dispatcher` is built once in the binary, every tool and resource is
//! registered against it exactly once, and both transports forward
//! incoming requests to [`Dispatcher::invoke_tool`] /
//! [`Dispatcher::read_resource`] (§4.8, §6.6).

use gateway_primitives::{GatewayError, GatewayResult};
use serde_json::Value;
use std::collections::HashMap;

use crate::envelope::{ResourceResult, ToolResult};
use crate::resources::UriTemplate;
use crate::schema::ToolSchema;
use crate::server::{ResourceHandler, ResourceServer, ToolHandler, ToolServer};

struct ToolEntry {
    #[allow(dead_code)]
    description: String,
    schema: ToolSchema,
    handler: ToolHandler,
}

struct ResourceEntry {
    template: UriTemplate,
    handler: ResourceHandler,
}

/// The dispatcher holds every registered tool and resource and knows how
/// to validate, invoke, and envelope a call. It is itself the
/// `ToolServer`/`ResourceServer` that registration is performed against.
#[derive(Default)]
pub struct Dispatcher {
    tools: HashMap<String, ToolEntry>,
    resources: Vec<ResourceEntry>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Validate `args` against the named tool's schema, run its handler,
    /// and wrap the outcome as a `ToolResult`. Unknown tool names and
    /// schema-validation failures are reported the same way a handler
    /// error would be: as an `isError` result, never a panic.
    pub async fn invoke_tool(&self, name: &str, args: Value) -> ToolResult {
        let Some(entry) = self.tools.get(name) else {
            return ToolResult::error(format!("unknown tool '{name}'"));
        };
        if let Err(err) = entry.schema.validate(&args) {
            return ToolResult::error(err.user_message());
        }
        match (entry.handler)(args).await {
            Ok(value) => ToolResult::ok(value),
            Err(err) => ToolResult::error(err.user_message()),
        }
    }

    /// Match `uri` against every registered resource template in
    /// registration order and invoke the first match's handler.
    pub async fn read_resource(&self, uri: &str) -> ResourceResult {
        for entry in &self.resources {
            if let Some(bindings) = entry.template.matches(uri) {
                return match (entry.handler)(bindings).await {
                    Ok(value) => ResourceResult::ok(uri, value),
                    Err(err) => ResourceResult::ok(uri, Value::String(err.user_message())),
                };
            }
        }
        ResourceResult::ok(uri, Value::String(GatewayError::not_found(format!("no resource matches '{uri}'")).user_message()))
    }
}

impl ToolServer for Dispatcher {
    fn register_tool(&mut self, name: &str, description: &str, schema: ToolSchema, handler: ToolHandler) {
        self.tools.insert(name.to_string(), ToolEntry { description: description.to_string(), schema, handler });
    }
}

impl ResourceServer for Dispatcher {
    fn register_resource(&mut self, _name: &str, uri_template: &str, handler: ResourceHandler) {
        self.resources.push(ResourceEntry { template: UriTemplate::parse(uri_template), handler });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, FieldKind};
    use serde_json::json;

    fn echo_schema() -> ToolSchema {
        ToolSchema::new(&[Field::required("value", FieldKind::Str)])
    }

    #[tokio::test]
    async fn invokes_a_registered_tool_with_valid_args() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register_tool(
            "echo",
            "echoes its input",
            echo_schema(),
            std::sync::Arc::new(|args: Value| Box::pin(async move { Ok(args) })),
        );
        let result = dispatcher.invoke_tool("echo", json!({"value": "hi"})).await;
        assert!(!result.is_error);
    }

    #[tokio::test]
    async fn rejects_invalid_args_before_calling_the_handler() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register_tool(
            "echo",
            "echoes its input",
            echo_schema(),
            std::sync::Arc::new(|_args: Value| Box::pin(async move { panic!("handler must not run") })),
        );
        let result = dispatcher.invoke_tool("echo", json!({})).await;
        assert!(result.is_error);
    }

    #[tokio::test]
    async fn unknown_tool_name_is_reported_as_an_error_result() {
        let dispatcher = Dispatcher::new();
        let result = dispatcher.invoke_tool("missing", json!({})).await;
        assert!(result.is_error);
    }

    #[tokio::test]
    async fn reads_a_resource_via_its_bound_template() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register_resource(
            "info",
            "iota://{network}/info",
            std::sync::Arc::new(|bindings: HashMap<String, String>| {
                Box::pin(async move { Ok(json!({"network": bindings["network"]})) })
            }),
        );
        let result = dispatcher.read_resource("iota://shimmer/info").await;
        assert_eq!(result.contents.len(), 1);
        assert_eq!(result.contents[0].uri, "iota://shimmer/info");
    }

    #[tokio::test]
    async fn unmatched_resource_uri_still_returns_a_result_not_an_error() {
        let dispatcher = Dispatcher::new();
        let result = dispatcher.read_resource("iota://shimmer/unknown").await;
        assert_eq!(result.contents.len(), 1);
    }
}
