//! The downstream protocol-server contract (§6.2): a `register(name,
//! schema, handler)` capability the core's tool/resource surface is
//! registered against. Implemented by [`crate::Dispatcher`] itself, so
//! both the binary's stdio loop and its axum routes drive one shared
//! registry and invoker instead of duplicating registration logic.

use futures::future::BoxFuture;
use gateway_primitives::GatewayResult;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::schema::ToolSchema;

/// A tool handler: validated JSON arguments in, a JSON result out.
pub type ToolHandler = Arc<dyn Fn(Value) -> BoxFuture<'static, GatewayResult<Value>> + Send + Sync>;

/// A resource handler: bound `{placeholder}` path variables in, a JSON
/// result out.
pub type ResourceHandler = Arc<dyn Fn(HashMap<String, String>) -> BoxFuture<'static, GatewayResult<Value>> + Send + Sync>;

/// `registerTool(name, description, inputSchema, handler)` (§6.2).
pub trait ToolServer {
    fn register_tool(&mut self, name: &str, description: &str, schema: ToolSchema, handler: ToolHandler);
}

/// `registerResource(name, uriTemplateOrLiteral, handler)` (§6.2).
pub trait ResourceServer {
    fn register_resource(&mut self, name: &str, uri_template: &str, handler: ResourceHandler);
}
