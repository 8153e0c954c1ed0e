//! Tool/resource dispatcher: the typed schema layer, result envelopes,
//! URI-template resource matching, signer delegation, the concrete
//! in-memory [`Dispatcher`], and the closed set of gateway tool and
//! resource handlers built on top of it (§4.8, §6).

pub mod dispatcher;
pub mod envelope;
pub mod handlers;
pub mod resources;
pub mod schema;
pub mod server;
pub mod signer;

pub use dispatcher::Dispatcher;
pub use envelope::{ContentItem, ResourceContent, ResourceResult, ToolResult};
pub use handlers::{register_all, GatewayContext};
pub use resources::UriTemplate;
pub use schema::{Field, FieldKind, ToolSchema};
pub use server::{ResourceHandler, ResourceServer, ToolHandler, ToolServer};
pub use signer::{SignerPort, UnconfiguredSigner};
