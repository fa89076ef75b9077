//! JSON-RPC interface to the hierarchy.
//!
//! [`RpcHandler`] maps method names such as `objectives/create` to typed
//! handler functions registered at construction time. Every request yields
//! exactly one [`JsonRpcResponse`] echoing the request id.
//!
//! ```rust
//! use serde_json::json;
//! use summit_core::{HierarchyBuilder, rpc::RpcHandler};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handler = RpcHandler::new(HierarchyBuilder::new().in_memory().build().await?);
//! let response = handler
//!     .handle_str(r#"{"jsonrpc":"2.0","id":1,"method":"objectives/create","params":{"name":"Ship"}}"#)
//!     .await;
//! assert_eq!(response.id, json!(1));
//! assert_eq!(response.result.unwrap()["status"], "submitted");
//! # Ok(())
//! # }
//! ```

pub mod handler;
pub mod methods;
pub mod protocol;

pub use handler::RpcHandler;
pub use protocol::{ErrorCode, JsonRpcRequest, JsonRpcResponse, RpcError, JSONRPC_VERSION};
