//! JSONL dispatch adapter for the bufroute router.
//!
//! The plugin host talks to the router over a line-oriented protocol. Each
//! request names a prefixed operation and carries positional arguments:
//!
//! ```json
//! {"method":"bufroute:open","args":["status",{"id":"123"},null,{"split":"below"}]}
//! ```
//!
//! and receives exactly one response line:
//!
//! ```json
//! {"kind":"result","value":"gitui://status;id=123"}
//! {"kind":"error","message":"no handler registered for path 'blame'","status":1}
//! ```
//!
//! All boundary validation happens here: requests are parsed, methods mapped
//! to operations, and arguments checked against per-operation schemas before
//! the [`bufroute::Router`] is called.

pub mod arguments;
mod dispatcher;
mod errors;
mod handler;
mod request;
mod response;
pub mod telemetry;

pub use dispatcher::Dispatcher;
pub use errors::DispatchError;
pub use handler::{MAX_REQUEST_BYTES, ServeSummary, handle_line, serve};
pub use request::RpcRequest;
pub use response::{DispatchMessage, ResponseWriter};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
