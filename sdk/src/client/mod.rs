//! Talking to a node.
//!
//! - [`transport`]: the [`Transport`] seam and its `reqwest` implementation.
//! - [`wire`]: response payloads and the strict envelope decode.
//! - [`node`]: [`NodeClient`], the retrying, typed front end.

pub mod node;
pub mod transport;
pub mod wire;

pub use node::{NodeClient, SendRequest, WaitOptions};
pub use transport::{HttpTransport, Method, Request, Response, Transport};
pub use wire::{AccountInfo, BalanceInfo, Envelope, Health, NodeStatus, TransactionInfo};
