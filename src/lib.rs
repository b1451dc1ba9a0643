//! Test-control client for EVM development nodes.
//!
//! Drives the non-standard control API of a local development chain
//! (snapshot/revert, block mining, time travel) so time-gated contract
//! logic can be tested deterministically instead of waiting out real
//! durations.

pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod request;
pub mod response;
pub mod transport;

pub use client::RpcClient;
pub use config::RpcConfig;
pub use controller::{EvmController, SnapshotHandle};
pub use errors::RpcError;
pub use request::RpcRequest;
pub use response::{NodeErrorPayload, RpcResponse};
pub use transport::{HttpTransport, Transport};
