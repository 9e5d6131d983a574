//! WebUntis JSON-RPC implementation of the provider ports.

pub mod client;
pub mod rpc;

pub use client::{WebUntisProvider, WebUntisSession};
