//! Solvault RPC - JSON-RPC client for the ledger node.
//!
//! The wallet core's external collaborator: balance lookups, blockhash
//! acquisition, fee estimation and transaction submission. Fallible
//! remote calls with no retry policy of their own — retries and backoff
//! belong to the caller.

pub mod client;

pub use client::RpcClient;
