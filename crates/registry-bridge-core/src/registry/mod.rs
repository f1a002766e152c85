//! Registry access
//!
//! A thin layer that moves transformed records in and out of a remote entity
//! registry. The transport is a trait so the HTTP client can be swapped for an
//! in-memory one in tests.

pub mod client;
pub mod response;
pub mod transport;
pub mod user;

pub use client::{HttpRegistryClient, RegistryClientConfig, ACCESS_TOKEN_HEADER};
pub use response::{RegistryResponse, ResponseParams, STATUS_SUCCESSFUL};
pub use transport::RegistryTransport;
pub use user::UserRegistry;
