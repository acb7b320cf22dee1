//! REST client for the Growth Garden API.
//!
//! The client is explicit: callers construct it from a [`crate::Session`],
//! every call returns `Result<_, ApiError>`, and cached reads are dropped by
//! the mutations that make them stale.

pub mod cache;
pub mod client;

pub use cache::{Mutation, ResourceCache, ResourceKey};
pub use client::ApiClient;
