//! Recommendation service client and types.
//!
//! This module provides the interface for communicating with the remote
//! recipe product recommendation service.

mod client;
pub mod error;
pub mod types;

pub use client::RecommenderClient;
pub use error::ApiError;
