//! Shared models and utilities

pub mod cancellation;
pub mod models;

pub use cancellation::CancellationToken;
