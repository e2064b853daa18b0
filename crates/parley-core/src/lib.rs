//! Cross-service plumbing for Parley backends: environment-backed
//! configuration loading, tracing setup, health handlers, and shared
//! middleware layers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod tracing;
