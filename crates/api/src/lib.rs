//! Platebook API server library.
//!
//! Exposes config, state, error handling, the router and its middleware
//! stack so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod names;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
