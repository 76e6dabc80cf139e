//! Casework API server library.
//!
//! Hosts the form validation engine behind HTTP. Exposes config, state,
//! error handling, routes and the router builder so integration tests and
//! the binary entrypoint use the same stack.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
