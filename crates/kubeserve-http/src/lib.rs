//! HTTP surface for kubeserve
//!
//! This crate builds the axum router that forwards each resource route to a
//! single cluster list call and serves the static landing page.

mod error;
mod handlers;
mod server;

pub use error::ApiError;
pub use server::{AppState, router, serve};
