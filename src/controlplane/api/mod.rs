//! API Module
//!
//! Provides the REST API for readiness validation, preflight requirements
//! and metrics scraping.

pub mod server;
pub mod rest;

pub use server::*;
pub use rest::*;
