//! # macseal-http
//!
//! HTTP surface for the macseal signing service.
//!
//! This crate provides:
//! - The `/sign` and `/verify` axum handlers and router
//! - Error-to-status mapping with a uniform `{"error": ...}` body
//! - A reqwest client for the service's own endpoints

mod client;
mod error;
mod extract;
mod handlers;

pub use client::*;
pub use error::*;
pub use extract::*;
pub use handlers::*;
