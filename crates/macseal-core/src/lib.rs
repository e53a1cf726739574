//! # macseal-core
//!
//! Core types and configuration for the macseal signing service.
//!
//! This crate provides:
//! - Wire types for the sign/verify envelope
//! - The fully-qualified key-version resource name
//! - Process configuration loaded from the environment

pub mod config;
pub mod error;
pub mod key;
pub mod types;

// Re-exports for convenience
pub use config::*;
pub use error::*;
pub use key::*;
pub use types::*;
