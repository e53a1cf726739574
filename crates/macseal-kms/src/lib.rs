//! # macseal-kms
//!
//! Facade over the external key-management collaborator.
//!
//! The service never computes a MAC locally: it sends canonical payload
//! bytes to Cloud KMS, addressed by one fixed key-version resource name, and
//! gets back either a MAC or a verification verdict. This crate provides the
//! [`MacBackend`] seam the HTTP handlers depend on and the production
//! [`CloudKmsClient`] implementation.

mod backend;
mod client;
mod error;

pub use backend::*;
pub use client::*;
pub use error::*;
