//! # macseal-canonical
//!
//! Deterministic JSON serialization for MAC signing.
//!
//! A payload is signed once and verified later, after the client has parsed,
//! stored, and re-transmitted it. Verification only succeeds if both sides
//! serialize the logical value to exactly the same bytes, so this crate
//! defines the one canonical encoding both paths use.
//!
//! ## Canonical JSON Rules
//!
//! 1. Object keys sorted lexicographically by UTF-8 bytes
//! 2. Arrays preserve insertion order
//! 3. No whitespace
//! 4. UTF-8 encoding; `"` `\` and control characters escaped with one fixed
//!    convention
//! 5. Integers in decimal, floats in shortest round-trip decimal form
//!
//! ## Example
//!
//! ```rust
//! use macseal_canonical::to_canonical_json_string;
//!
//! let value = serde_json::json!({"b": 1, "a": 2});
//! let canonical = to_canonical_json_string(&value).unwrap();
//! assert_eq!(canonical, r#"{"a":2,"b":1}"#);
//! ```

mod canonical;
mod error;

pub use canonical::*;
pub use error::*;
