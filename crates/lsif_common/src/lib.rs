//! Shared foundational types used across the LSIF hover pipeline.
//!
//! This crate provides the canonical vertex/edge identifier and the content
//! hash used to verify cached entries.

#![warn(missing_docs)]

pub mod hash;
pub mod id;

pub use hash::ContentHash;
pub use id::{Id, ParseIdError};
