//! Prelude module for bikram_sambat crate.
//!
//! Re-exports the derive macros from derive_more used across the crate.

pub use derive_more::Display;
