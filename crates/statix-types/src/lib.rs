//! # statix-types
//!
//! Shared error types and solver defaults for the Statix
//! static-equilibrium solver.
//!
//! This crate has zero numerical logic: it defines the vocabulary
//! that all other Statix crates share.

pub mod constants;
pub mod error;

pub use error::{StatixError, StatixResult};
