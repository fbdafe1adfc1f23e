//! Markov-chain name generation library.
//!
//! This crate builds order-1 character-level Markov chains from namesets
//! (lists of example names) and samples new, plausible-looking names from
//! them, including:
//! - Frequency counting with a superlinear scaling transform that biases
//!   generation toward common patterns
//! - Weighted (inverse-CDF) sampling with an injectable random source
//! - A nameset registry with a build-once, never-evicted chain cache
//! - Corpus file loading with binary chain snapshots
//!
//! ```no_run
//! use namegen_core::{NameGenerator, DEFAULT_NAMESET};
//!
//! # fn main() -> namegen_core::Result<()> {
//! let mut generator = NameGenerator::with_defaults();
//! let name = generator.generate(DEFAULT_NAMESET)?;
//! println!("{name}");
//! # Ok(())
//! # }
//! ```

/// Core chain model and generation logic.
///
/// This module exposes the chain, its distributions and the high-level
/// generation service.
pub mod model;

/// Error types shared across the crate.
pub mod error;

/// Corpus file utilities (reading, directory listing, snapshot paths).
pub mod io;

pub use error::{NameGenError, Result};
pub use model::chain::{Chain, ChainBuilder, FALLBACK_CHAR};
pub use model::distribution::Distribution;
pub use model::generator::{DEFAULT_NAMESET, NameGenerator};
