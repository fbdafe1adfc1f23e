//! Top-level module for the Markov name generation system.
//!
//! This module provides an order-1 character-level chain model, including:
//! - Insertion-ordered weighted token distributions (`Distribution`)
//! - The trained chain model and its builder (`Chain`, `ChainBuilder`)
//! - A high-level generation service (`NameGenerator`)

/// Weighted token distribution of one chain category.
///
/// Tracks observation counts, applies the scaling transform and supports
/// weighted random sampling in first-insertion order.
pub mod distribution;

/// The trained chain model.
///
/// Handles training-entry ingestion, count scaling, name synthesis and
/// binary snapshots.
pub mod chain;

/// High-level generation service.
///
/// Exposes the nameset registry, the build-once chain cache and the
/// name generation entry points.
pub mod generator;
