//! Nullable infrastructure for deterministic testing.
//!
//! The pool's external collaborators (clock, asset ledger) are abstracted
//! behind traits. This crate provides in-memory implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests and in the simulator.

pub mod assets;
pub mod clock;

pub use assets::NullAssetLedger;
pub use clock::NullClock;
