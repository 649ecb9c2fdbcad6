//! Consistent hash ring implementation.
//!
//! The ring manages token positions and provides efficient lookup
//! operations for finding hosts responsible for tokens.

pub mod position;
#[allow(clippy::module_inception)]
pub mod ring;

pub use position::RingPosition;
pub use ring::{HashRing, RingBuilder};

/// Alias for the main ring type (used by lib.rs).
pub type Ring = HashRing;
