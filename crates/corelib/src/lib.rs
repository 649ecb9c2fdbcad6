//! Core library for token-aware replica resolution.
//!
//! This crate provides the fundamental abstractions for consistent hashing:
//! - Token types and implementations
//! - Partitioner algorithms (Murmur3, Random, ByteOrdered)
//! - Hosts and virtual nodes
//! - The immutable token ring and its lookups
//! - Topology snapshots the ring is built from

pub mod error;
pub mod host;
pub mod partitioner;
pub mod ring;
pub mod token;
pub mod topology;
pub mod vnode;

pub use error::{Error, Result};
pub use host::Host;
pub use partitioner::{Partitioner, TokenFactory};
pub use ring::{Ring, RingBuilder, RingPosition};
pub use token::Token;
pub use topology::{HostTokens, Topology};
pub use vnode::VirtualNode;
