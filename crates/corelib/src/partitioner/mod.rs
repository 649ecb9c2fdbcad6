//! Partitioner abstraction for consistent hashing.
//!
//! Partitioners are responsible for converting serialized partition keys into
//! tokens that can be placed on the hash ring. [`TokenFactory`] picks one of
//! them from the class name a cluster reports.

pub mod byte_ordered;
pub mod factory;
pub mod murmur3;
pub mod random;
pub mod traits;

pub use byte_ordered::ByteOrderedPartitioner;
pub use factory::TokenFactory;
pub use murmur3::{Murmur3Hasher, Murmur3Partitioner};
pub use random::RandomPartitioner;
pub use traits::Partitioner;
