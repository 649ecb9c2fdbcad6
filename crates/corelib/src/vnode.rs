//! Virtual node abstractions.
//!
//! A host usually owns many tokens (virtual nodes). Each of them becomes one
//! entry of the ring; replica selection walks entries but deduplicates by
//! host, so a host never counts twice because of its vnodes.

use std::sync::Arc;

use crate::host::Host;
use crate::ring::RingPosition;

/// A virtual node on the hash ring: one token owned by one host.
///
/// # Invariants
///
/// Within a built ring every `VirtualNode` has a unique token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualNode {
    /// Token position on the ring.
    pub token: RingPosition,

    /// The physical host that owns this virtual node.
    pub host: Arc<Host>,
}

impl VirtualNode {
    #[inline]
    pub fn new(token: RingPosition, host: Arc<Host>) -> Self {
        Self { token, host }
    }

    #[inline]
    pub fn token(&self) -> &RingPosition {
        &self.token
    }

    #[inline]
    pub fn host(&self) -> &Arc<Host> {
        &self.host
    }
}

impl std::fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VNode(token={}, host={})", self.token, self.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Murmur3Token;

    #[test]
    fn test_vnode_creation() {
        let host = Arc::new(Host::new("10.0.0.1".parse().unwrap()));
        let vnode = VirtualNode::new(Murmur3Token(100).into(), Arc::clone(&host));
        assert_eq!(vnode.token(), &RingPosition::Murmur3(Murmur3Token(100)));
        assert_eq!(vnode.host(), &host);
        assert_eq!(vnode.to_string(), "VNode(token=100, host=10.0.0.1)");
    }
}
