//! Lock-free publication of token maps.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use arc_swap::ArcSwap;
use corelib::Host;
use tracing::debug;

use crate::keyspace::KeyspaceMetadata;
use crate::token_map::TokenMap;

/// The current [`TokenMap`] of a cluster.
///
/// Readers [`load`](Self::load) a snapshot and query it for as long as they
/// like; a concurrent [`store`](Self::store) only affects later loads.
#[derive(Debug)]
pub struct SharedTokenMap {
    current: ArcSwap<TokenMap>,
}

impl SharedTokenMap {
    pub fn new(map: TokenMap) -> Self {
        Self {
            current: ArcSwap::from_pointee(map),
        }
    }

    pub fn load(&self) -> Arc<TokenMap> {
        self.current.load_full()
    }

    /// Replaces the published map.
    pub fn store(&self, map: TokenMap) {
        self.current.store(Arc::new(map));
    }

    /// Builds a map from a new topology snapshot and publishes it.
    ///
    /// On error the previously published map stays in place.
    pub fn rebuild(
        &self,
        partitioner: &str,
        tokens_by_host: &HashMap<Arc<Host>, HashSet<String>>,
        keyspaces: impl IntoIterator<Item = KeyspaceMetadata>,
    ) -> corelib::Result<()> {
        let map = TokenMap::build(partitioner, tokens_by_host, keyspaces)?;
        debug!(entries = map.ring().len(), "Publishing rebuilt token map");
        self.store(map);
        Ok(())
    }
}
