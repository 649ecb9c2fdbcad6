//! Command execution.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use corelib::{Host, TokenFactory, Topology};
use replication::{KeyspaceMetadata, TokenMap};
use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::{key_bytes, CliConfig, Command, Target};

/// Contents of a topology file: a [`Topology`] plus the cluster's keyspaces.
#[derive(Debug, Clone, Deserialize)]
pub struct TopologyFile {
    #[serde(flatten)]
    pub topology: Topology,
    #[serde(default)]
    pub keyspaces: Vec<KeyspaceMetadata>,
}

impl TopologyFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read topology file {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to load topology file {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn token_map(&self) -> anyhow::Result<TokenMap> {
        TokenMap::from_topology(&self.topology, self.keyspaces.iter().cloned())
            .context("Failed to build token map")
    }
}

impl CliConfig {
    pub fn run(self) -> anyhow::Result<()> {
        init_tracing(self.verbose);
        let stdout = io::stdout();
        self.command.execute(&mut stdout.lock())
    }
}

impl Command {
    pub fn execute(&self, out: &mut impl Write) -> anyhow::Result<()> {
        match self {
            Command::Hash {
                partitioner,
                hex,
                key,
            } => {
                let factory = TokenFactory::from_class_name(partitioner)?;
                writeln!(out, "{}", factory.hash(&key_bytes(key, *hex)?))?;
            }
            Command::Replicas {
                topology,
                keyspace,
                token,
                key,
                hex,
            } => {
                let map = TopologyFile::load(topology)?.token_map()?;
                let target = Target::from_args(token.as_deref(), key.as_deref(), *hex)?;
                for host in replicas(&map, keyspace.as_deref(), &target)? {
                    writeln!(out, "{}", describe(&host))?;
                }
            }
            Command::Ring { topology } => {
                let map = TopologyFile::load(topology)?.token_map()?;
                print_ring(&map, out)?;
            }
        }
        Ok(())
    }
}

/// Replicas of a token string or a raw partition key.
pub fn replicas(
    map: &TokenMap,
    keyspace: Option<&str>,
    target: &Target,
) -> anyhow::Result<Vec<Arc<Host>>> {
    let token = match target {
        Target::Token(text) => map
            .factory()
            .parse(text)
            .with_context(|| format!("Invalid {} token {:?}", map.factory().name(), text))?,
        Target::Key(bytes) => map.factory().hash(bytes),
    };
    debug!(%token, "Resolving replicas");
    Ok(map.get_replicas(keyspace, token)?)
}

pub fn print_ring(map: &TokenMap, out: &mut impl Write) -> anyhow::Result<()> {
    for vnode in map.ring().iter() {
        writeln!(out, "{}\t{}", vnode.token, describe(&vnode.host))?;
    }
    Ok(())
}

fn describe(host: &Host) -> String {
    match (&host.datacenter, &host.rack) {
        (Some(dc), Some(rack)) => format!("{}\t{}\t{}", host.address, dc, rack),
        (Some(dc), None) => format!("{}\t{}", host.address, dc),
        _ => host.address.to_string(),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
