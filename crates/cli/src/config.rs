//! Command line configuration.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use corelib::token::{ByteOrderedToken, Token};

#[derive(Debug, Parser)]
#[command(name = "tokenmap", author, version, about = "Token ring and replica placement inspector")]
pub struct CliConfig {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the token of a partition key.
    Hash {
        /// Partitioner class name, short or fully qualified.
        #[arg(long, default_value = "Murmur3Partitioner")]
        partitioner: String,
        /// Treat KEY as hex-encoded bytes instead of UTF-8 text.
        #[arg(long)]
        hex: bool,
        key: String,
    },

    /// Print the replicas of a token or key, primary first.
    Replicas {
        /// JSON topology file with hosts, tokens and keyspaces.
        #[arg(long)]
        topology: PathBuf,
        /// Keyspace whose strategy is applied; primary only when omitted.
        #[arg(long)]
        keyspace: Option<String>,
        /// Token in the partitioner's textual format.
        #[arg(long, conflicts_with = "key", required_unless_present = "key")]
        token: Option<String>,
        /// Partition key to hash.
        #[arg(long)]
        key: Option<String>,
        /// Treat --key as hex-encoded bytes.
        #[arg(long, requires = "key")]
        hex: bool,
    },

    /// Print every ring entry in token order.
    Ring {
        #[arg(long)]
        topology: PathBuf,
    },
}

/// What a replica lookup is keyed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Token(String),
    Key(Vec<u8>),
}

impl Target {
    pub fn from_args(token: Option<&str>, key: Option<&str>, hex: bool) -> anyhow::Result<Self> {
        match (token, key) {
            (Some(token), _) => Ok(Target::Token(token.to_owned())),
            (None, Some(key)) => Ok(Target::Key(key_bytes(key, hex)?)),
            (None, None) => anyhow::bail!("either --token or --key is required"),
        }
    }
}

/// Raw partition key bytes from a command line argument.
pub fn key_bytes(key: &str, hex: bool) -> anyhow::Result<Vec<u8>> {
    if hex {
        let decoded = ByteOrderedToken::parse(key)
            .with_context(|| format!("Invalid hex key {:?}", key))?;
        Ok(decoded.0)
    } else {
        Ok(key.as_bytes().to_vec())
    }
}
