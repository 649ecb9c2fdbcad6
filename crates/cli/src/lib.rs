//! CLI tool for inspecting token rings and replica placement.
//!
//! Provides commands for:
//! - Hashing partition keys into tokens
//! - Resolving the replicas of a token or key from a topology file
//! - Printing the sorted ring of a topology file

pub mod commands;
pub mod config;

pub use commands::TopologyFile;
pub use config::{CliConfig, Command, Target};
