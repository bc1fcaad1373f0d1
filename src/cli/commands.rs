//! CLI commands and argument parsing

use crate::instances::InstanceType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Data-modeling API client
#[derive(Parser, Debug)]
#[command(name = "dms-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML); DMS_* environment variables override it
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Call any project-relative endpoint, following cursors
    Fetch {
        /// HTTP method (GET or POST)
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Path below the project, e.g. /models/spaces
        path: String,

        /// Parameters as a JSON object; include "limit" to get a single page
        #[arg(long)]
        params: Option<String>,
    },

    /// List nodes or edges
    List {
        /// Only instances in this space
        #[arg(long)]
        space: Option<String>,

        /// Node or edge
        #[arg(long, value_enum, default_value = "node")]
        instance_type: InstanceTypeArg,

        /// Return a single page of at most this many instances
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Retrieve instances by external id
    Retrieve {
        /// Space of the instances
        #[arg(long)]
        space: String,

        /// External ids
        #[arg(required = true)]
        ids: Vec<String>,

        /// The ids are edges
        #[arg(long)]
        edge: bool,
    },

    /// Delete instances by external id
    Delete {
        /// Space of the instances
        #[arg(long)]
        space: String,

        /// External ids
        #[arg(required = true)]
        ids: Vec<String>,

        /// The ids are edges
        #[arg(long)]
        edge: bool,
    },
}

/// Instance type argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InstanceTypeArg {
    Node,
    Edge,
}

impl From<InstanceTypeArg> for InstanceType {
    fn from(arg: InstanceTypeArg) -> Self {
        match arg {
            InstanceTypeArg::Node => InstanceType::Node,
            InstanceTypeArg::Edge => InstanceType::Edge,
        }
    }
}

/// Map a boolean `--edge` flag to an instance type
pub fn instance_type_for(edge: bool) -> InstanceType {
    if edge {
        InstanceType::Edge
    } else {
        InstanceType::Node
    }
}
