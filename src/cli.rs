use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Query the tenant-scoped cloud-asset inventory
#[derive(Parser, Debug)]
#[command(name = "asset-sidecar")]
#[command(version)]
#[command(
    about = "Compliance scores, related assets and asset state counts for a multi-tenant cloud-asset inventory",
    long_about = None
)]
pub struct Args {
    /// Path to the config file (defaults to ./asset-sidecar.config.yml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Overall request deadline in seconds (overrides request_timeout_secs)
    #[arg(short, long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Pretty-print the JSON response
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Score one asset against its target type's enabled policies
    Compliance(AssetArgs),
    /// List the first-hop related assets of one asset
    RelatedAssets(AssetArgs),
    /// Count the assets of an asset group per lifecycle state
    AssetStates(AssetGroupArgs),
}

#[derive(ClapArgs, Debug, Clone, PartialEq, Eq)]
pub struct AssetArgs {
    /// Tenant id
    #[arg(long)]
    pub tenant: String,

    /// Target type of the asset (e.g. ec2)
    #[arg(long)]
    pub target_type: String,

    /// Internal id of the asset document
    #[arg(long)]
    pub asset_id: String,
}

#[derive(ClapArgs, Debug, Clone, PartialEq, Eq)]
pub struct AssetGroupArgs {
    /// Tenant id
    #[arg(long)]
    pub tenant: String,

    /// Asset group: a cloud provider, ds-all, * or an index alias
    #[arg(long)]
    pub asset_group: String,

    /// Restrict to target types of this domain
    #[arg(long)]
    pub domain: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
