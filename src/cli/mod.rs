pub mod completions;
pub mod init;
pub mod inspect;
pub mod list;
pub mod pack;

use clap::{Parser, Subcommand};

/// objgroup - Schematic object group packer
#[derive(Parser, Debug)]
#[command(name = "objgroup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only print warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load, expand and filter every group, then write a bundle
    Pack(pack::PackArgs),

    /// Print the groups stored in a bundle
    Inspect(inspect::InspectArgs),

    /// List the groups found in a pack
    List(list::ListArgs),

    /// Initialize a pack (generates pack.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
