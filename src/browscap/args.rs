use browscap::filter::Flavor;
use browscap::formatter::FormatterKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "browscap")]
#[command(about = "Compile a browser capability database into a user-agent lookup artifact", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a resource tree into an artifact
    #[command(alias = "b")]
    Build {
        /// Root of the resource tree
        resources: PathBuf,

        /// Write the artifact here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Property set to emit: full, standard or lite
        #[arg(long, default_value = "full")]
        flavor: Flavor,

        /// Escaping applied to property names and values: json or xml
        #[arg(long, default_value = "json")]
        format: FormatterKind,

        /// Data version stamped into the header
        #[arg(long)]
        data_version: Option<String>,

        /// Release date text stamped into the header
        #[arg(long, conflicts_with = "released_now")]
        released: Option<String>,

        /// Stamp the current time as the release date
        #[arg(long)]
        released_now: bool,

        /// Gzip the artifact (implied by an output path ending in .gz)
        #[arg(long)]
        gzip: bool,
    },

    /// Validate a resource tree without writing anything
    #[command(alias = "c")]
    Check {
        /// Root of the resource tree
        resources: PathBuf,
    },
}
