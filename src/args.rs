//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

/// datafetch args
#[derive(Debug, Clone, Parser)]
#[clap(version, about)]
pub struct CliArguments {
    /// Configures the project root (relative output directories are resolved against it)
    #[clap(long = "root", value_name = "DIR", env = "DATAFETCH_ROOT")]
    pub root: Option<PathBuf>,

    /// Path to the fetch manifest. Relative output directories are resolved against the
    /// manifest's directory unless `--root` is given.
    #[clap(value_name = "CONFIG", default_value = "datafetch.toml")]
    pub config: PathBuf,
}
