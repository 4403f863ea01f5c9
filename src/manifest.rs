//! Configuration types

use std::path::Path;

use serde::Deserialize;
use tokio::fs;
use toml::Table;

pub use error::*;

/// The complete fetch manifest, usually read from a `datafetch.toml` file. It is normally
/// written as multiple `[[jobs]]` entries.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct FetchManifest {
    /// The fetch jobs to execute
    pub jobs: Vec<Job>,
}

/// A single fetch job. A job downloads one or more remote resources and writes them into a
/// directory under the project root.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Job {
    /// The job's name (for human consumption, e.g. in logs)
    pub name: String,
    /// Identifier of the pipeline that should be run
    pub kind: String,
    /// Arbitrary additional manifest for the job
    #[serde(flatten)]
    pub manifest: Table,
}

impl FetchManifest {
    /// Given the contents of a manifest file, parses the jobs.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest = toml::from_str(content)?;
        Ok(manifest)
    }

    /// Reads and parses the given manifest file.
    pub async fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let manifest = Self::parse(&content)?;
        Ok(manifest)
    }
}

mod error {
    use std::io;

    use thiserror::Error;

    /// Errors that can occur when reading a fetch manifest
    #[derive(Error, Debug)]
    pub enum Error {
        /// An I/O error occurred reading the manifest file
        #[error("fetch manifest file could not be read")]
        Io(#[from] io::Error),
        /// The manifest file contains invalid config data
        #[error("fetch manifest is not a valid job configuration")]
        Invalid(#[from] toml::de::Error),
    }

    /// Result type alias that defaults error to [enum@Error].
    pub type Result<T, E = Error> = std::result::Result<T, E>;
}
