use std::path::PathBuf;

use serde::Deserialize;

/// Auxiliary configuration for the pipeline
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// The archives to download, in order.
    pub urls: Vec<String>,

    /// The directory archives are downloaded to and extracted into, relative to the project
    /// root.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

fn default_dir() -> PathBuf {
    "downloads".into()
}
