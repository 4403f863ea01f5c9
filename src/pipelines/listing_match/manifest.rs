use std::path::PathBuf;

use serde::Deserialize;

/// Auxiliary configuration for the pipeline
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// The listing page to scan. Matched file names are appended to this URL to form download
    /// URLs.
    pub url: String,

    /// The cell value to look for, e.g. a file size rendered as text.
    pub target: String,

    /// The directory the matched file is saved to, relative to the project root.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// How many leading table rows are headers rather than data. The scraped listing pages
    /// put a separator row below the header row, so the default skips two.
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
}

fn default_dir() -> PathBuf {
    "download".into()
}

fn default_header_rows() -> usize {
    2
}
