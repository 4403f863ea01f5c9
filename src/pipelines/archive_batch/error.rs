use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tokio::task::JoinError;

use crate::fetch::FetchError;

/// A problem with the pipeline's configuration
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The provided configuration is not valid for an archive-batch job
    #[error("invalid archive-batch configuration")]
    Manifest(#[from] toml::de::Error),
}

/// An error during extracting a downloaded archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// An error accessing local files during extraction
    #[error("file I/O error during extraction")]
    Io(#[from] io::Error),
    /// The downloaded file could not be read as a ZIP archive, e.g. because the server sent an
    /// error page instead of the archive
    #[error("the downloaded file is not a valid ZIP archive")]
    Zip(#[from] zip::result::ZipError),
    /// An error while waiting for the extraction to finish
    #[error("waiting for the extraction task failed")]
    Join(#[from] JoinError),
}

/// An error during the archive-batch job's execution
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// No file name could be derived from a configured URL
    #[error("cannot derive a file name from URL `{0}`")]
    FileName(String),
    /// The output directory escapes the project root
    #[error("`{}` is outside the project root", .0.display())]
    OutsideRoot(PathBuf),
    /// A network error during a download
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// An error accessing the local file for a download
    #[error("file I/O error during download")]
    File(#[from] io::Error),
    /// An error during extracting a downloaded archive
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// A result with a config error in it
pub type ManifestResult<T> = Result<T, ManifestError>;

/// A result with an execution error in it
pub type ExecutionResult<T> = Result<T, ExecutionError>;
