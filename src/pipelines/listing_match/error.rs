use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::fetch::FetchError;

/// A problem with the pipeline's configuration
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The provided configuration is not valid for a listing-match job
    #[error("invalid listing-match configuration")]
    Manifest(#[from] toml::de::Error),
}

/// A problem with the structure of the listing page
#[derive(Error, Debug)]
pub enum TableError {
    /// The page has no table to scan
    #[error("the listing page does not contain a table")]
    NoTable,
}

/// An error during the listing-match job's execution
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// A network error or non-success response during either fetch
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The listing page could not be interpreted
    #[error(transparent)]
    Table(#[from] TableError),
    /// No data row contains a cell equal to the target value
    #[error("no row in the listing matches `{0}`")]
    NoMatch(String),
    /// The output directory escapes the project root
    #[error("`{}` is outside the project root", .0.display())]
    OutsideRoot(PathBuf),
    /// An error accessing the local file for the download
    #[error("file I/O error while saving the download")]
    File(#[from] io::Error),
}

/// A result with a config error in it
pub type ManifestResult<T> = Result<T, ManifestError>;

/// A result with an execution error in it
pub type ExecutionResult<T> = Result<T, ExecutionError>;
