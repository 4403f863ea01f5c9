//! The pipeline abstraction and management of configured pipelines

use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinError;

use crate::world::World;

mod factory;

pub use factory::*;

/// A dynamically typed error, used at the seam between pipelines and the entry point
pub type DynError = Box<dyn Error + Send + Sync>;

/// A configured pipeline that can be executed for its side effects
#[cfg_attr(feature = "test", mockall::automock)]
#[async_trait]
pub trait Pipeline<W: World>: Send {
    /// The world this pipeline runs in
    fn world(&self) -> &Arc<W>;

    /// The job's name (for progress reporting)
    fn name(&self) -> &str;

    /// Executes this pipeline
    async fn run(&mut self) -> Result<(), DynError>;
}

/// A dynamically dispatched, boxed pipeline
pub type BoxedPipeline<W> = Box<dyn Pipeline<W>>;

/// Why a pipeline could not be created from a job
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The job's kind is not registered
    #[error("unknown pipeline kind `{0}`")]
    Unknown(String),
    /// The job's manifest was not valid for its kind
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// A pipeline-specific configuration failure, tagged with the pipeline kind
#[derive(Error, Debug)]
#[error("the `{kind}` pipeline could not be configured")]
pub struct ManifestError {
    kind: std::borrow::Cow<'static, str>,
    source: DynError,
}

impl ManifestError {
    /// Creates a new error
    pub fn new<E>(kind: std::borrow::Cow<'static, str>, error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            kind,
            source: Box::new(error),
        }
    }
}

/// A result with a config error in it
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A pipeline execution failure, as collected by the entry point
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The pipeline itself failed
    #[error("job `{name}` failed")]
    Failed {
        /// The job's name
        name: String,
        /// The pipeline's own error
        source: DynError,
    },
    /// The task the pipeline ran on failed
    #[error("waiting for a job task failed")]
    Join(#[from] JoinError),
}

impl ExecutionError {
    /// Creates an error for a failed job
    pub fn failed(name: String, source: DynError) -> Self {
        Self::Failed { name, source }
    }
}
