//! Abstracts an execution environment pipelines can run in.
//! The world mediates access to the network, the fetch manifest, and progress reporting.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use clap::Parser;
use itertools::{Either, Itertools};

use crate::args::CliArguments;
use crate::error::MultiplePipelineConfigError;
use crate::fetch::{FetchError, FetchResponse};
use crate::manifest::{self, FetchManifest};
use crate::pipeline::{BoxedPipeline, PipelineMap};
use crate::reporting::Log;

/// The context for executing pipelines.
#[cfg_attr(feature = "test", mockall::automock(type Logger = crate::test_utils::VecLog;))]
#[async_trait]
pub trait World: Send + Sync + 'static {
    /// The Logger type used by this world
    type Logger: Log;

    /// Map of pipelines existing in this World
    fn pipelines(&self) -> &PipelineMap<Self>
    where
        Self: Sized;

    /// The arguments given to the invocation
    fn arguments(&self) -> &CliArguments;

    /// The log to which to write progress updates and errors.
    /// This method returns an owned value; usually it will actually be a _handle_ to the actual
    /// logger.
    fn log(&self) -> Self::Logger;

    /// Reads the fetch manifest named by the invocation's arguments.
    async fn read_manifest(&self) -> manifest::Result<FetchManifest>;

    /// Issues one GET request and reads the full response. The connection is scoped to this
    /// call; a non-success status is reported in the returned [FetchResponse], not as an error.
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

/// The context for executing pipelines; provided methods that don't need to be customized
/// between environments.
pub trait WorldExt: World {
    /// returns the root path. This is either the explicitly given root or the directory in
    /// which the manifest file is located. If the manifest path only consists of a file name,
    /// the current directory is the root. In general, this function does not return an absolute
    /// path.
    fn resolve_root(&self) -> &Path {
        if let Some(root) = &self.arguments().root {
            // a root was explicitly given
            root
        } else if let Some(root) = self.arguments().config.parent() {
            // the root is the directory of the manifest file
            root
        } else {
            // the manifest path has no parent, which means it is the current directory
            Path::new(".")
        }
    }

    /// Resolve the virtual path relative to an actual file system root
    /// (where the project resides).
    ///
    /// Returns `None` if the path lexically escapes the root. The path might
    /// still escape through symlinks.
    fn resolve(&self, path: &Path) -> Option<PathBuf> {
        let root = self.resolve_root();
        let root_len = root.as_os_str().len();
        let mut out = root.to_path_buf();
        for component in path.components() {
            match component {
                Component::Prefix(_) => {}
                Component::RootDir => {}
                Component::CurDir => {}
                Component::ParentDir => {
                    let result = out.pop();
                    if !result || out.as_os_str().len() < root_len {
                        return None;
                    }
                }
                Component::Normal(_) => out.push(component),
            }
        }
        Some(out)
    }

    /// Tries to configure all pipelines in this manifest. Fails if any pipelines can not be
    /// configured.
    fn get_pipelines(
        self: &Arc<Self>,
        manifest: FetchManifest,
    ) -> Result<Vec<BoxedPipeline<Self>>, MultiplePipelineConfigError>
    where
        Self: Sized,
    {
        let (jobs, errors): (Vec<_>, Vec<_>) = manifest.jobs.into_iter().partition_map(|job| {
            match self.pipelines().get(self, job) {
                Ok(value) => Either::Left(value),
                Err(err) => Either::Right(err),
            }
        });

        if !errors.is_empty() {
            return Err(MultiplePipelineConfigError::new(errors));
        }

        Ok(jobs)
    }
}

impl<T: World> WorldExt for T {}

/// The default context, accessing the real web, filesystem, etc.
pub struct DefaultWorld {
    pipelines: PipelineMap<Self>,
    arguments: CliArguments,
}

impl Default for DefaultWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultWorld {
    /// Creates the default world from the process's command line arguments.
    pub fn new() -> Self {
        Self::with_arguments(CliArguments::parse())
    }

    /// Creates the default world with explicitly given arguments.
    pub fn with_arguments(arguments: CliArguments) -> Self {
        let mut pipelines = PipelineMap::default();
        pipelines.register(crate::archive_batch::ArchiveBatchFactory::default());
        pipelines.register(crate::listing_match::ListingMatchFactory::default());
        Self {
            pipelines,
            arguments,
        }
    }
}

#[async_trait]
impl World for DefaultWorld {
    type Logger = std::io::Stderr;

    fn pipelines(&self) -> &PipelineMap<Self> {
        &self.pipelines
    }

    fn arguments(&self) -> &CliArguments {
        &self.arguments
    }

    fn log(&self) -> Self::Logger {
        std::io::stderr()
    }

    async fn read_manifest(&self) -> manifest::Result<FetchManifest> {
        let manifest = FetchManifest::read(&self.arguments().config).await?;
        Ok(manifest)
    }

    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let response = reqwest::get(url).await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(FetchResponse::new(status, body))
    }
}
