//! The `archive-batch` pipeline: downloads a list of ZIP archives, extracts each one into the
//! output directory, and removes the archive afterwards.

use std::sync::Arc;

use async_trait::async_trait;
use derive_more::Debug;

use crate::fetch::url_file_name;
use crate::log;
use crate::pipeline::{DynError, Pipeline};
use crate::world::{World as _, WorldExt as _};

mod error;
mod factory;
mod manifest;
#[cfg(not(feature = "test"))]
mod world;
#[cfg(feature = "test")]
pub mod world;

use manifest::*;
use world::World;

pub use error::*;
pub use factory::ArchiveBatchFactory;
pub use world::DefaultWorld;
#[cfg(feature = "test")]
pub use world::{__mock_MockWorld_World::__new::Context as MockWorld_NewContext, MockWorld};

/// The `archive-batch` pipeline
#[derive(Debug)]
pub struct ArchiveBatch<W: World> {
    #[debug(skip)]
    world: Arc<W>,
    name: String,
    manifest: Manifest,
}

impl<W: World> ArchiveBatch<W> {
    pub(crate) fn new(world: Arc<W>, name: String, manifest: Manifest) -> Self {
        Self {
            world,
            name,
            manifest,
        }
    }

    /// Downloads, extracts and cleans up each configured URL in turn. A non-success response is
    /// a soft failure: it is logged and the remaining URLs are still processed. All other
    /// failures abort the job.
    async fn run_impl(&mut self) -> ExecutionResult<()> {
        let mut l = self.world.main().log();
        let name = self.name.as_str();

        let dir = self
            .world
            .main()
            .resolve(&self.manifest.dir)
            .ok_or_else(|| ExecutionError::OutsideRoot(self.manifest.dir.clone()))?;
        self.world.ensure_dir(&dir).await?;

        let total = self.manifest.urls.len();
        let mut failures = 0usize;
        for url in &self.manifest.urls {
            let file_name = url_file_name(url)
                .ok_or_else(|| ExecutionError::FileName(url.clone()))?;
            let path = dir.join(file_name);

            log!(l, "[{name}] downloading {file_name}...");
            let response = self.world.main().fetch(url).await?;
            if !response.is_success() {
                log!(
                    l,
                    "[{name}] failed to download {file_name}: status {}",
                    response.status()
                );
                failures += 1;
                continue;
            }

            self.world.write_file(&path, &response.into_body()).await?;
            self.world.extract_archive(&path, &dir).await?;
            log!(l, "[{name}] extracted {file_name}");
            self.world.remove_file(&path).await?;
            log!(l, "[{name}] removed archive {file_name}");
        }

        if failures == 0 {
            log!(l, "[{name}] all downloads processed");
        } else {
            log!(l, "[{name}] all downloads processed, {failures} of {total} failed");
        }

        Ok(())
    }
}

#[async_trait]
impl<W: World> Pipeline<W::MainWorld> for ArchiveBatch<W> {
    fn world(&self) -> &Arc<W::MainWorld> {
        self.world.main()
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&mut self) -> Result<(), DynError> {
        self.run_impl().await.map_err(Box::new)?;
        Ok(())
    }
}
