//! The `listing-match` pipeline: scans an HTML directory-listing page for the row describing a
//! file with a known cell value (typically its size rendered as text), then downloads that file.

use std::sync::Arc;

use async_trait::async_trait;
use derive_more::Debug;

use crate::fetch::join_url;
use crate::log;
use crate::pipeline::{DynError, Pipeline};
use crate::world::{World as _, WorldExt as _};

mod error;
mod factory;
mod manifest;
#[cfg(not(feature = "test"))]
mod table;
#[cfg(feature = "test")]
pub mod table;
mod world;

use manifest::*;
use table::ListingTable;
use world::World;

pub use error::*;
pub use factory::ListingMatchFactory;
pub use world::DefaultWorld;
#[cfg(feature = "test")]
pub use world::{__mock_MockWorld_World::__new::Context as MockWorld_NewContext, MockWorld};

/// The `listing-match` pipeline
#[derive(Debug)]
pub struct ListingMatch<W: World> {
    #[debug(skip)]
    world: Arc<W>,
    name: String,
    manifest: Manifest,
}

impl<W: World> ListingMatch<W> {
    pub(crate) fn new(world: Arc<W>, name: String, manifest: Manifest) -> Self {
        Self {
            world,
            name,
            manifest,
        }
    }

    /// Fetches and parses the listing, finds the first matching row, and downloads the file it
    /// names. Every failure here is fatal for the job: there is no meaningful way to continue
    /// without a match.
    async fn run_impl(&mut self) -> ExecutionResult<()> {
        let mut l = self.world.main().log();
        let name = self.name.as_str();

        log!(l, "[{name}] fetching listing {}...", self.manifest.url);
        let page = self
            .world
            .main()
            .fetch(&self.manifest.url)
            .await?
            .success(&self.manifest.url)?;
        let page = String::from_utf8_lossy(&page);

        let table = ListingTable::parse(&page, self.manifest.header_rows)?;
        let found = table
            .find(&self.manifest.target)
            .ok_or_else(|| ExecutionError::NoMatch(self.manifest.target.clone()))?;
        log!(l, "[{name}] match found: {:?}", found.cells);

        let url = join_url(&self.manifest.url, &found.file_name);
        log!(l, "[{name}] downloading {url}...");
        let body = self.world.main().fetch(&url).await?.success(&url)?;

        let dir = self
            .world
            .main()
            .resolve(&self.manifest.dir)
            .ok_or_else(|| ExecutionError::OutsideRoot(self.manifest.dir.clone()))?;
        self.world.ensure_dir(&dir).await?;

        let path = dir.join(&found.file_name);
        self.world.write_file(&path, &body).await?;
        log!(l, "[{name}] saved {}", path.display());

        Ok(())
    }
}

#[async_trait]
impl<W: World> Pipeline<W::MainWorld> for ListingMatch<W> {
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
