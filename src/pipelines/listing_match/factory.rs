use std::borrow::Cow;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::pipeline::{BoxedPipeline, PipelineDefinition};

use super::world::{DefaultWorld, World};
use super::{ListingMatch, Manifest, ManifestError, ManifestResult};

/// The `listing-match` pipeline factory
#[derive(Debug, Clone, Copy)]
pub struct ListingMatchFactory<W> {
    _w: PhantomData<W>,
}

impl Default for ListingMatchFactory<DefaultWorld> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: World> ListingMatchFactory<W> {
    /// Creates a factory with the given world.
    pub fn new() -> Self {
        Self { _w: PhantomData }
    }

    fn parse_manifest(manifest: toml::Table) -> ManifestResult<Manifest> {
        let manifest = manifest.try_into()?;
        Ok(manifest)
    }
}

impl<W: World> PipelineDefinition<W::MainWorld> for ListingMatchFactory<W> {
    type Error = ManifestError;

    fn name(&self) -> Cow<'static, str> {
        "listing-match".into()
    }

    fn configure(
        &self,
        world: &Arc<W::MainWorld>,
        name: String,
        manifest: toml::Table,
    ) -> ManifestResult<BoxedPipeline<W::MainWorld>> {
        let world = Arc::new(W::new(world.clone()));
        let manifest = Self::parse_manifest(manifest)?;
        let instance = ListingMatch::new(world, name, manifest);
        Ok(Box::new(instance))
    }
}
