use std::borrow::Cow;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::pipeline::{BoxedPipeline, PipelineDefinition};

use super::world::{DefaultWorld, World};
use super::{ArchiveBatch, Manifest, ManifestError, ManifestResult};

/// The `archive-batch` pipeline factory
#[derive(Debug, Clone, Copy)]
pub struct ArchiveBatchFactory<W> {
    _w: PhantomData<W>,
}

impl Default for ArchiveBatchFactory<DefaultWorld> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: World> ArchiveBatchFactory<W> {
    /// Creates a factory with the given world.
    pub fn new() -> Self {
        Self { _w: PhantomData }
    }

    fn parse_manifest(manifest: toml::Table) -> ManifestResult<Manifest> {
        let manifest = manifest.try_into()?;
        Ok(manifest)
    }
}

impl<W: World> PipelineDefinition<W::MainWorld> for ArchiveBatchFactory<W> {
    type Error = ManifestError;

    fn name(&self) -> Cow<'static, str> {
        "archive-batch".into()
    }

    fn configure(
        &self,
        world: &Arc<W::MainWorld>,
        name: String,
        manifest: toml::Table,
    ) -> ManifestResult<BoxedPipeline<W::MainWorld>> {
        let world = Arc::new(W::new(world.clone()));
        let manifest = Self::parse_manifest(manifest)?;
        let instance = ArchiveBatch::new(world, name, manifest);
        Ok(Box::new(instance))
    }
}
