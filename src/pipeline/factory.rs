//! Creating pipelines from manifest jobs

use std::borrow::Cow;
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;

use super::{BoxedPipeline, ConfigError, ConfigResult, ManifestError};
use crate::manifest::Job;
use crate::world::World;

/// A pipeline definition that [Pipeline][super::Pipeline]s can be created from.
#[cfg_attr(feature = "test", mockall::automock(type Error = crate::Never;))]
pub trait PipelineDefinition<W: World> {
    /// The specific error type for this pipeline's configuration
    type Error: Error + Send + Sync + 'static;

    /// The identifier of the pipeline, referenced by the [Job::kind] field
    fn name(&self) -> Cow<'static, str>;

    /// Creates the pipeline; implementation part.
    fn configure(
        &self,
        world: &Arc<W>,
        name: String,
        manifest: toml::Table,
    ) -> Result<BoxedPipeline<W>, Self::Error>;
}

/// A dyn-safe version of [PipelineDefinition]. This trait has a blanket implementation and does
/// not usually need to be implemented manually.
pub trait PipelineFactory<W: World> {
    /// The identifier of the pipeline, referenced by the [Job::kind] field
    fn name(&self) -> Cow<'static, str>;

    /// Creates the pipeline. The manifest is checked for validity, but no processing is done
    /// yet.
    fn configure(
        &self,
        world: &Arc<W>,
        name: String,
        manifest: toml::Table,
    ) -> ConfigResult<BoxedPipeline<W>>;
}

impl<W, T> PipelineFactory<W> for T
where
    W: World,
    T: PipelineDefinition<W> + Send + Sync,
{
    fn name(&self) -> Cow<'static, str> {
        PipelineDefinition::name(self)
    }

    fn configure(
        &self,
        world: &Arc<W>,
        name: String,
        manifest: toml::Table,
    ) -> ConfigResult<BoxedPipeline<W>> {
        let pipeline = PipelineDefinition::configure(self, world, name, manifest)
            .map_err(|error| ManifestError::new(PipelineDefinition::name(self), error))?;
        Ok(pipeline)
    }
}

/// The set of pipeline definitions an execution environment knows about, keyed by job kind.
pub struct PipelineMap<W: World> {
    map: HashMap<Cow<'static, str>, Box<dyn PipelineFactory<W> + Send + Sync>>,
}

impl<W: World> PipelineMap<W> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Registers a pipeline definition under its own name.
    pub fn register<T>(&mut self, definition: T)
    where
        T: PipelineDefinition<W> + Send + Sync + 'static,
    {
        self.map.insert(definition.name(), Box::new(definition));
    }

    /// Looks up the pipeline according to [Job::kind] and creates it from the job. The creation
    /// may fail if the kind is not recognized, or some part of the manifest was not valid for
    /// that kind; either way, the job's name accompanies the error.
    pub fn get(
        &self,
        world: &Arc<W>,
        job: Job,
    ) -> Result<BoxedPipeline<W>, (String, ConfigError)> {
        let Job {
            name,
            kind,
            manifest,
        } = job;
        let Some(factory) = self.map.get(kind.as_str()) else {
            return Err((name, ConfigError::Unknown(kind)));
        };
        factory
            .configure(world, name.clone(), manifest)
            .map_err(|error| (name, error))
    }
}

impl<W: World> Default for PipelineMap<W> {
    fn default() -> Self {
        Self::new()
    }
}
