//! Contains the executable's entry point

use std::sync::Arc;

use crate::error::{MultiplePipelineExecutionError, Result};
use crate::log;
use crate::pipeline::ExecutionError;
use crate::reporting::ErrorExt as _;
use crate::utils;
use crate::world::{World, WorldExt as _};

/// Reads the fetch manifest, configures the jobs it names, and then executes the jobs. Jobs run
/// concurrently to each other; each job is sequential internally. All configuration errors are
/// reported before any job runs; all execution errors are reported after all jobs finished.
pub async fn run<W: World>(world: W) -> Result<()> {
    let world = Arc::new(world);

    let manifest = world.read_manifest().await?;
    let jobs = world.get_pipelines(manifest)?;

    let jobs = jobs.into_iter().map(|mut job| async move {
        let mut l = job.world().log();
        log!(l, "[{}] beginning job...", job.name());
        let result = job.run().await;
        match &result {
            Ok(()) => {
                log!(l, "[{}] job finished", job.name());
            }
            Err(error) => {
                log!(l, "[{}] job failed: {}", job.name(), error.as_ref().error_chain());
            }
        }
        result.map_err(|error| ExecutionError::failed(job.name().to_string(), error))
    });
    let errors = utils::spawn_set(jobs).await;

    if !errors.is_empty() {
        return Err(MultiplePipelineExecutionError::new(errors).into());
    }

    Ok(())
}
