//! Error types for the overall datafetch API

use std::fmt;

use thiserror::Error;

use crate::{manifest, pipeline};

/// Top-level failure of a datafetch run
#[derive(Error, Debug)]
pub enum Error {
    /// The fetch manifest could not be read
    #[error("fetch configuration could not be read")]
    Manifest(#[from] manifest::Error),
    /// A pipeline is not configured correctly
    #[error(transparent)]
    PipelineConfig(#[from] MultiplePipelineConfigError),
    /// A pipeline's execution failed
    #[error(transparent)]
    PipelineExecution(#[from] MultiplePipelineExecutionError),
}

/// One or more pipelines were not configured correctly
#[derive(Error, Debug)]
pub struct MultiplePipelineConfigError {
    errors: Vec<(String, pipeline::ConfigError)>,
}

impl MultiplePipelineConfigError {
    /// Creates a new error
    pub fn new(errors: Vec<(String, pipeline::ConfigError)>) -> Self {
        Self { errors }
    }
}

impl fmt::Display for MultiplePipelineConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at least one job's configuration failed:")?;
        for (name, error) in &self.errors {
            writeln!(f)?;
            write!(f, "  [{name}] {error}")?;
        }
        Ok(())
    }
}

/// One or more pipelines failed during execution
#[derive(Error, Debug)]
pub struct MultiplePipelineExecutionError {
    errors: Vec<pipeline::ExecutionError>,
}

impl MultiplePipelineExecutionError {
    /// Creates a new error
    pub fn new(errors: Vec<pipeline::ExecutionError>) -> Self {
        Self { errors }
    }
}

impl fmt::Display for MultiplePipelineExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at least one job's execution failed:")?;
        for error in &self.errors {
            writeln!(f)?;
            write!(f, "  {error}")?;
        }
        Ok(())
    }
}

/// Result type alias that defaults error to [enum@Error].
pub type Result<T, E = Error> = std::result::Result<T, E>;
