pub mod archive;
pub mod config;
pub mod error;
pub mod merge;
pub mod pipeline;
pub mod process;
pub mod write;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::PipelineConfig;
pub use error::{CleanError, Result};
pub use pipeline::{run, RunReport};
pub use write::OutputPaths;
