//! Pipeline module.
//!
//! Provides the main cleaning pipeline and its builder.

mod builder;

pub use builder::{Pipeline, PipelineBuilder};
