//! Report generation: the text summary and the machine-readable run report.

mod generator;

pub use generator::{ReportGenerator, RunReport};
