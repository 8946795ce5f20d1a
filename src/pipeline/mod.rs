mod classify;
mod segments;

pub use classify::{classify, PipelineError};

