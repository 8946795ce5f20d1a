pub mod message;
pub mod types;

pub use message::{ClassificationResult, Label};
pub use types::{AnalysisReport, StoragePolicy};
