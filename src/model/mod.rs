//! Pre-built statistical model consumed by the pipeline.
//!
//! The vectorizer and classifier are opaque capabilities behind narrow
//! traits. They are loaded once at startup into [`Models`] and shared
//! read-only by every request afterwards.

mod classifier;
mod loader;
mod vectorizer;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use thiserror::Error;

pub use classifier::ClassifierArtifact;
#[cfg(test)]
pub use classifier::LinearClassifier;
pub use loader::{load_classifier, load_vectorizer};
pub use vectorizer::{TextVectorizer, VectorizerArtifact};

/// Sparse, fixed-dimensional feature representation of one message.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Builds a vector from `(index, value)` pairs. Entries are sorted by index
    /// and zero values are dropped.
    pub fn new(dimension: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|(_, value)| *value != 0.0);
        entries.sort_by_key(|(index, _)| *index);
        Self { dimension, entries }
    }

    #[cfg(test)]
    pub fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|(index, value)| weights.get(*index).copied().unwrap_or(0.0) * value)
            .sum()
    }
}

pub trait Vectorizer: Send + Sync {
    fn dimension(&self) -> usize;

    fn transform(&self, messages: &[&str]) -> Result<Vec<FeatureVector>, ClassificationError>;
}

/// Binary classifier returning `1` for spam and `0` for ham.
pub trait Classifier: Send + Sync {
    fn dimension(&self) -> usize;

    fn predict(&self, vectors: &[FeatureVector]) -> Result<Vec<u8>, ClassificationError>;
}

/// Process-wide read-only handle to the loaded vectorizer/classifier pair.
#[derive(Clone)]
pub struct Models {
    vectorizer: Arc<dyn Vectorizer>,
    classifier: Arc<dyn Classifier>,
}

impl Models {
    pub fn new(
        vectorizer: Arc<dyn Vectorizer>,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, ModelLoadError> {
        if vectorizer.dimension() != classifier.dimension() {
            return Err(ModelLoadError::Incompatible {
                vectorizer: vectorizer.dimension(),
                classifier: classifier.dimension(),
            });
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    pub fn load(vectorizer_path: &Path, classifier_path: &Path) -> Result<Self, ModelLoadError> {
        let vectorizer = load_vectorizer(vectorizer_path)?;
        let classifier = load_classifier(classifier_path)?;
        let models = Self::new(Arc::new(vectorizer), classifier)?;
        tracing::info!(
            target: "model",
            features = models.vectorizer.dimension(),
            vectorizer = %vectorizer_path.display(),
            classifier = %classifier_path.display(),
            "model artifacts loaded"
        );
        Ok(models)
    }

    pub fn vectorizer(&self) -> &dyn Vectorizer {
        self.vectorizer.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct InvalidArtifact(pub String);

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("failed to read model artifact {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse model artifact {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid model artifact {path}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: InvalidArtifact,
    },
    #[error("vectorizer produces {vectorizer} features but classifier expects {classifier}")]
    Incompatible { vectorizer: usize, classifier: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum ClassificationError {
    #[error("feature vector has {actual} dimensions, model expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("model returned {actual} outputs for {expected} inputs")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("model returned unknown label {0}")]
    InvalidLabel(u8),
}
