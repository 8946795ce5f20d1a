use std::{fs, path::Path, sync::Arc};

use serde::de::DeserializeOwned;

use super::{
    ClassifierArtifact, Classifier, ModelLoadError, TextVectorizer, VectorizerArtifact,
};

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ModelLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ModelLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ModelLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_vectorizer(path: &Path) -> Result<TextVectorizer, ModelLoadError> {
    let artifact: VectorizerArtifact = read_artifact(path)?;
    TextVectorizer::from_artifact(artifact).map_err(|source| ModelLoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>, ModelLoadError> {
    let artifact: ClassifierArtifact = read_artifact(path)?;
    let classifier = artifact
        .into_classifier()
        .map_err(|source| ModelLoadError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Arc::from(classifier))
}
