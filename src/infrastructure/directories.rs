use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};

use crate::config::{DirectoryConfig, ModelConfig};

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub logs_dir: PathBuf,
    pub vectorizer_path: PathBuf,
    pub classifier_path: PathBuf,
}

pub fn ensure_directories(dirs: &DirectoryConfig, models: &ModelConfig) -> Result<ResolvedPaths> {
    let logs_dir = prepare_logs_dir(Path::new(&dirs.logs_dir))?;

    // model artifacts are only read; missing files surface as a load error later
    let model_dir = Path::new(&models.model_dir);
    Ok(ResolvedPaths {
        logs_dir,
        vectorizer_path: model_dir.join(&models.vectorizer_file),
        classifier_path: model_dir.join(&models.classifier_file),
    })
}

/// Creates the logs directory if needed and checks that it accepts writes.
fn prepare_logs_dir(dir: &Path) -> Result<PathBuf> {
    if dir.exists() && !dir.is_dir() {
        bail!("logs path {} exists and is not a directory", dir.display());
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create logs directory {}", dir.display()))?;

    let probe = dir.join(".write-test");
    fs::write(&probe, b"ok")
        .with_context(|| format!("logs directory {} is not writable", dir.display()))?;
    fs::remove_file(&probe)?;

    Ok(dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn creates_logs_dir_and_joins_model_paths() {
        let root = TempDir::new().unwrap();
        let logs = root.path().join("nested/logs");
        let dirs = DirectoryConfig {
            logs_dir: logs.to_string_lossy().into_owned(),
        };
        let models = ModelConfig {
            model_dir: "artifacts".into(),
            vectorizer_file: "v.json".into(),
            classifier_file: "c.json".into(),
        };

        let paths = ensure_directories(&dirs, &models).unwrap();
        assert!(paths.logs_dir.is_dir());
        assert_eq!(paths.vectorizer_path, PathBuf::from("artifacts/v.json"));
        assert_eq!(paths.classifier_path, PathBuf::from("artifacts/c.json"));
    }

    #[test]
    fn logs_path_that_is_a_file_is_rejected() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("logs");
        std::fs::write(&file, b"not a dir").unwrap();
        let dirs = DirectoryConfig {
            logs_dir: file.to_string_lossy().into_owned(),
        };
        let models = ModelConfig {
            model_dir: "models".into(),
            vectorizer_file: "vectorizer.json".into(),
            classifier_file: "spam_classifier.json".into(),
        };

        let err = ensure_directories(&dirs, &models).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn existing_logs_dir_is_reused() {
        let root = TempDir::new().unwrap();
        let dirs = DirectoryConfig {
            logs_dir: root.path().to_string_lossy().into_owned(),
        };
        let models = ModelConfig {
            model_dir: "models".into(),
            vectorizer_file: "vectorizer.json".into(),
            classifier_file: "spam_classifier.json".into(),
        };

        let paths = ensure_directories(&dirs, &models).unwrap();
        assert_eq!(paths.logs_dir, root.path().canonicalize().unwrap());
        assert!(!paths.logs_dir.join(".write-test").exists());
    }
}
