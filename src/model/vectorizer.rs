use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::{ClassificationError, FeatureVector, InvalidArtifact, Vectorizer};

const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

static DEFAULT_TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_TOKEN_PATTERN).expect("valid token regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Exported parameters of a bag-of-words (optionally tf-idf) vectorizer.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorizerArtifact {
    pub vocabulary: HashMap<String, usize>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default)]
    pub binary: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub token_pattern: Option<String>,
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default)]
    pub norm: Option<Norm>,
}

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

#[cfg(test)]
impl VectorizerArtifact {
    /// Plain unigram count vectorizer over `tokens`, indexed in order.
    pub fn with_vocabulary(tokens: &[&str]) -> Self {
        Self {
            vocabulary: tokens
                .iter()
                .enumerate()
                .map(|(index, token)| (token.to_string(), index))
                .collect(),
            lowercase: true,
            binary: false,
            ngram_range: default_ngram_range(),
            token_pattern: None,
            idf: None,
            norm: None,
        }
    }
}

#[derive(Debug)]
pub struct TextVectorizer {
    vocabulary: HashMap<String, usize>,
    token_regex: Option<Regex>,
    lowercase: bool,
    binary: bool,
    ngram_range: (usize, usize),
    idf: Option<Vec<f64>>,
    norm: Option<Norm>,
}

impl TextVectorizer {
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self, InvalidArtifact> {
        let dimension = artifact.vocabulary.len();
        let mut seen = vec![false; dimension];
        for (token, &index) in &artifact.vocabulary {
            if index >= dimension || seen[index] {
                return Err(InvalidArtifact(format!(
                    "vocabulary index {index} for {token:?} is out of range or duplicated"
                )));
            }
            seen[index] = true;
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(InvalidArtifact(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        if let Some(idf) = &artifact.idf {
            if idf.len() != dimension {
                return Err(InvalidArtifact(format!(
                    "idf has {} weights for {dimension} vocabulary entries",
                    idf.len()
                )));
            }
        }

        let token_regex = match artifact.token_pattern.as_deref() {
            None | Some(DEFAULT_TOKEN_PATTERN) => None,
            Some(pattern) => Some(
                Regex::new(pattern)
                    .map_err(|err| InvalidArtifact(format!("invalid token_pattern: {err}")))?,
            ),
        };

        Ok(Self {
            vocabulary: artifact.vocabulary,
            token_regex,
            lowercase: artifact.lowercase,
            binary: artifact.binary,
            ngram_range: artifact.ngram_range,
            idf: artifact.idf,
            norm: artifact.norm,
        })
    }

    fn tokens<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let regex = self.token_regex.as_ref().unwrap_or(&*DEFAULT_TOKEN_REGEX);
        regex.find_iter(text).map(|m| m.as_str()).collect()
    }

    fn vectorize(&self, message: &str) -> FeatureVector {
        let text = if self.lowercase {
            message.to_lowercase()
        } else {
            message.to_string()
        };
        let tokens = self.tokens(&text);

        let mut counts: HashMap<usize, f64> = HashMap::new();
        let (min_n, max_n) = self.ngram_range;
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                let term = window.join(" ");
                if let Some(&index) = self.vocabulary.get(&term) {
                    *counts.entry(index).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| {
                let tf = if self.binary { 1.0 } else { count };
                let weight = self.idf.as_ref().map_or(1.0, |idf| idf[index]);
                (index, tf * weight)
            })
            .collect();

        if let Some(norm) = self.norm {
            let total = match norm {
                Norm::L1 => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
                Norm::L2 => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            };
            if total > 0.0 {
                for (_, value) in &mut entries {
                    *value /= total;
                }
            }
        }

        FeatureVector::new(self.vocabulary.len(), entries)
    }
}

impl Vectorizer for TextVectorizer {
    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    fn transform(&self, messages: &[&str]) -> Result<Vec<FeatureVector>, ClassificationError> {
        Ok(messages.iter().map(|message| self.vectorize(message)).collect())
    }
}
