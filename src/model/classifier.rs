use serde::Deserialize;

use super::{ClassificationError, Classifier, FeatureVector, InvalidArtifact};

/// Exported parameters of a binary classifier over classes `[0, 1]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    Linear {
        coef: Vec<f64>,
        intercept: f64,
    },
    MultinomialNb {
        class_log_prior: [f64; 2],
        feature_log_prob: [Vec<f64>; 2],
    },
}

impl ClassifierArtifact {
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>, InvalidArtifact> {
        match self {
            ClassifierArtifact::Linear { coef, intercept } => {
                if !intercept.is_finite() || coef.iter().any(|w| !w.is_finite()) {
                    return Err(InvalidArtifact("linear weights must be finite".into()));
                }
                Ok(Box::new(LinearClassifier::new(coef, intercept)))
            }
            ClassifierArtifact::MultinomialNb {
                class_log_prior,
                feature_log_prob,
            } => {
                let [ham, spam] = feature_log_prob;
                if ham.len() != spam.len() {
                    return Err(InvalidArtifact(format!(
                        "feature_log_prob rows differ in length ({} vs {})",
                        ham.len(),
                        spam.len()
                    )));
                }
                Ok(Box::new(MultinomialNaiveBayes::new(
                    class_log_prior,
                    [ham, spam],
                )))
            }
        }
    }
}

fn check_dimension(expected: usize, vector: &FeatureVector) -> Result<(), ClassificationError> {
    if vector.dimension() != expected {
        return Err(ClassificationError::DimensionMismatch {
            expected,
            actual: vector.dimension(),
        });
    }
    Ok(())
}

/// Linear decision function; spam when `coef·x + intercept > 0`.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    coef: Vec<f64>,
    intercept: f64,
}

impl LinearClassifier {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self { coef, intercept }
    }
}

impl Classifier for LinearClassifier {
    fn dimension(&self) -> usize {
        self.coef.len()
    }

    fn predict(&self, vectors: &[FeatureVector]) -> Result<Vec<u8>, ClassificationError> {
        vectors
            .iter()
            .map(|vector| {
                check_dimension(self.coef.len(), vector)?;
                let score = vector.dot(&self.coef) + self.intercept;
                Ok(u8::from(score > 0.0))
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct MultinomialNaiveBayes {
    class_log_prior: [f64; 2],
    feature_log_prob: [Vec<f64>; 2],
}

impl MultinomialNaiveBayes {
    pub fn new(class_log_prior: [f64; 2], feature_log_prob: [Vec<f64>; 2]) -> Self {
        Self {
            class_log_prior,
            feature_log_prob,
        }
    }
}

impl Classifier for MultinomialNaiveBayes {
    fn dimension(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    fn predict(&self, vectors: &[FeatureVector]) -> Result<Vec<u8>, ClassificationError> {
        vectors
            .iter()
            .map(|vector| {
                check_dimension(self.dimension(), vector)?;
                let ham = self.class_log_prior[0] + vector.dot(&self.feature_log_prob[0]);
                let spam = self.class_log_prior[1] + vector.dot(&self.feature_log_prob[1]);
                // ties go to the first class
                Ok(u8::from(spam > ham))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_uses_strict_positive_margin() {
        let model = LinearClassifier::new(vec![1.0, -1.0], 0.0);
        let preds = model
            .predict(&[
                FeatureVector::new(2, vec![(0, 2.0)]),
                FeatureVector::new(2, vec![(0, 1.0), (1, 1.0)]),
                FeatureVector::new(2, vec![(1, 1.0)]),
            ])
            .unwrap();
        assert_eq!(preds, vec![1, 0, 0]);
    }

    #[test]
    fn naive_bayes_falls_back_to_prior_for_empty_vector() {
        let model = MultinomialNaiveBayes::new(
            [(0.87f64).ln(), (0.13f64).ln()],
            [vec![(0.9f64).ln(), (0.1f64).ln()], vec![(0.2f64).ln(), (0.8f64).ln()]],
        );
        let preds = model
            .predict(&[
                FeatureVector::zeros(2),
                FeatureVector::new(2, vec![(1, 3.0)]),
            ])
            .unwrap();
        assert_eq!(preds, vec![0, 1]);
    }

    #[test]
    fn naive_bayes_ties_resolve_to_ham() {
        let half = (0.5f64).ln();
        let model = MultinomialNaiveBayes::new(
            [half, half],
            [vec![half, half], vec![half, half]],
        );
        let preds = model
            .predict(&[
                FeatureVector::zeros(2),
                FeatureVector::new(2, vec![(0, 1.0), (1, 2.0)]),
            ])
            .unwrap();
        assert_eq!(preds, vec![0, 0]);
    }

    #[test]
    fn linear_zero_margin_is_ham() {
        let model = LinearClassifier::new(vec![1.0], -1.0);
        let preds = model
            .predict(&[FeatureVector::new(1, vec![(0, 1.0)])])
            .unwrap();
        assert_eq!(preds, vec![0]);
    }

    #[test]
    fn wrong_dimension_is_a_classification_error() {
        let model = LinearClassifier::new(vec![1.0, 1.0], 0.0);
        let err = model.predict(&[FeatureVector::zeros(3)]).unwrap_err();
        assert_eq!(
            err,
            ClassificationError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn artifact_kinds_deserialize() {
        let linear: ClassifierArtifact =
            serde_json::from_str(r#"{"kind":"linear","coef":[0.5,1.0],"intercept":-1.0}"#)
                .unwrap();
        assert_eq!(linear.into_classifier().unwrap().dimension(), 2);

        let nb: ClassifierArtifact = serde_json::from_str(
            r#"{"kind":"multinomial_nb","class_log_prior":[-0.1,-2.3],
                "feature_log_prob":[[-1.0,-2.0,-3.0],[-3.0,-2.0,-1.0]]}"#,
        )
        .unwrap();
        assert_eq!(nb.into_classifier().unwrap().dimension(), 3);
    }

    #[test]
    fn ragged_naive_bayes_rows_are_rejected() {
        let nb: ClassifierArtifact = serde_json::from_str(
            r#"{"kind":"multinomial_nb","class_log_prior":[-0.1,-2.3],
                "feature_log_prob":[[-1.0],[-3.0,-2.0]]}"#,
        )
        .unwrap();
        assert!(nb.into_classifier().is_err());
    }
}
