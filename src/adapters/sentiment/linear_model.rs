//! TF-IDF vectorizer + linear classifier loaded from exported JSON artifacts.
//!
//! Artifacts (in the model directory):
//! - `vectorizer.json`: `{"vocabulary": {token: column}, "idf": [..], "sublinear_tf": bool, "norm": "l2"|"l1"|null}`
//! - `sentiment_model.json`: `{"classes": [..], "coef": [[..]], "intercept": [..]}`
//!
//! Inference only. Vocabulary is fixed at load time; unknown tokens are ignored.

use crate::domain::terms::tokenize;
use crate::domain::{DomainError, SentimentLabel};
use crate::ports::SentimentPort;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::info;

pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const CLASSIFIER_FILE: &str = "sentiment_model.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// Fitted TF-IDF vectorizer.
#[derive(Debug, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
}

impl TfidfVectorizer {
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Sparse feature vector `(column, value)` for one document, sorted by column.
    pub fn transform(&self, text: &str) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(text) {
            if let Some(&col) = self.vocabulary.get(&token) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (col, tf * self.idf[col])
            })
            .collect();
        features.sort_by_key(|&(col, _)| col);

        let norm = match self.norm {
            Some(Norm::L2) => features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => features.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            None => 0.0,
        };
        if norm > 0.0 {
            for (_, v) in &mut features {
                *v /= norm;
            }
        }
        features
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.idf.is_empty() {
            return Err(DomainError::ModelLoad("vectorizer has no features".into()));
        }
        if let Some((token, &col)) = self.vocabulary.iter().find(|(_, c)| **c >= self.idf.len()) {
            return Err(DomainError::ModelLoad(format!(
                "vocabulary entry '{}' maps to column {} but idf has {} entries",
                token,
                col,
                self.idf.len()
            )));
        }
        Ok(())
    }
}

/// Serialized form of a fitted linear classifier.
#[derive(Debug, Deserialize)]
struct LinearClassifierArtifact {
    classes: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

/// Fitted linear classifier (logistic regression, linear SVM, ...). Labels validated at load.
#[derive(Debug)]
pub struct LinearClassifier {
    labels: Vec<SentimentLabel>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

impl LinearClassifier {
    fn from_artifact(a: LinearClassifierArtifact, n_features: usize) -> Result<Self, DomainError> {
        let n_classes = a.classes.len();
        if n_classes < 2 {
            return Err(DomainError::ModelLoad(format!(
                "classifier needs at least 2 classes, got {}",
                n_classes
            )));
        }
        let expected_rows = if n_classes == 2 { 1 } else { n_classes };
        if a.coef.len() != expected_rows || a.intercept.len() != expected_rows {
            return Err(DomainError::ModelLoad(format!(
                "expected {} coefficient rows and intercepts for {} classes, got {} and {}",
                expected_rows,
                n_classes,
                a.coef.len(),
                a.intercept.len()
            )));
        }
        if let Some(row) = a.coef.iter().find(|r| r.len() != n_features) {
            return Err(DomainError::ModelLoad(format!(
                "coefficient row has {} entries, vectorizer has {} features",
                row.len(),
                n_features
            )));
        }
        Ok(Self {
            labels: a.classes.iter().map(|c| SentimentLabel::parse(c)).collect(),
            coef: a.coef,
            intercept: a.intercept,
        })
    }

    /// Label for one sparse feature vector.
    pub fn predict_one(&self, features: &[(usize, f64)]) -> SentimentLabel {
        let score = |row: usize| -> f64 {
            let w = &self.coef[row];
            features.iter().map(|&(col, v)| w[col] * v).sum::<f64>() + self.intercept[row]
        };

        let idx = if self.coef.len() == 1 {
            usize::from(score(0) > 0.0)
        } else {
            let mut best = 0;
            let mut best_score = f64::NEG_INFINITY;
            for row in 0..self.coef.len() {
                let s = score(row);
                if s > best_score {
                    best = row;
                    best_score = s;
                }
            }
            best
        };
        self.labels[idx].clone()
    }

    pub fn labels(&self) -> &[SentimentLabel] {
        &self.labels
    }
}

/// Vectorizer + classifier pair. Immutable after load.
#[derive(Debug)]
pub struct LinearSentimentModel {
    vectorizer: TfidfVectorizer,
    classifier: LinearClassifier,
}

impl LinearSentimentModel {
    /// Build from the two JSON documents. Validates dimensions.
    pub fn from_json(vectorizer_json: &str, classifier_json: &str) -> Result<Self, DomainError> {
        let vectorizer: TfidfVectorizer = serde_json::from_str(vectorizer_json)
            .map_err(|e| DomainError::ModelLoad(format!("{}: {}", VECTORIZER_FILE, e)))?;
        vectorizer.validate()?;
        let artifact: LinearClassifierArtifact = serde_json::from_str(classifier_json)
            .map_err(|e| DomainError::ModelLoad(format!("{}: {}", CLASSIFIER_FILE, e)))?;
        let classifier = LinearClassifier::from_artifact(artifact, vectorizer.n_features())?;
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Read both artifacts from `dir`. Missing or corrupt files are `ModelLoad`.
    pub async fn load(dir: &Path) -> Result<Self, DomainError> {
        let read = |name: &'static str| {
            let path = dir.join(name);
            async move {
                fs::read_to_string(&path).await.map_err(|e| {
                    DomainError::ModelLoad(format!("read {}: {}", path.display(), e))
                })
            }
        };
        let (vectorizer_json, classifier_json) =
            tokio::try_join!(read(VECTORIZER_FILE), read(CLASSIFIER_FILE))?;
        let model = Self::from_json(&vectorizer_json, &classifier_json)?;
        info!(
            path = %dir.display(),
            features = model.vectorizer.n_features(),
            classes = ?model.classifier.labels(),
            "sentiment model loaded"
        );
        Ok(model)
    }

    pub fn predict_batch(&self, texts: &[String]) -> Vec<SentimentLabel> {
        texts
            .iter()
            .map(|t| self.classifier.predict_one(&self.vectorizer.transform(t)))
            .collect()
    }
}

/// Implements SentimentPort with a shared, pre-loaded model. Inference runs on the blocking pool.
#[derive(Clone)]
pub struct ModelSentimentAdapter {
    model: Arc<LinearSentimentModel>,
}

impl ModelSentimentAdapter {
    pub fn new(model: Arc<LinearSentimentModel>) -> Self {
        Self { model }
    }

    /// Load artifacts from `dir`. Call once at startup.
    pub async fn load(dir: &Path) -> Result<Self, DomainError> {
        Ok(Self::new(Arc::new(LinearSentimentModel::load(dir).await?)))
    }
}

#[async_trait]
impl SentimentPort for ModelSentimentAdapter {
    async fn predict(&self, texts: &[String]) -> Result<Vec<SentimentLabel>, DomainError> {
        let model = Arc::clone(&self.model);
        let texts = texts.to_vec();
        tokio::task::spawn_blocking(move || model.predict_batch(&texts))
            .await
            .map_err(|e| DomainError::Classifier(format!("inference task failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VECTORIZER: &str = r#"{
        "vocabulary": {"great": 0, "love": 1, "terrible": 2, "boring": 3, "video": 4},
        "idf": [1.5, 1.5, 1.5, 1.5, 1.0],
        "sublinear_tf": false,
        "norm": "l2"
    }"#;

    const BINARY: &str = r#"{
        "classes": ["negative", "positive"],
        "coef": [[2.0, 2.0, -2.0, -2.0, 0.0]],
        "intercept": [0.0]
    }"#;

    fn model() -> LinearSentimentModel {
        LinearSentimentModel::from_json(VECTORIZER, BINARY).unwrap()
    }

    #[test]
    fn transform_is_l2_normalized_and_ignores_oov() {
        let m = model();
        let features = m.vectorizer.transform("Great GREAT video, unknownword");
        let norm: f64 = features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
        assert_eq!(features.iter().map(|(c, _)| *c).collect::<Vec<_>>(), vec![0, 4]);
        assert!(m.vectorizer.transform("nothing known here").is_empty());
    }

    #[test]
    fn binary_decision_uses_sign_of_score() {
        let m = model();
        let labels = m.predict_batch(&[
            "great video, love it".to_string(),
            "terrible and boring".to_string(),
        ]);
        assert_eq!(labels, vec![SentimentLabel::Positive, SentimentLabel::Negative]);
    }

    #[test]
    fn all_oov_falls_back_to_intercept() {
        let m = model();
        // score == intercept == 0.0, not > 0 => classes[0]
        assert_eq!(m.predict_batch(&["zzz".to_string()]), vec![SentimentLabel::Negative]);
    }

    #[test]
    fn prediction_is_deterministic() {
        let m = model();
        let input = vec!["great".to_string(), "boring video".to_string(), "love".to_string()];
        assert_eq!(m.predict_batch(&input), m.predict_batch(&input));
    }

    #[test]
    fn multiclass_uses_argmax() {
        let multi = r#"{
            "classes": ["negative", "neutral", "positive"],
            "coef": [[-1, -1, 1, 1, 0], [0, 0, 0, 0, 1], [1, 1, -1, -1, 0]],
            "intercept": [0, 0, 0]
        }"#;
        let m = LinearSentimentModel::from_json(VECTORIZER, multi).unwrap();
        let labels = m.predict_batch(&[
            "love".to_string(),
            "video".to_string(),
            "boring".to_string(),
        ]);
        assert_eq!(
            labels,
            vec![SentimentLabel::Positive, SentimentLabel::Neutral, SentimentLabel::Negative]
        );
    }

    #[test]
    fn sublinear_tf_dampens_repeats() {
        let v: TfidfVectorizer = serde_json::from_str(
            r#"{"vocabulary": {"great": 0, "video": 1}, "idf": [1.0, 1.0], "sublinear_tf": true, "norm": null}"#,
        )
        .unwrap();
        let features = v.transform("great great great video");
        assert!((features[0].1 - (1.0 + 3f64.ln())).abs() < 1e-9);
        assert!((features[1].1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_class_names_are_kept() {
        let odd = r#"{"classes": ["bad", "good"], "coef": [[1, 1, 1, 1, 1]], "intercept": [0]}"#;
        let m = LinearSentimentModel::from_json(VECTORIZER, odd).unwrap();
        assert_eq!(
            m.classifier.labels(),
            &[SentimentLabel::Other("bad".into()), SentimentLabel::Other("good".into())]
        );
    }

    #[test]
    fn rejects_inconsistent_artifacts() {
        let wrong_width = r#"{"classes": ["negative", "positive"], "coef": [[1, 2]], "intercept": [0]}"#;
        assert!(matches!(
            LinearSentimentModel::from_json(VECTORIZER, wrong_width),
            Err(DomainError::ModelLoad(_))
        ));

        let bad_vocab = r#"{"vocabulary": {"x": 9}, "idf": [1.0]}"#;
        assert!(matches!(
            LinearSentimentModel::from_json(bad_vocab, BINARY),
            Err(DomainError::ModelLoad(_))
        ));

        assert!(matches!(
            LinearSentimentModel::from_json("not json", BINARY),
            Err(DomainError::ModelLoad(_))
        ));
    }

    #[tokio::test]
    async fn missing_directory_is_model_load_failure() {
        let err = LinearSentimentModel::load(Path::new("/definitely/not/here"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ModelLoad(_)));
    }

    #[tokio::test]
    async fn loads_from_directory_and_predicts_through_port() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(VECTORIZER_FILE), VECTORIZER).unwrap();
        std::fs::write(dir.path().join(CLASSIFIER_FILE), BINARY).unwrap();

        let adapter = ModelSentimentAdapter::load(dir.path()).await.unwrap();
        let labels = adapter
            .predict(&["great video".to_string(), "terrible content".to_string()])
            .await
            .unwrap();
        assert_eq!(labels, vec![SentimentLabel::Positive, SentimentLabel::Negative]);
    }
}
