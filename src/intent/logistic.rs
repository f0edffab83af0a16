//! Multinomial logistic regression over dense feature vectors.

use serde::{Deserialize, Serialize};

use crate::config::TrainingConfig;
use crate::error::{NluError, Result};

/// Softmax classifier with one weight row and one bias per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    n_features: usize,
    n_classes: usize,
    /// Row-major `n_classes x n_features` weight matrix.
    weights: Vec<f64>,
    bias: Vec<f64>,
}

impl LogisticRegression {
    /// Fit the model with mini-batch gradient descent.
    ///
    /// Samples are visited in their given order, so the same input always
    /// produces the same model.
    pub fn fit(
        features: &[Vec<f64>],
        targets: &[usize],
        n_classes: usize,
        config: &TrainingConfig,
    ) -> Result<Self> {
        config.validate()?;

        if features.is_empty() {
            return Err(NluError::model("training samples cannot be empty"));
        }
        if features.len() != targets.len() {
            return Err(NluError::model(format!(
                "{} feature vectors but {} targets",
                features.len(),
                targets.len()
            )));
        }
        if n_classes == 0 {
            return Err(NluError::model("at least one class is required"));
        }

        let n_features = features[0].len();
        if let Some(bad) = features.iter().position(|x| x.len() != n_features) {
            return Err(NluError::model(format!(
                "feature vector {bad} has {} dimensions, expected {n_features}",
                features[bad].len()
            )));
        }
        if let Some(&bad) = targets.iter().find(|&&y| y >= n_classes) {
            return Err(NluError::model(format!(
                "target class {bad} is out of range for {n_classes} classes"
            )));
        }

        let mut model = Self {
            n_features,
            n_classes,
            weights: vec![0.0; n_classes * n_features],
            bias: vec![0.0; n_classes],
        };

        let indices: Vec<usize> = (0..features.len()).collect();
        let mut grad_w = vec![0.0; n_classes * n_features];
        let mut grad_b = vec![0.0; n_classes];

        for _ in 0..config.epochs {
            for batch in indices.chunks(config.batch_size) {
                grad_w.iter_mut().for_each(|g| *g = 0.0);
                grad_b.iter_mut().for_each(|g| *g = 0.0);

                for &i in batch {
                    let x = &features[i];
                    let probs = model.probabilities(x);
                    for (class, p) in probs.iter().enumerate() {
                        let error = p - if class == targets[i] { 1.0 } else { 0.0 };
                        grad_b[class] += error;
                        let row = &mut grad_w[class * n_features..(class + 1) * n_features];
                        for (g, xi) in row.iter_mut().zip(x) {
                            *g += error * xi;
                        }
                    }
                }

                let scale = config.learning_rate / batch.len() as f64;
                let decay = config.learning_rate * config.l2_penalty;
                for (w, g) in model.weights.iter_mut().zip(&grad_w) {
                    *w -= scale * g + decay * *w;
                }
                for (b, g) in model.bias.iter_mut().zip(&grad_b) {
                    *b -= scale * g;
                }
            }
        }

        Ok(model)
    }

    /// Class probabilities for one feature vector; they sum to 1.
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.n_features {
            return Err(NluError::model(format!(
                "expected {} features, got {}",
                self.n_features,
                features.len()
            )));
        }
        Ok(self.probabilities(features))
    }

    fn probabilities(&self, features: &[f64]) -> Vec<f64> {
        let mut logits: Vec<f64> = (0..self.n_classes)
            .map(|class| {
                let row = &self.weights[class * self.n_features..(class + 1) * self.n_features];
                self.bias[class] + row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>()
            })
            .collect();
        softmax(&mut logits);
        logits
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Check internal dimensions after deserialization.
    pub fn validate(&self) -> Result<()> {
        if self.weights.len() != self.n_classes * self.n_features
            || self.bias.len() != self.n_classes
        {
            return Err(NluError::model(format!(
                "model weights do not match {} classes x {} features",
                self.n_classes, self.n_features
            )));
        }
        Ok(())
    }
}

/// In-place numerically stable softmax.
fn softmax(logits: &mut [f64]) {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for v in logits.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    for v in logits.iter_mut() {
        *v /= sum;
    }
}
