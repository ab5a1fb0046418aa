//! k-nearest-neighbour growth stage classifier

use serde::Deserialize;

/// KNN regressor over stored reference measurements.
///
/// The trained model ships as reference points in feature space, one
/// growth score per point, and the neighbour count `k`. A prediction is
/// the mean score of the `k` nearest points.
#[derive(Debug, Clone, Deserialize)]
pub struct KnnClassifier {
    pub k: usize,
    pub points: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
}

impl KnnClassifier {
    /// Mean target of the `k` nearest reference points.
    ///
    /// Infallible once the store validated the shapes; `k` is clamped to
    /// the number of stored points.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut neighbours: Vec<(f64, f64)> = self
            .points
            .iter()
            .zip(&self.targets)
            .map(|(point, &target)| (squared_distance(point, features), target))
            .collect();
        neighbours.sort_by(|a, b| a.0.total_cmp(&b.0));

        let k = self.k.min(neighbours.len());
        let sum: f64 = neighbours[..k].iter().map(|(_, target)| target).sum();
        sum / k as f64
    }

    pub(super) fn validate(&self, features: usize) -> Result<(), String> {
        if self.k == 0 {
            return Err("k must be at least 1".into());
        }
        if self.points.is_empty() {
            return Err("no reference points".into());
        }
        if self.points.len() != self.targets.len() {
            return Err(format!(
                "{} reference points but {} targets",
                self.points.len(),
                self.targets.len()
            ));
        }
        if let Some(point) = self.points.iter().find(|p| p.len() != features) {
            return Err(format!(
                "reference point has {} features, expected {}",
                point.len(),
                features
            ));
        }
        Ok(())
    }
}

// Squared distances sort the same as Euclidean ones.
fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
