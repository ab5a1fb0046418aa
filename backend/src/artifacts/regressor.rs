//! Feed-forward yield regressor

use serde::Deserialize;

/// Activation functions used by the network layers
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Identity,
}

impl Activation {
    fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Relu => x.max(0.0),
            Activation::Identity => x,
        }
    }
}

/// One dense layer: `out = activation(weights * input + biases)`
#[derive(Debug, Clone, Deserialize)]
pub struct DenseLayer {
    /// Row-major weights, one row per output unit
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
    pub activation: Activation,
}

impl DenseLayer {
    fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(row, bias)| {
                let sum: f64 = row.iter().zip(input).map(|(w, x)| w * x).sum();
                self.activation.apply(sum + bias)
            })
            .collect()
    }
}

/// Multi-layer perceptron producing a single yield value
#[derive(Debug, Clone, Deserialize)]
pub struct MlpRegressor {
    pub layers: Vec<DenseLayer>,
}

impl MlpRegressor {
    /// Run the forward pass. The validated network ends in one output
    /// unit, whose raw value is the predicted yield.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut activations = features.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }
        activations.into_iter().next().unwrap_or_default()
    }

    pub(super) fn validate(&self, inputs: usize) -> Result<(), String> {
        if self.layers.is_empty() {
            return Err("no layers".into());
        }
        let mut width = inputs;
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.weights.is_empty() {
                return Err(format!("layer {i} has no units"));
            }
            if layer.weights.len() != layer.biases.len() {
                return Err(format!(
                    "layer {i} has {} weight rows but {} biases",
                    layer.weights.len(),
                    layer.biases.len()
                ));
            }
            if let Some(row) = layer.weights.iter().find(|row| row.len() != width) {
                return Err(format!(
                    "layer {i} expects {width} inputs but a weight row has {}",
                    row.len()
                ));
            }
            width = layer.weights.len();
        }
        if width != 1 {
            return Err(format!("network ends in {width} outputs, expected 1"));
        }
        Ok(())
    }
}
