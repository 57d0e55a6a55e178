//! Per-target cost functions for word2vec.
//!
//! An objective scores one predicted vector against one target row of the
//! output matrix and returns the cost together with the gradients with
//! respect to the predicted vector and to every output row.

pub mod negative_sampling;
pub mod softmax;

pub use negative_sampling::{negative_samples, NegativeSampling};
pub use softmax::Softmax;

use serde::{Deserialize, Serialize};

use crate::data::Dataset;
use crate::math::Matrix;

/// Cost and gradients for one (predicted vector, target) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub cost: f64,
    /// Gradient with respect to the predicted vector.
    pub grad_pred: Vec<f64>,
    /// Gradient with respect to the output matrix, same shape as it.
    pub grad_out: Matrix,
}

pub trait Objective {
    /// `dataset` is only consulted by objectives that sample.
    fn cost_and_gradient(
        &self,
        predicted: &[f64],
        target: usize,
        output: &Matrix,
        dataset: &mut dyn Dataset,
    ) -> Gradient;

    fn name(&self) -> &'static str;
}

/// Objective selector used by configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectiveKind {
    Softmax,
    NegativeSampling,
}

impl ObjectiveKind {
    pub const ALL: [ObjectiveKind; 2] = [ObjectiveKind::Softmax, ObjectiveKind::NegativeSampling];

    pub fn name(self) -> &'static str {
        match self {
            ObjectiveKind::Softmax => "softmax",
            ObjectiveKind::NegativeSampling => "negative-sampling",
        }
    }

    /// `k` is the negative sample count and is ignored by softmax.
    pub fn build(self, k: usize) -> Box<dyn Objective> {
        match self {
            ObjectiveKind::Softmax => Box::new(Softmax),
            ObjectiveKind::NegativeSampling => Box::new(NegativeSampling::new(k)),
        }
    }
}

fn check_target(target: usize, output: &Matrix) {
    assert!(
        target < output.rows,
        "target index {target} out of range for {} output vectors",
        output.rows
    );
}

fn check_predicted(predicted: &[f64], output: &Matrix) {
    assert_eq!(
        predicted.len(),
        output.cols,
        "predicted vector has {} dims, output vectors have {}",
        predicted.len(),
        output.cols
    );
}
