//! Context aggregation: skip-gram and CBOW.
//!
//! A model turns one training example (center word plus context words) into
//! objective calls and sums their costs and gradients over the input and
//! output embedding matrices.

pub mod cbow;
pub mod skipgram;

pub use cbow::Cbow;
pub use skipgram::SkipGram;

use serde::{Deserialize, Serialize};

use crate::data::Dataset;
use crate::math::Matrix;
use crate::objective::Objective;
use crate::vocab::Vocab;

/// Cost and gradients for one training example.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelGradient {
    pub cost: f64,
    /// Same shape as the input vectors.
    pub grad_in: Matrix,
    /// Same shape as the output vectors.
    pub grad_out: Matrix,
}

impl ModelGradient {
    pub fn zeros(input: &Matrix, output: &Matrix) -> Self {
        Self {
            cost: 0.0,
            grad_in: Matrix::zeros(input.rows, input.cols),
            grad_out: Matrix::zeros(output.rows, output.cols),
        }
    }
}

pub trait ContextModel {
    /// `window` is informational; `context` holds the actual words.
    #[allow(clippy::too_many_arguments)]
    fn cost_and_gradient(
        &self,
        center: &str,
        window: usize,
        context: &[String],
        vocab: &Vocab,
        input: &Matrix,
        output: &Matrix,
        dataset: &mut dyn Dataset,
        objective: &dyn Objective,
    ) -> ModelGradient;

    fn name(&self) -> &'static str;
}

/// Model selector used by configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    SkipGram,
    Cbow,
}

impl ModelKind {
    pub const ALL: [ModelKind; 2] = [ModelKind::SkipGram, ModelKind::Cbow];

    pub fn name(self) -> &'static str {
        match self {
            ModelKind::SkipGram => "skipgram",
            ModelKind::Cbow => "cbow",
        }
    }

    pub fn build(self) -> Box<dyn ContextModel> {
        match self {
            ModelKind::SkipGram => Box::new(SkipGram),
            ModelKind::Cbow => Box::new(Cbow),
        }
    }
}

fn check_shapes(input: &Matrix, output: &Matrix) {
    assert_eq!(
        input.cols, output.cols,
        "input and output vectors differ in dimension"
    );
    assert_eq!(
        input.rows, output.rows,
        "input and output vectors differ in vocabulary size"
    );
}
