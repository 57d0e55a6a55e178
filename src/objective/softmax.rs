use super::{check_predicted, check_target, Gradient, Objective};
use crate::data::Dataset;
use crate::math::{self, Matrix};

/// Full-vocabulary softmax with cross-entropy loss.
///
/// Every output row receives a gradient proportional to its probability,
/// minus one at the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct Softmax;

impl Softmax {
    /// Same as [`Objective::cost_and_gradient`] without a dataset.
    pub fn compute(predicted: &[f64], target: usize, output: &Matrix) -> Gradient {
        check_target(target, output);
        check_predicted(predicted, output);

        let scores = output.matvec(predicted);
        let mut delta = math::softmax(&scores);
        // -ln p_t through log-sum-exp so an underflowed p_t still gives a finite cost
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let lse = max + scores.iter().map(|s| (s - max).exp()).sum::<f64>().ln();
        let cost = lse - scores[target];
        delta[target] -= 1.0;

        Gradient {
            cost,
            grad_pred: output.tmatvec(&delta),
            grad_out: Matrix::outer(&delta, predicted),
        }
    }
}

impl Objective for Softmax {
    fn cost_and_gradient(
        &self,
        predicted: &[f64],
        target: usize,
        output: &Matrix,
        _dataset: &mut dyn Dataset,
    ) -> Gradient {
        Softmax::compute(predicted, target, output)
    }

    fn name(&self) -> &'static str {
        "softmax"
    }
}
