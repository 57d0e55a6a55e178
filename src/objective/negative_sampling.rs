use super::{check_predicted, check_target, Gradient, Objective};
use crate::data::Dataset;
use crate::math::{dot, log_sigmoid, sigmoid, Matrix};

/// Draw `k` indices from `dataset`, redrawing whenever the draw hits `target`.
///
/// Duplicates among the returned indices are kept. The draw order must stay
/// exactly this loop so gradients match fixtures produced with the same seed.
///
/// The caller must ensure the oracle can return an index other than `target`
/// when `k > 0`. An oracle that only ever yields `target` (for example a
/// one-word vocabulary) makes this loop never terminate.
pub fn negative_samples(target: usize, dataset: &mut dyn Dataset, k: usize) -> Vec<usize> {
    let mut indices = Vec::with_capacity(k);
    for _ in 0..k {
        let mut idx = dataset.sample_token_index();
        while idx == target {
            idx = dataset.sample_token_index();
        }
        indices.push(idx);
    }
    indices
}

/// Negative-sampling loss with `k` sampled negatives per target.
#[derive(Debug, Clone, Copy)]
pub struct NegativeSampling {
    pub k: usize,
}

impl Default for NegativeSampling {
    fn default() -> Self {
        Self { k: 10 }
    }
}

impl NegativeSampling {
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    /// Cost and gradients for a fixed set of negatives.
    ///
    /// Each entry of `negatives` contributes on its own, so an index that
    /// appears `m` times receives `m` additive updates.
    pub fn cost_and_gradient_with_samples(
        predicted: &[f64],
        target: usize,
        negatives: &[usize],
        output: &Matrix,
    ) -> Gradient {
        check_target(target, output);
        check_predicted(predicted, output);

        let mut grad_pred = vec![0.0; predicted.len()];
        let mut grad_out = Matrix::zeros(output.rows, output.cols);

        // positive term: -ln σ(u_o·v), gradient (σ(u_o·v) - 1)
        let pos_score = dot(output.row(target), predicted);
        let d1 = sigmoid(pos_score);
        let mut cost = -log_sigmoid(pos_score);
        add_scaled(&mut grad_pred, d1 - 1.0, output.row(target));
        grad_out.add_to_row(target, d1 - 1.0, predicted);

        // negative terms: -ln(1 - σ(u_k·v)) = -ln σ(-u_k·v), gradient σ(u_k·v)
        for &neg in negatives {
            check_target(neg, output);
            let score = dot(output.row(neg), predicted);
            let d2 = sigmoid(score);
            cost -= log_sigmoid(-score);
            add_scaled(&mut grad_pred, d2, output.row(neg));
            grad_out.add_to_row(neg, d2, predicted);
        }

        Gradient {
            cost,
            grad_pred,
            grad_out,
        }
    }
}

impl Objective for NegativeSampling {
    fn cost_and_gradient(
        &self,
        predicted: &[f64],
        target: usize,
        output: &Matrix,
        dataset: &mut dyn Dataset,
    ) -> Gradient {
        let negatives = negative_samples(target, dataset, self.k);
        Self::cost_and_gradient_with_samples(predicted, target, &negatives, output)
    }

    fn name(&self) -> &'static str {
        "negative-sampling"
    }
}

fn add_scaled(acc: &mut [f64], alpha: f64, x: &[f64]) {
    for (a, &b) in acc.iter_mut().zip(x) {
        *a += alpha * b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ScriptedDataset;

    #[test]
    fn sampling_skips_target() {
        let mut ds = ScriptedDataset::new(vec![1, 1, 3, 1, 0]);
        let got = negative_samples(1, &mut ds, 2);
        assert_eq!(got, vec![3, 0]);
        assert_eq!(ds.draws(), 5);
    }

    #[test]
    fn sampling_keeps_duplicates() {
        let mut ds = ScriptedDataset::new(vec![2]);
        assert_eq!(negative_samples(0, &mut ds, 4), vec![2, 2, 2, 2]);
    }

    #[test]
    fn zero_k_is_positive_term_only() {
        let output = Matrix::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
        let g = NegativeSampling::cost_and_gradient_with_samples(&[0.5, 0.5], 0, &[], &output);
        let d1 = sigmoid(0.5);
        assert!((g.cost + d1.ln()).abs() < 1e-12);
        assert_eq!(g.grad_out.row(1), &[0.0, 0.0]);
        assert!((g.grad_pred[0] - (d1 - 1.0)).abs() < 1e-12);
    }
}
