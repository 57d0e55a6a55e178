use super::{check_shapes, ContextModel, ModelGradient};
use crate::data::Dataset;
use crate::math::Matrix;
use crate::objective::Objective;
use crate::vocab::Vocab;

/// Predict every context word from the center word's input vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipGram;

impl ContextModel for SkipGram {
    fn cost_and_gradient(
        &self,
        center: &str,
        _window: usize,
        context: &[String],
        vocab: &Vocab,
        input: &Matrix,
        output: &Matrix,
        dataset: &mut dyn Dataset,
        objective: &dyn Objective,
    ) -> ModelGradient {
        check_shapes(input, output);
        let mut acc = ModelGradient::zeros(input, output);

        let center_idx = vocab.index(center);
        let predicted = input.row(center_idx);

        for word in context {
            let target = vocab.index(word);
            let g = objective.cost_and_gradient(predicted, target, output, dataset);
            acc.cost += g.cost;
            acc.grad_in.add_to_row(center_idx, 1.0, &g.grad_pred);
            acc.grad_out.add_assign(&g.grad_out);
        }

        acc
    }

    fn name(&self) -> &'static str {
        "skipgram"
    }
}
