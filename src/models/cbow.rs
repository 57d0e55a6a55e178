use super::{check_shapes, ContextModel, ModelGradient};
use crate::data::Dataset;
use crate::math::Matrix;
use crate::objective::Objective;
use crate::vocab::Vocab;

/// Predict the center word from the sum of the context words' input vectors.
///
/// The gradient with respect to the summed vector flows back unchanged into
/// the input row of every context word, once per occurrence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cbow;

impl ContextModel for Cbow {
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
        if context.is_empty() {
            return acc;
        }

        let target = vocab.index(center);
        let indices: Vec<usize> = context.iter().map(|w| vocab.index(w)).collect();

        let mut predicted = vec![0.0; input.cols];
        for &i in &indices {
            for (p, &v) in predicted.iter_mut().zip(input.row(i)) {
                *p += v;
            }
        }

        let g = objective.cost_and_gradient(&predicted, target, output, dataset);
        acc.cost = g.cost;
        for &i in &indices {
            acc.grad_in.add_to_row(i, 1.0, &g.grad_pred);
        }
        acc.grad_out = g.grad_out;
        acc
    }

    fn name(&self) -> &'static str {
        "cbow"
    }
}
