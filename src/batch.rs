use rand::Rng;

use crate::data::Dataset;
use crate::math::Matrix;
use crate::models::ContextModel;
use crate::objective::Objective;
use crate::vocab::Vocab;

/// Examples per batch.
pub const DEFAULT_BATCH_SIZE: usize = 50;
/// Largest context window drawn per example.
pub const DEFAULT_WINDOW: usize = 5;

/// Average cost and gradient over a batch of random examples.
///
/// `vectors` stacks the input vectors on top of the output vectors, so it
/// has `2 * V` rows. Each example draws its window uniformly from
/// `1..=max_window` using `rng`, then asks `dataset` for a context. The
/// returned gradient has the shape of `vectors`.
#[allow(clippy::too_many_arguments)]
pub fn batch_cost_and_gradient<R: Rng>(
    model: &dyn ContextModel,
    objective: &dyn Objective,
    vocab: &Vocab,
    vectors: &Matrix,
    dataset: &mut dyn Dataset,
    rng: &mut R,
    batch_size: usize,
    max_window: usize,
) -> (f64, Matrix) {
    assert!(vectors.rows % 2 == 0, "stacked vectors need an even row count");
    assert!(max_window >= 1, "window must be at least 1");
    assert!(batch_size >= 1, "batch size must be at least 1");

    let half = vectors.rows / 2;
    let (input, output) = vectors.split_rows(half);
    let scale = 1.0 / batch_size as f64;

    let mut cost = 0.0;
    let mut grad_in = Matrix::zeros(input.rows, input.cols);
    let mut grad_out = Matrix::zeros(output.rows, output.cols);

    for _ in 0..batch_size {
        let window = rng.gen_range(1..=max_window);
        let (center, context) = dataset.random_context(window);
        let g = model.cost_and_gradient(
            &center, window, &context, vocab, &input, &output, dataset, objective,
        );
        cost += g.cost * scale;
        grad_in.add_assign(&g.grad_in);
        grad_out.add_assign(&g.grad_out);
    }

    grad_in.scale(scale);
    grad_out.scale(scale);
    (cost, Matrix::vstack(&grad_in, &grad_out))
}
