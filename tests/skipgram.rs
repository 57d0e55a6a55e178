use w2vgrad::data::ScriptedDataset;
use w2vgrad::math::Matrix;
use w2vgrad::models::{ContextModel, SkipGram};
use w2vgrad::objective::{NegativeSampling, Objective, Softmax};
use w2vgrad::vocab::Vocab;

fn setup() -> (Vocab, Matrix, Matrix) {
    let vocab = Vocab::from_tokens(["a", "b", "c", "d", "e"]);
    let input = Matrix::from_rows(&[
        vec![0.1, 0.9, -0.3],
        vec![0.5, -0.2, 0.7],
        vec![-0.8, 0.1, 0.2],
        vec![0.3, 0.3, 0.3],
        vec![0.0, -0.6, 0.5],
    ]);
    let output = Matrix::from_rows(&[
        vec![0.2, -0.5, 0.9],
        vec![-0.3, 0.8, 0.1],
        vec![0.7, 0.7, -0.2],
        vec![-0.6, -0.1, 0.4],
        vec![0.05, 0.3, 0.6],
    ]);
    (vocab, input, output)
}

fn words(ws: &[&str]) -> Vec<String> {
    ws.iter().map(|s| s.to_string()).collect()
}

#[test]
fn softmax_cost_and_gradients_are_sums() {
    let (vocab, input, output) = setup();
    let ctx = words(&["a", "b", "e", "d", "b", "c"]);
    let mut ds = ScriptedDataset::new(vec![0]);
    let g = SkipGram.cost_and_gradient("c", 3, &ctx, &vocab, &input, &output, &mut ds, &Softmax);

    let predicted = input.row(2);
    let mut cost = 0.0;
    let mut grad_pred = vec![0.0; 3];
    let mut grad_out = Matrix::zeros(5, 3);
    for w in &ctx {
        let one = Softmax::compute(predicted, vocab[w.as_str()], &output);
        cost += one.cost;
        for (a, b) in grad_pred.iter_mut().zip(&one.grad_pred) {
            *a += b;
        }
        grad_out.add_assign(&one.grad_out);
    }

    assert!((g.cost - cost).abs() < 1e-12);
    assert!(g.grad_out.max_abs_diff(&grad_out) < 1e-12);
    for r in 0..5 {
        for c in 0..3 {
            let expected = if r == 2 { grad_pred[c] } else { 0.0 };
            assert!((g.grad_in.get(r, c) - expected).abs() < 1e-12);
        }
    }
}

#[test]
fn negative_sampling_replays_same_draws() {
    let (vocab, input, output) = setup();
    let ctx = words(&["a", "b"]);
    let ns = NegativeSampling::new(3);
    let script = vec![4, 0, 2, 3, 1, 1, 0];

    let mut ds = ScriptedDataset::new(script.clone());
    let g = SkipGram.cost_and_gradient("c", 1, &ctx, &vocab, &input, &output, &mut ds, &ns);

    let mut replay = ScriptedDataset::new(script);
    let mut cost = 0.0;
    let mut grad_out = Matrix::zeros(5, 3);
    for w in &ctx {
        let one = ns.cost_and_gradient(input.row(2), vocab.index(w), &output, &mut replay);
        cost += one.cost;
        grad_out.add_assign(&one.grad_out);
    }
    assert_eq!(ds.draws(), replay.draws());
    assert!((g.cost - cost).abs() < 1e-12);
    assert!(g.grad_out.max_abs_diff(&grad_out) < 1e-12);
}

#[test]
fn input_gradient_only_touches_center_row() {
    let (vocab, input, output) = setup();
    let ctx = words(&["e", "e", "a"]);
    let mut ds = ScriptedDataset::new(vec![1, 2, 3]);
    let g = SkipGram.cost_and_gradient(
        "b",
        2,
        &ctx,
        &vocab,
        &input,
        &output,
        &mut ds,
        &NegativeSampling::new(2),
    );
    for r in [0, 2, 3, 4] {
        assert_eq!(g.grad_in.row(r), &[0.0, 0.0, 0.0]);
    }
    assert!(g.grad_in.row(1).iter().any(|&v| v != 0.0));
}

#[test]
#[should_panic(expected = "not in the vocabulary")]
fn unknown_context_word_panics() {
    let (vocab, input, output) = setup();
    let mut ds = ScriptedDataset::new(vec![0]);
    SkipGram.cost_and_gradient("a", 1, &words(&["z"]), &vocab, &input, &output, &mut ds, &Softmax);
}

#[test]
#[should_panic(expected = "differ in dimension")]
fn mismatched_dimensions_panic() {
    let (vocab, input, _) = setup();
    let output = Matrix::zeros(5, 2);
    let mut ds = ScriptedDataset::new(vec![0]);
    SkipGram.cost_and_gradient("a", 1, &words(&["b"]), &vocab, &input, &output, &mut ds, &Softmax);
}
