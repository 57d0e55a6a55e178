//! Built-in self checks: row normalization and gradient checks of every
//! model/objective pair on the toy dataset.

use serde::Serialize;

use crate::batch::batch_cost_and_gradient;
use crate::config::Config;
use crate::data::ToyDataset;
use crate::error::{Error, Result};
use crate::gradcheck::GradCheckReport;
use crate::logging::log_check;
use crate::math::{normalize_rows, Matrix};
use crate::models::ModelKind;
use crate::objective::ObjectiveKind;
use crate::rng::rng_from_seed;
use crate::vocab::Vocab;

/// Normalize `[[3, 4], [1, 2]]` and compare against the known answer.
pub fn check_normalize_rows() -> Result<Matrix> {
    let x = normalize_rows(&Matrix::from_rows(&[vec![3.0, 4.0], vec![1.0, 2.0]]));
    let expected = Matrix::from_rows(&[vec![0.6, 0.8], vec![0.4472136, 0.89442719]]);
    for r in 0..x.rows {
        let close = x
            .row(r)
            .iter()
            .zip(expected.row(r))
            .all(|(a, b)| (a - b).abs() <= 1e-6 + 1e-5 * b.abs());
        if !close {
            return Err(Error::NormalizationMismatch {
                row: r,
                expected: expected.row(r).to_vec(),
                got: x.row(r).to_vec(),
            });
        }
    }
    log::info!("row normalization: {:?}", x.data);
    Ok(x)
}

/// Row-normalized standard-normal vectors: `2 * V` rows of `dimension` columns.
pub fn toy_vectors(cfg: &Config) -> Matrix {
    let mut rng = rng_from_seed(cfg.vector_seed);
    let rows = 2 * ToyDataset::TOKENS.len();
    normalize_rows(&Matrix::randn(rows, cfg.dimension, &mut rng))
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub model: ModelKind,
    pub objective: ObjectiveKind,
    pub report: GradCheckReport,
}

impl CheckOutcome {
    pub fn label(&self) -> String {
        format!("{}/{}", self.model.name(), self.objective.name())
    }
}

/// Gradient-check one model/objective pair over the stacked `vectors`.
///
/// Every evaluation replays the same dataset and window draws.
pub fn check_model(
    cfg: &Config,
    model: ModelKind,
    objective: ObjectiveKind,
    vectors: &Matrix,
) -> CheckOutcome {
    let vocab = Vocab::from_tokens(ToyDataset::TOKENS);
    let dataset = ToyDataset::new(cfg.seed);
    let window_rng = rng_from_seed(cfg.seed.wrapping_add(1));
    let m = model.build();
    let o = objective.build(cfg.negative_samples);

    let report = cfg.gradcheck().check(
        |x| {
            let mut ds = dataset.clone();
            let mut rng = window_rng.clone();
            batch_cost_and_gradient(
                m.as_ref(),
                o.as_ref(),
                &vocab,
                x,
                &mut ds,
                &mut rng,
                cfg.batch_size,
                cfg.window,
            )
        },
        vectors,
    );

    let outcome = CheckOutcome {
        model,
        objective,
        report,
    };
    log_check(&outcome.label(), &outcome.report);
    outcome
}

/// Run every configured model/objective pair.
///
/// Fails on a config that [`Config::validate`] rejects.
pub fn run(cfg: &Config) -> Result<Vec<CheckOutcome>> {
    cfg.validate()?;
    let vectors = toy_vectors(cfg);
    let mut out = Vec::new();
    for &model in &cfg.models {
        for &objective in &cfg.objectives {
            out.push(check_model(cfg, model, objective, &vectors));
        }
    }
    Ok(out)
}

/// Pretty-printed JSON array of outcomes.
pub fn to_json(outcomes: &[CheckOutcome]) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcomes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_self_check_passes() {
        let x = check_normalize_rows().unwrap();
        assert!((x.get(0, 0) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn run_rejects_empty_model_list() {
        let cfg = Config {
            models: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            run(&cfg),
            Err(Error::InvalidConfig { field: "models", .. })
        ));
    }

    #[test]
    fn run_rejects_zero_batch_instead_of_panicking() {
        let cfg = Config {
            batch_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            run(&cfg),
            Err(Error::InvalidConfig { field: "batch_size", .. })
        ));
    }

    #[test]
    fn json_report_lists_each_outcome() {
        let cfg = Config {
            batch_size: 5,
            models: vec![ModelKind::SkipGram],
            objectives: vec![ObjectiveKind::Softmax],
            ..Default::default()
        };
        let outcomes = run(&cfg).unwrap();
        let txt = to_json(&outcomes).unwrap();
        let value: serde_json::Value = serde_json::from_str(&txt).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["model"], "skipgram");
        assert_eq!(arr[0]["objective"], "softmax");
        assert_eq!(arr[0]["report"]["checked"], 30);
        assert!(arr[0]["report"]["mismatches"].as_array().unwrap().is_empty());
    }

    #[test]
    fn toy_vectors_are_unit_rows() {
        let v = toy_vectors(&Config::default());
        assert_eq!((v.rows, v.cols), (10, 3));
        for r in 0..v.rows {
            let n: f64 = v.row(r).iter().map(|x| x * x).sum();
            assert!((n - 1.0).abs() < 1e-12);
        }
    }
}
