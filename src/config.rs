use serde::Deserialize;
use std::fs;

use crate::error::{Error, Result};
use crate::gradcheck::GradCheck;
use crate::models::ModelKind;
use crate::objective::ObjectiveKind;

/// Self-check configuration loaded from a TOML or JSON file.
///
/// Missing fields take their default values.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Seed for the dataset oracle and window draws.
    pub seed: u64,
    /// Seed for the random embedding vectors.
    pub vector_seed: u64,
    /// Embedding dimension.
    pub dimension: usize,
    /// Examples per gradient evaluation.
    pub batch_size: usize,
    /// Largest context window.
    pub window: usize,
    /// Negatives per target for negative sampling.
    pub negative_samples: usize,
    /// Finite-difference step.
    pub epsilon: f64,
    /// Relative tolerance of the gradient check.
    pub tolerance: f64,
    pub models: Vec<ModelKind>,
    pub objectives: Vec<ObjectiveKind>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 31415,
            vector_seed: 9265,
            dimension: 3,
            batch_size: crate::batch::DEFAULT_BATCH_SIZE,
            window: crate::batch::DEFAULT_WINDOW,
            negative_samples: 10,
            epsilon: 1e-4,
            tolerance: 1e-5,
            models: ModelKind::ALL.to_vec(),
            objectives: ObjectiveKind::ALL.to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from the given path. Supports TOML or JSON based on
    /// the file extension.
    pub fn from_path(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, path.ends_with(".json"))
    }

    pub fn parse(content: &str, json: bool) -> Result<Self> {
        let cfg: Config = if json {
            serde_json::from_str(content)?
        } else {
            toml::from_str(content)?
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the self checks cannot run with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |field, reason: &str| {
            Err(Error::InvalidConfig {
                field,
                reason: reason.to_string(),
            })
        };
        if self.dimension == 0 {
            return invalid("dimension", "must be at least 1");
        }
        if self.batch_size == 0 {
            return invalid("batch_size", "must be at least 1");
        }
        if self.window == 0 {
            return invalid("window", "must be at least 1");
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return invalid("epsilon", "must be a positive number");
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return invalid("tolerance", "must be a positive number");
        }
        if self.models.is_empty() {
            return invalid("models", "needs at least one model");
        }
        if self.objectives.is_empty() {
            return invalid("objectives", "needs at least one objective");
        }
        Ok(())
    }

    pub fn gradcheck(&self) -> GradCheck {
        GradCheck::new(self.epsilon, self.tolerance)
    }
}
