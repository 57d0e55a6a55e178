//! Cost and gradient computation for word2vec embeddings.
//!
//! Two objectives ([`objective::Softmax`], [`objective::NegativeSampling`])
//! score one predicted vector against one target; two context models
//! ([`models::SkipGram`], [`models::Cbow`]) combine them over a training
//! example into gradients for the input and output embedding matrices.

pub mod batch;
pub mod config;
pub mod data;
pub mod error;
pub mod gradcheck;
pub mod logging;
pub mod math;
pub mod models;
pub mod objective;
pub mod rng;
pub mod selfcheck;
pub mod vocab;

pub use error::{Error, Result};
pub use math::{normalize_rows, Matrix};
