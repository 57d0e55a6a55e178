use rand::rngs::StdRng;
use rand::Rng;

use crate::rng::rng_from_seed;

/// Source of training examples and negative samples.
///
/// Implementations own their randomness, so replaying an oracle from the
/// same state reproduces the same draws.
pub trait Dataset {
    /// Draw a token index in `0..V`.
    fn sample_token_index(&mut self) -> usize;

    /// Draw a center word and its context words for a window of `window`.
    fn random_context(&mut self, window: usize) -> (String, Vec<String>);
}

/// Uniform toy corpus over a handful of tokens.
///
/// Every draw is uniform: the center word, each of the `2 * window` context
/// words, and every sampled token index.
#[derive(Debug, Clone)]
pub struct ToyDataset {
    tokens: Vec<String>,
    rng: StdRng,
}

impl ToyDataset {
    pub const TOKENS: [&'static str; 5] = ["a", "b", "c", "d", "e"];

    /// The five-token corpus `a..e`.
    pub fn new(seed: u64) -> Self {
        Self::with_tokens(Self::TOKENS, seed)
    }

    pub fn with_tokens<I, S>(tokens: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        assert!(!tokens.is_empty(), "toy dataset needs at least one token");
        Self {
            tokens,
            rng: rng_from_seed(seed),
        }
    }

    fn random_token(&mut self) -> String {
        let i = self.rng.gen_range(0..self.tokens.len());
        self.tokens[i].clone()
    }
}

impl Dataset for ToyDataset {
    fn sample_token_index(&mut self) -> usize {
        self.rng.gen_range(0..self.tokens.len())
    }

    fn random_context(&mut self, window: usize) -> (String, Vec<String>) {
        let center = self.random_token();
        let context = (0..2 * window).map(|_| self.random_token()).collect();
        (center, context)
    }
}

/// Deterministic oracle replaying a fixed script.
///
/// `sample_token_index` cycles through `indices`; `random_context` always
/// returns the same example and ignores the window.
#[derive(Debug, Clone)]
pub struct ScriptedDataset {
    indices: Vec<usize>,
    pos: usize,
    center: String,
    context: Vec<String>,
}

impl ScriptedDataset {
    pub fn new(indices: Vec<usize>) -> Self {
        assert!(!indices.is_empty(), "scripted dataset needs at least one index");
        Self {
            indices,
            pos: 0,
            center: String::new(),
            context: Vec::new(),
        }
    }

    /// Also answer `random_context` with `center` and `context`.
    pub fn with_context<S: Into<String>>(mut self, center: S, context: Vec<S>) -> Self {
        self.center = center.into();
        self.context = context.into_iter().map(Into::into).collect();
        self
    }

    /// Number of indices handed out so far.
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl Dataset for ScriptedDataset {
    fn sample_token_index(&mut self) -> usize {
        let idx = self.indices[self.pos % self.indices.len()];
        self.pos += 1;
        idx
    }

    fn random_context(&mut self, _window: usize) -> (String, Vec<String>) {
        (self.center.clone(), self.context.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toy_context_has_two_per_window() {
        let mut ds = ToyDataset::new(1);
        let (center, ctx) = ds.random_context(3);
        assert_eq!(ctx.len(), 6);
        assert!(ToyDataset::TOKENS.contains(&center.as_str()));
        for w in &ctx {
            assert!(ToyDataset::TOKENS.contains(&w.as_str()));
        }
    }

    #[test]
    fn toy_indices_stay_in_range() {
        let mut ds = ToyDataset::new(5);
        for _ in 0..200 {
            assert!(ds.sample_token_index() < 5);
        }
    }

    #[test]
    fn cloned_toy_replays_stream() {
        let mut a = ToyDataset::new(31415);
        let mut b = a.clone();
        let xs: Vec<usize> = (0..20).map(|_| a.sample_token_index()).collect();
        let ys: Vec<usize> = (0..20).map(|_| b.sample_token_index()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn scripted_cycles() {
        let mut ds = ScriptedDataset::new(vec![2, 0]);
        let got: Vec<usize> = (0..5).map(|_| ds.sample_token_index()).collect();
        assert_eq!(got, vec![2, 0, 2, 0, 2]);
        assert_eq!(ds.draws(), 5);
    }
}
