use std::collections::HashMap;
use std::ops::Index;

/// Dense mapping between tokens and row indices of the embedding matrices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocab {
    index: HashMap<String, usize>,
    tokens: Vec<String>,
}

impl Vocab {
    /// Assign indices in iteration order. A repeated token keeps its first index.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocab = Vocab::default();
        for tok in tokens {
            let tok = tok.into();
            if !vocab.index.contains_key(&tok) {
                vocab.index.insert(tok.clone(), vocab.tokens.len());
                vocab.tokens.push(tok);
            }
        }
        vocab
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Index of `token`. Panics if the token is not in the vocabulary.
    pub fn index(&self, token: &str) -> usize {
        match self.get(token) {
            Some(i) => i,
            None => panic!("token {token:?} is not in the vocabulary"),
        }
    }

    pub fn token(&self, idx: usize) -> Option<&str> {
        self.tokens.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Index<&str> for Vocab {
    type Output = usize;

    fn index(&self, token: &str) -> &usize {
        match self.index.get(token) {
            Some(i) => i,
            None => panic!("token {token:?} is not in the vocabulary"),
        }
    }
}
