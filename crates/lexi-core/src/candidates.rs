use std::cmp::Reverse;
use std::collections::HashMap;

use lexi_types::Token;

use crate::pos::is_interactive_pos;
use crate::preprocess::{DefaultPreprocessor, Preprocessor};

/// First-character bucketed lookup table for longest-match segmentation.
///
/// Every bucket is ordered longest key first. Keys of equal length keep the
/// order in which they were first registered, which is what decides between
/// two equally long candidates at the same offset.
#[derive(Debug, Clone, Default)]
pub struct CandidateIndex {
    buckets: HashMap<char, Vec<String>>,
    entries: HashMap<String, Token>,
}

impl CandidateIndex {
    /// Index the tokens accepted by the interactive-POS predicate
    pub fn from_tokens(tokens: &[Token]) -> Self {
        Self::build(tokens, is_interactive_pos)
    }

    /// Register `base` and `surface` of every token whose tag passes
    /// `predicate`. A key seen twice keeps its bucket position but takes the
    /// metadata of the last token registered under it.
    pub fn build<P>(tokens: &[Token], predicate: P) -> Self
    where
        P: Fn(&str) -> bool,
    {
        let preprocessor = DefaultPreprocessor;
        let mut buckets: HashMap<char, Vec<String>> = HashMap::new();
        let mut entries: HashMap<String, Token> = HashMap::new();

        for token in tokens {
            if !predicate(&token.pos) {
                continue;
            }

            for form in [&token.base, &token.surface] {
                let key = preprocessor.process(form);
                let Some(first) = key.chars().next() else {
                    continue;
                };

                entries.insert(key.clone(), token.clone());

                let bucket = buckets.entry(first).or_default();
                if !bucket.contains(&key) {
                    bucket.push(key);
                }
            }
        }

        // Stable: equal lengths stay in first-seen order
        for bucket in buckets.values_mut() {
            bucket.sort_by_key(|key| Reverse(key.chars().count()));
        }

        tracing::debug!(
            "Candidate index: {} tokens, {} keys, {} buckets",
            tokens.len(),
            entries.len(),
            buckets.len()
        );

        Self { buckets, entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Candidate keys starting with `first`, longest first
    pub fn bucket(&self, first: char) -> &[String] {
        self.buckets.get(&first).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Token registered under `key`
    pub fn token(&self, key: &str) -> Option<&Token> {
        self.entries.get(key)
    }

    /// Longest key that is a prefix of `rest`
    pub fn longest_prefix(&self, rest: &str) -> Option<&str> {
        let first = rest.chars().next()?;
        self.bucket(first)
            .iter()
            .find(|key| rest.starts_with(key.as_str()))
            .map(String::as_str)
    }
}
