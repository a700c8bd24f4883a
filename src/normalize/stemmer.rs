//! Stemmer seam: a factory builds one stemmer per normalization call.

use std::borrow::Cow;

use rust_stemmers::{Algorithm, Stemmer};

use crate::errors::NormalizeError;

/// Reduces one token to its stem.
pub trait TokenStemmer {
    /// Stem of `token`.
    fn stem_token<'a>(&self, token: &'a str) -> Result<Cow<'a, str>, NormalizeError>;
}

/// Builds a fresh stemmer for each normalized value.
pub trait StemmerFactory: Send + Sync {
    /// Stemmer built by this factory.
    type Stemmer: TokenStemmer;

    /// Build a new stemmer.
    fn create(&self) -> Result<Self::Stemmer, NormalizeError>;
}

/// Snowball English (Porter2) stemmer from `rust-stemmers`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishStemmer;

impl StemmerFactory for EnglishStemmer {
    type Stemmer = Stemmer;

    fn create(&self) -> Result<Self::Stemmer, NormalizeError> {
        Ok(Stemmer::create(Algorithm::English))
    }
}

impl TokenStemmer for Stemmer {
    fn stem_token<'a>(&self, token: &'a str) -> Result<Cow<'a, str>, NormalizeError> {
        Ok(self.stem(token))
    }
}
