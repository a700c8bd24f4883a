//! Per-value text normalization: lowercase, tokenize, filter, stem, rejoin.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::thread;

use tracing::Level;

use crate::constants::normalize::COMPONENT;
use crate::data::Value;
use crate::diagnostics::SharedDiagnostics;
use crate::errors::NormalizeError;
use crate::types::{NormalizedText, RowId};
use crate::utils::log_preview;

/// Stemmer factory seam.
pub mod stemmer;
/// English stopword set.
pub mod stopwords;
/// Word tokenizer.
pub mod tokenizer;

pub use stemmer::{EnglishStemmer, StemmerFactory, TokenStemmer};
pub use stopwords::{ENGLISH_STOPWORDS, StopwordSet};
pub use tokenizer::{is_alphanumeric_token, word_tokenize};

/// How a value was handled by the normalizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalizeStatus {
    /// The value was text and went through every step.
    Normalized,
    /// The value was not text; the result is empty.
    NonText,
    /// A step failed; the result is empty.
    Failed,
}

/// Normalized text plus how it was produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizeOutcome {
    /// Space-joined stems; empty unless `status` is `Normalized`.
    pub text: NormalizedText,
    /// How the value was handled.
    pub status: NormalizeStatus,
}

impl NormalizeOutcome {
    fn empty(status: NormalizeStatus) -> Self {
        Self {
            text: NormalizedText::new(),
            status,
        }
    }
}

/// Turns raw cell values into space-joined stems.
///
/// Never fails: non-text values and failing values are logged and yield an
/// empty string. A stemmer is created per value from the factory `F`.
pub struct TextNormalizer<F = EnglishStemmer> {
    stemmer: F,
    stopwords: StopwordSet,
    diagnostics: SharedDiagnostics,
}

impl TextNormalizer<EnglishStemmer> {
    /// English stopwords and the Snowball English stemmer.
    pub fn new(diagnostics: SharedDiagnostics) -> Self {
        Self::with_stemmer(EnglishStemmer, diagnostics)
    }
}

impl<F: StemmerFactory> TextNormalizer<F> {
    /// English stopwords with a custom stemmer factory.
    pub fn with_stemmer(stemmer: F, diagnostics: SharedDiagnostics) -> Self {
        Self {
            stemmer,
            stopwords: StopwordSet::english(),
            diagnostics,
        }
    }

    /// Replace the stopword set.
    pub fn with_stopwords(mut self, stopwords: StopwordSet) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Stopwords in use.
    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Normalize one value.
    pub fn normalize(&self, value: &Value) -> NormalizedText {
        self.normalize_value(None, value).text
    }

    /// Normalize the text cell of row `row`; diagnostics carry the row id.
    pub fn normalize_row(&self, row: RowId, value: &Value) -> NormalizeOutcome {
        self.normalize_value(Some(row), value)
    }

    fn normalize_value(&self, row: Option<RowId>, value: &Value) -> NormalizeOutcome {
        let location = row.map(|row| format!(" at row {row}")).unwrap_or_default();
        let Value::Text(text) = value else {
            self.diagnostics.record(
                Level::WARN,
                COMPONENT,
                &format!(
                    "skipping non-string{location}: {value} ({})",
                    value.kind().as_str()
                ),
            );
            return NormalizeOutcome::empty(NormalizeStatus::NonText);
        };

        let error = match quiet_catch_unwind(|| self.transform(text)) {
            Ok(Ok(normalized)) => {
                return NormalizeOutcome {
                    text: normalized,
                    status: NormalizeStatus::Normalized,
                };
            }
            Ok(Err(err)) => err,
            Err(payload) => NormalizeError::Panicked(panic_message(payload)),
        };
        self.diagnostics.record(
            Level::ERROR,
            COMPONENT,
            &format!(
                "transform_text failed{location} on input: {} | error: {error}",
                log_preview(text)
            ),
        );
        NormalizeOutcome::empty(NormalizeStatus::Failed)
    }

    fn transform(&self, text: &str) -> Result<NormalizedText, NormalizeError> {
        let stemmer = self.stemmer.create()?;
        let lowered = text.to_lowercase();
        let mut stems = Vec::new();
        for token in word_tokenize(&lowered) {
            if !is_alphanumeric_token(token) || self.stopwords.is_stop_token(token) {
                continue;
            }
            stems.push(stemmer.stem_token(token)?.into_owned());
        }
        Ok(stems.join(" "))
    }
}

thread_local! {
    static QUIET_PANICS: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// `catch_unwind` whose panics stay off stderr; they are reported through
/// diagnostics instead. Panics on other threads, or outside this call, still
/// reach the previously installed hook.
fn quiet_catch_unwind<R>(work: impl FnOnce() -> R) -> thread::Result<R> {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !QUIET_PANICS.with(Cell::get) {
                previous(info);
            }
        }));
    });
    QUIET_PANICS.with(|quiet| quiet.set(true));
    let result = panic::catch_unwind(AssertUnwindSafe(work));
    QUIET_PANICS.with(|quiet| quiet.set(false));
    result
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
