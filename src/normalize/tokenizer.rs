//! Word-boundary tokenization with treebank-style contraction splitting.

use unicode_segmentation::UnicodeSegmentation;

use crate::constants::normalize::{
    APOSTROPHES, CLITIC_SUFFIXES, CURRENCY_PREFIXES, NUMBER_JOINERS, WORD_JOINERS,
};

/// Split `text` into word and punctuation tokens.
///
/// Whitespace is dropped, punctuation marks are kept as their own tokens, and
/// English contractions are split off the word they attach to
/// (`don't` -> `do`, `n't`; `she's` -> `she`, `'s`). Compounds stay whole the
/// way a treebank tokenizer leaves them: `e-mail`, `and/or`, `12:30`, `£1000`.
pub fn word_tokenize(text: &str) -> Vec<&str> {
    let segments: Vec<(usize, &str)> = text
        .split_word_bound_indices()
        .filter(|(_, segment)| !segment.chars().all(char::is_whitespace))
        .collect();

    let mut tokens = Vec::with_capacity(segments.len());
    let mut idx = 0;
    while idx < segments.len() {
        let (start, first) = segments[idx];
        let mut end = start + first.len();
        idx += 1;

        if is_currency_prefix(first) {
            if let Some(&(next_start, next)) = segments.get(idx) {
                if next_start == end && next.starts_with(char::is_numeric) {
                    end = next_start + next.len();
                    idx += 1;
                }
            }
        }

        while let (Some(&(sep_start, separator)), Some(&(next_start, next))) =
            (segments.get(idx), segments.get(idx + 1))
        {
            let adjacent = sep_start == end && next_start == sep_start + separator.len();
            if !adjacent || !joins(&text[start..end], separator, next) {
                break;
            }
            end = next_start + next.len();
            idx += 2;
        }

        let word = &text[start..end];
        match split_clitic(word) {
            Some((head, clitic)) => {
                tokens.push(head);
                tokens.push(clitic);
            }
            None => tokens.push(word),
        }
    }
    tokens
}

/// True if `token` is non-empty and every char is alphabetic or numeric.
pub fn is_alphanumeric_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}

fn split_clitic(word: &str) -> Option<(&str, &str)> {
    let (apostrophe_at, apostrophe) = word
        .char_indices()
        .rev()
        .find(|(_, ch)| APOSTROPHES.contains(ch))?;
    let tail = &word[apostrophe_at + apostrophe.len_utf8()..];

    if tail.eq_ignore_ascii_case("t") {
        let head = &word[..apostrophe_at];
        if head.len() > 1 && head.ends_with(['n', 'N']) {
            let split_at = apostrophe_at - 1;
            return Some((&word[..split_at], &word[split_at..]));
        }
        return None;
    }

    if apostrophe_at > 0
        && CLITIC_SUFFIXES
            .iter()
            .any(|suffix| tail.eq_ignore_ascii_case(suffix))
    {
        return Some((&word[..apostrophe_at], &word[apostrophe_at..]));
    }
    None
}

fn single_char(segment: &str) -> Option<char> {
    let mut chars = segment.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

fn is_currency_prefix(segment: &str) -> bool {
    single_char(segment).is_some_and(|ch| CURRENCY_PREFIXES.contains(&ch))
}

fn joins(left: &str, separator: &str, right: &str) -> bool {
    let (Some(separator), Some(last), Some(first)) = (
        single_char(separator),
        left.chars().next_back(),
        right.chars().next(),
    ) else {
        return false;
    };
    if WORD_JOINERS.contains(&separator) {
        return last.is_alphanumeric() && first.is_alphanumeric();
    }
    NUMBER_JOINERS.contains(&separator) && last.is_numeric() && first.is_numeric()
}
