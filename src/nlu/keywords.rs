//! # Keyword Extraction — Lexical Heuristics for English Positions
//!
//! Every [`Position`](crate::core::Position) carries a keyword set derived
//! from its text. The same tokenizer is reused for incoming queries, with an
//! extra list of question words stripped out.
//!
//! ## Pipeline
//!
//! ```text
//! text
//!   ├── 1. NFC normalize (Unicode)
//!   ├── 2. lower-case
//!   ├── 3. alphabetic runs  \b[a-z]+\b
//!   ├── 4. drop tokens with len ≤ 2
//!   └── 5. drop stopwords
//! ```
//!
//! The result is a [`BTreeSet`] so iteration order is stable across runs,
//! which keeps every downstream index deterministic.
//!
//! ## Filters
//!
//! | List | Applied to | Purpose |
//! |------|------------|---------|
//! | [`STOPWORDS`] | positions and queries | articles, auxiliaries, pronouns |
//! | [`QUERY_STOPWORDS`] | queries only | "what", "explain", "view", ... |

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Function words that never count as keywords of a position.
///
/// Negations ("not", "no", "nor") are in here on purpose: contradiction
/// detection looks at the raw text, the keyword set only gates relevance.
pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "shall",
    "can", "of", "to", "in", "for", "on", "with", "at", "by", "from", "as", "into", "through",
    "during", "before", "after", "above", "below", "between", "under", "again", "further",
    "then", "once", "here", "there", "when", "where", "why", "how", "all", "each", "every",
    "both", "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own",
    "same", "so", "than", "too", "very", "just", "and", "but", "if", "or", "because", "until",
    "while", "although", "though", "this", "that", "these", "those", "it", "its", "they",
    "them", "their", "what", "which", "who", "whom", "whose",
];

/// Words typical of questions about a thinker that carry no content.
///
/// "What does he **think** about the **view** that..." should match on the
/// subject matter only.
pub const QUERY_STOPWORDS: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "which", "explain", "describe", "tell",
    "about", "mean", "think", "the", "a", "an", "is", "are", "was", "were", "be", "does",
    "view", "position", "say", "believe", "hold", "argue",
];

/// Regex for alphabetic runs, compiled once for the process.
fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[a-z]+\b").unwrap())
}

fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

fn is_query_stopword(word: &str) -> bool {
    QUERY_STOPWORDS.contains(&word)
}

/// Lower-cased, NFC-normalized copy of `text`.
///
/// Used wherever text is matched by substring, so that composed and
/// decomposed forms of the same word compare equal.
pub fn normalize(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

/// Alphabetic tokens longer than two characters, before stopword filtering.
fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    word_re()
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|w| w.len() > 2)
        .map(str::to_string)
}

/// Extracts the keyword set of a position text.
///
/// Deterministic and idempotent: the same input always yields the same set,
/// and feeding the joined output back in returns it unchanged.
///
/// # Example
///
/// ```rust
/// use position_inference::nlu::extract_keywords;
///
/// let kws = extract_keywords("Causation is not reducible to correlation");
/// assert!(kws.contains("causation"));
/// assert!(!kws.contains("not"));
/// ```
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    let text = normalize(text);
    tokens(&text).filter(|w| !is_stopword(w)).collect()
}

/// Extracts the keyword set of a query or claim.
///
/// Same pipeline as [`extract_keywords`], with [`QUERY_STOPWORDS`] removed
/// as well.
pub fn extract_query_keywords(text: &str) -> BTreeSet<String> {
    let text = normalize(text);
    tokens(&text)
        .filter(|w| !is_stopword(w) && !is_query_stopword(w))
        .collect()
}

/// Whitespace-delimited words of `text`, lower-cased, punctuation kept.
///
/// This is the coarse "whole text" view used by topic matching and the
/// text-overlap term of the relevance score.
pub fn word_set(text: &str) -> BTreeSet<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
