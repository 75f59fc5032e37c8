//! # Relevance Scoring
//!
//! Three overlap signals, weighted and summed:
//!
//! | Signal | Weight | Ratio |
//! |--------|--------|-------|
//! | keyword | 0.40 | shared keywords / query keywords |
//! | topic | 0.35 | topic words that are query keywords / topic words |
//! | text | 0.25 | shared whitespace words / query words |
//!
//! Every denominator is floored at 1, so empty inputs score 0 instead of
//! dividing by zero.

use std::collections::BTreeSet;

use crate::core::Position;
use crate::nlu::word_set;

const KEYWORD_WEIGHT: f64 = 0.40;
const TOPIC_WEIGHT: f64 = 0.35;
const TEXT_WEIGHT: f64 = 0.25;

/// Pre-tokenized query, built once per call and reused for every candidate.
pub struct ScoringQuery {
    pub keywords: BTreeSet<String>,
    pub words: BTreeSet<String>,
}

impl ScoringQuery {
    pub fn new(keywords: BTreeSet<String>, text: &str) -> Self {
        Self {
            keywords,
            words: word_set(text),
        }
    }
}

fn ratio(hits: usize, total: usize) -> f64 {
    hits as f64 / total.max(1) as f64
}

/// Weighted relevance of `pos` to `query`, in `[0, 1]`.
pub fn relevance(pos: &Position, query: &ScoringQuery) -> f64 {
    let keyword_score = ratio(
        pos.keywords.intersection(&query.keywords).count(),
        query.keywords.len(),
    );

    let topic_words = word_set(&pos.topic);
    let topic_score = ratio(
        topic_words.intersection(&query.keywords).count(),
        topic_words.len(),
    );

    let text_words = word_set(&pos.text);
    let text_score = ratio(
        text_words.intersection(&query.words).count(),
        query.words.len(),
    );

    keyword_score * KEYWORD_WEIGHT + topic_score * TOPIC_WEIGHT + text_score * TEXT_WEIGHT
}
