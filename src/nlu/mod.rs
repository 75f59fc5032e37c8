//! # NLU — Lexical Analysis of Positions and Queries
//!
//! Everything the engine knows about a piece of text comes from two cheap,
//! deterministic heuristics:
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`keywords`] | Tokenizes text into a keyword set (stopwords removed) |
//! | [`domain`] | Files a position under a [`Domain`] via marker substrings |
//!
//! Neither uses a model. Both are pure functions, so deriving them twice
//! from the same record always gives the same answer.

/// Tokenizer, stopword lists and keyword extraction.
pub mod keywords;

/// Marker-table domain classifier.
pub mod domain;

pub use domain::{classify_domain, Domain};
pub use keywords::{extract_keywords, extract_query_keywords, normalize, word_set};
