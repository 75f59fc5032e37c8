//! # Position Inference
//!
//! Loads a corpus of attributed philosophical positions plus authored rules,
//! derives entailment, contradiction and specificity relations between the
//! positions, and answers questions by returning stored statements.
//!
//! ## Pipeline
//!
//! ```text
//! CorpusSource ──► Position (keywords, domain) ──► Corpus indices
//!                                                      │
//!                         RelationGraphs + TopicAdjacency
//!                                                      │
//!                                   KnowledgeBase ◄── Engine (lazy, once)
//! ```
//!
//! Every answer is a selection of stored positions. The engine never writes
//! text of its own.
//!
//! ## Example
//!
//! ```rust
//! use position_inference::core::PositionRecord;
//! use position_inference::store::InMemorySource;
//! use position_inference::{Engine, EngineConfig};
//!
//! let record = |id, text: &str| PositionRecord {
//!     id,
//!     thinker: "x".to_string(),
//!     position: text.to_string(),
//!     topic: "causation".to_string(),
//! };
//! let source = InMemorySource::new(
//!     vec![
//!         record(1, "Causation is not reducible to correlation"),
//!         record(2, "Causation is reducible to correlation"),
//!     ],
//!     Vec::new(),
//! );
//! let engine = Engine::with_source(EngineConfig::default(), Box::new(source));
//! let report = engine.find_contradictions(1).unwrap();
//! assert_eq!(report.contradictions[0].id, 2);
//! ```

/// Configuration read once at engine creation.
pub mod config;

/// Position, Rule and the indexed Corpus.
pub mod core;

/// Lazily built engine handle.
pub mod engine;

/// Store and query error types.
pub mod error;

/// Relation graphs and topic adjacency.
pub mod inference;

/// Keyword extraction and domain classification.
pub mod nlu;

/// Query operations over a built knowledge base.
pub mod query;

/// Record sources.
pub mod store;

pub use config::EngineConfig;
pub use engine::{Engine, LoadState};
pub use error::{QueryError, StoreError};
pub use query::KnowledgeBase;
