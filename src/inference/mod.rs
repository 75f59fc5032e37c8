//! # Inference — Derived Relations Among Positions
//!
//! Built once, right after the corpus is indexed, and read-only afterwards.
//!
//! | Structure | Relation | Shape |
//! |-----------|----------|-------|
//! | [`RelationGraphs::entailment`] | A entails B | directed |
//! | [`RelationGraphs::contradiction`] | A and B oppose | symmetric |
//! | [`RelationGraphs::specificity`] | A instantiates B | directed |
//! | [`TopicAdjacency`] | topics share a word | symmetric |
//!
//! Nothing here holds information that cannot be rebuilt from the
//! positions alone.
//!
//! ## Example
//!
//! ```text
//! 1: "Causation is not reducible to correlation"   (topic: causation)
//! 2: "Causation is reducible to correlation"       (topic: causation)
//! ───────────────────────────────────────────────
//! shared keywords {causation, reducible, correlation}, ("is not", "is")
//! contradiction: 1 ⟷ 2
//! ```

/// All-pairs relation pass.
pub mod relations;

/// Topic adjacency from shared topic words.
pub mod topics;

pub use relations::{topics_related, RelationGraphs};
pub use topics::TopicAdjacency;
