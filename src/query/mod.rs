//! # Query Engine — Read-Only Operations over the Built Corpus
//!
//! [`KnowledgeBase`] bundles everything the load pass produces: the
//! [`Corpus`] with its indices, the [`RelationGraphs`] and the
//! [`TopicAdjacency`]. All operations take `&self` and only read.
//!
//! ## Operations
//!
//! | Operation | Module | Reads |
//! |-----------|--------|-------|
//! | `query` | [`search`] | keyword index, thinker/domain indices |
//! | `apply_rules` | [`search`] | rules, positions |
//! | `infer` | [`search`] | rules, `query`, entailment graph |
//! | `critique` | [`search`] | `query` |
//! | `forward_chain` | [`graph`] | entailment graph |
//! | `find_contradictions` | [`graph`] | contradiction graph |
//! | `find_specializations` | [`graph`] | specificity graph |
//! | `dialectical_analysis` | [`graph`] | topic index, contradiction graph |
//! | `compare_thinkers` | [`graph`] | thinker/topic indices, contradiction graph |
//! | `get_positions_by_topic` / `_by_domain` | [`lookup`] | topic/domain indices |
//! | `get_related_topics`, `get_all_topics`, `get_all_thinkers` | [`lookup`] | indices, adjacency |
//! | `statistics` | [`lookup`] | everything |
//!
//! Every result is a view of stored positions; no text is generated.

/// Semantic search, rules, inference and critique.
pub mod search;

/// Traversals of the relation graphs.
pub mod graph;

/// Direct index lookups and statistics.
pub mod lookup;

pub mod results;
pub mod scoring;

use std::time::Instant;

use crate::config::EngineConfig;
use crate::core::{Corpus, Position, PositionId, PositionRecord, Rule};
use crate::inference::{RelationGraphs, TopicAdjacency};

pub use results::*;

/// The fully built, immutable state the engine answers queries from.
#[derive(Debug)]
pub struct KnowledgeBase {
    corpus: Corpus,
    graphs: RelationGraphs,
    topics: TopicAdjacency,
    config: EngineConfig,
}

impl KnowledgeBase {
    /// Runs the whole build pipeline: positions → indices → relation pass →
    /// topic adjacency.
    pub fn build(records: Vec<PositionRecord>, rules: Vec<Rule>, config: EngineConfig) -> Self {
        let started = Instant::now();
        let positions: Vec<Position> = records.into_iter().map(Position::from_record).collect();
        let corpus = Corpus::new(positions, rules);
        let graphs = RelationGraphs::infer(&corpus);
        let topics = TopicAdjacency::build(&corpus);

        tracing::info!(
            positions = corpus.position_count(),
            rules = corpus.rule_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Knowledge base built"
        );

        Self {
            corpus,
            graphs,
            topics,
            config,
        }
    }

    /// A knowledge base with no positions and no rules.
    pub fn empty(config: EngineConfig) -> Self {
        Self::build(Vec::new(), Vec::new(), config)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn graphs(&self) -> &RelationGraphs {
        &self.graphs
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Looks up a position, or reports it missing.
    fn position(&self, id: PositionId) -> Result<&Position, crate::error::QueryError> {
        self.corpus
            .get(id)
            .ok_or(crate::error::QueryError::PositionNotFound(id))
    }

    fn primary_thinker(&self) -> &str {
        &self.config.primary_thinker
    }
}
