//! # Graph Traversals — Chains, Contradictions, Dialectic, Comparison
//!
//! ## Forward Chaining
//!
//! Breadth-first over the entailment graph:
//!
//! ```text
//! level 0: [start]
//! level d: every unvisited target of level d-1, tagged with its source
//! stop at max_depth, or as soon as a level adds nothing
//! ```
//!
//! The graph is derived heuristically and may contain cycles, so one
//! visited set spans the whole traversal and no position appears twice.
//!
//! ## Dialectical Analysis
//!
//! Positions whose topic contains, or is contained by, the query topic form
//! the arena. Contradiction edges with both ends inside the arena become
//! thesis/antithesis pairs, each unordered pair reported once.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::core::{Position, PositionId};
use crate::error::QueryError;

use super::results::{
    Agreement, AttributedPosition, ChainStep, ContradictionReport, DialecticalAnalysis,
    DialecticalPair, Disagreement, ForwardChain, PositionRef, SpecializationReport,
    ThinkerComparison,
};
use super::KnowledgeBase;

const MAX_DIALECTICAL_PAIRS: usize = 20;
const MAX_SHARED_TOPICS: usize = 20;
const MAX_AGREEMENTS: usize = 15;
const MAX_DISAGREEMENTS: usize = 15;

/// Keyword overlap at which two same-topic positions count as agreeing.
const AGREEMENT_MIN_OVERLAP: usize = 3;

impl KnowledgeBase {
    /// Breadth-first walk of the entailment graph from `start_id`.
    pub fn forward_chain(
        &self,
        start_id: PositionId,
        max_depth: usize,
    ) -> Result<ForwardChain, QueryError> {
        let start = self.position(start_id)?;

        let mut chain = vec![ChainStep {
            depth: 0,
            id: start.id,
            position: start.text.clone(),
            topic: start.topic.clone(),
            thinker: start.thinker.clone(),
            entailed_from: None,
        }];

        let mut visited: HashSet<PositionId> = HashSet::from([start_id]);
        let mut current_level = vec![start_id];

        for depth in 1..=max_depth {
            let mut next_level = Vec::new();
            for &source in &current_level {
                for target in self.graphs.entailed_by(source) {
                    if !visited.insert(target) {
                        continue;
                    }
                    let Some(pos) = self.corpus.get(target) else {
                        continue;
                    };
                    chain.push(ChainStep {
                        depth,
                        id: pos.id,
                        position: pos.text.clone(),
                        topic: pos.topic.clone(),
                        thinker: pos.thinker.clone(),
                        entailed_from: Some(source),
                    });
                    next_level.push(target);
                }
            }
            if next_level.is_empty() {
                break;
            }
            current_level = next_level;
        }

        Ok(ForwardChain {
            starting_position: start.text.clone(),
            total_reached: chain.len(),
            chain,
        })
    }

    /// Every position judged to contradict `id`.
    pub fn find_contradictions(&self, id: PositionId) -> Result<ContradictionReport, QueryError> {
        let pos = self.position(id)?;
        let contradictions = self
            .graphs
            .contradicting(id)
            .filter_map(|other| self.corpus.get(other))
            .map(AttributedPosition::from)
            .collect();
        Ok(ContradictionReport {
            original: AttributedPosition::from(pos),
            contradictions,
        })
    }

    /// Every position `id` is a more specific instance of.
    pub fn find_specializations(&self, id: PositionId) -> Result<SpecializationReport, QueryError> {
        let pos = self.position(id)?;
        let generalizations = self
            .graphs
            .generalizations_of(id)
            .filter_map(|other| self.corpus.get(other))
            .map(AttributedPosition::from)
            .collect();
        Ok(SpecializationReport {
            original: AttributedPosition::from(pos),
            generalizations,
        })
    }

    /// Thesis/antithesis pairs among the positions on `topic`.
    pub fn dialectical_analysis(&self, topic: &str) -> Result<DialecticalAnalysis, QueryError> {
        let arena: Vec<&Position> = self
            .corpus
            .ids_matching_topic(topic)
            .into_iter()
            .filter_map(|id| self.corpus.get(id))
            .collect();

        if arena.is_empty() {
            return Err(QueryError::TopicNotFound(topic.to_string()));
        }

        let mut positions_by_thinker: BTreeMap<String, Vec<PositionRef>> = BTreeMap::new();
        for pos in &arena {
            positions_by_thinker
                .entry(pos.thinker.clone())
                .or_default()
                .push(PositionRef::from(*pos));
        }

        let in_arena: HashSet<PositionId> = arena.iter().map(|p| p.id).collect();
        let mut seen_pairs: HashSet<(PositionId, PositionId)> = HashSet::new();
        let mut contradictions = Vec::new();
        'arena: for pos in &arena {
            for other in self.graphs.contradicting(pos.id) {
                if !in_arena.contains(&other) {
                    continue;
                }
                let pair = (pos.id.min(other), pos.id.max(other));
                if !seen_pairs.insert(pair) {
                    continue;
                }
                let Some(antithesis) = self.corpus.get(other) else {
                    continue;
                };
                contradictions.push(DialecticalPair {
                    thesis: AttributedPosition::from(*pos),
                    antithesis: AttributedPosition::from(antithesis),
                });
                if contradictions.len() >= MAX_DIALECTICAL_PAIRS {
                    break 'arena;
                }
            }
        }

        let primary = self.primary_thinker();
        let primary_positions = arena
            .iter()
            .filter(|p| p.is_by(primary))
            .map(|p| PositionRef::from(*p))
            .collect();

        tracing::debug!(
            topic = %topic,
            positions = arena.len(),
            pairs = contradictions.len(),
            "dialectical analysis"
        );

        Ok(DialecticalAnalysis {
            topic: topic.to_string(),
            total_positions: arena.len(),
            thinkers: positions_by_thinker.keys().cloned().collect(),
            positions_by_thinker,
            contradictions,
            primary_positions,
        })
    }

    /// Agreements and disagreements between two thinkers, optionally
    /// restricted to a topic (substring match).
    ///
    /// - disagreement: a contradiction edge from one thinker's set to the
    ///   other's
    /// - agreement: same topic, no contradiction edge, ≥ 3 shared keywords;
    ///   ranked by overlap, largest first
    pub fn compare_thinkers(
        &self,
        thinker1: &str,
        thinker2: &str,
        topic: Option<&str>,
    ) -> ThinkerComparison {
        let mut ids1: BTreeSet<PositionId> =
            self.corpus.ids_by_thinker(thinker1).iter().copied().collect();
        let mut ids2: BTreeSet<PositionId> =
            self.corpus.ids_by_thinker(thinker2).iter().copied().collect();

        if let Some(topic) = topic {
            let on_topic: HashSet<PositionId> =
                self.corpus.ids_matching_topic(topic).into_iter().collect();
            ids1.retain(|id| on_topic.contains(id));
            ids2.retain(|id| on_topic.contains(id));
        }

        let positions1: Vec<&Position> = ids1.iter().filter_map(|id| self.corpus.get(*id)).collect();
        let positions2: Vec<&Position> = ids2.iter().filter_map(|id| self.corpus.get(*id)).collect();

        let topics1: BTreeSet<String> = positions1.iter().map(|p| p.topic_key()).collect();
        let topics2: BTreeSet<String> = positions2.iter().map(|p| p.topic_key()).collect();
        let shared_topics = topics1
            .intersection(&topics2)
            .take(MAX_SHARED_TOPICS)
            .cloned()
            .collect();

        let mut disagreements = Vec::new();
        for p1 in &positions1 {
            for other in self.graphs.contradicting(p1.id) {
                if !ids2.contains(&other) {
                    continue;
                }
                if let Some(p2) = self.corpus.get(other) {
                    disagreements.push(Disagreement {
                        first: PositionRef::from(*p1),
                        second: PositionRef::from(p2),
                    });
                }
            }
        }
        disagreements.truncate(MAX_DISAGREEMENTS);

        let mut agreements = Vec::new();
        for p1 in &positions1 {
            for p2 in &positions2 {
                if p1.topic_key() != p2.topic_key() || self.graphs.contradicts(p1.id, p2.id) {
                    continue;
                }
                let overlap = p1.keyword_overlap(p2);
                if overlap >= AGREEMENT_MIN_OVERLAP {
                    agreements.push(Agreement {
                        topic: p1.topic.clone(),
                        first: PositionRef::from(*p1),
                        second: PositionRef::from(*p2),
                        keyword_overlap: overlap,
                    });
                }
            }
        }
        agreements.sort_by(|a, b| b.keyword_overlap.cmp(&a.keyword_overlap));
        agreements.truncate(MAX_AGREEMENTS);

        ThinkerComparison {
            thinker1: thinker1.to_string(),
            thinker2: thinker2.to_string(),
            topic: topic.map(str::to_string),
            thinker1_count: positions1.len(),
            thinker2_count: positions2.len(),
            shared_topics,
            agreements,
            disagreements,
        }
    }
}
