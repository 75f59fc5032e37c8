//! # Query Results — Serializable Views of Stored Positions
//!
//! Every struct here is a plain `Serialize` value so a caller (CLI, request
//! handler) can hand it straight to `serde_json`. Text fields are copied
//! verbatim from the stored [`Position`]; nothing is summarized.
//!
//! Field names follow the record format (`position` for the statement
//! text) so output can be read with the same vocabulary as input.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::{Domain, Position, PositionId};

/// Rounds to three decimals, the precision of every reported score.
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Full view of a position.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PositionView {
    pub id: PositionId,
    pub thinker: String,
    pub position: String,
    pub topic: String,
    pub domain: Domain,
}

impl From<&Position> for PositionView {
    fn from(p: &Position) -> Self {
        Self {
            id: p.id,
            thinker: p.thinker.clone(),
            position: p.text.clone(),
            topic: p.topic.clone(),
            domain: p.domain,
        }
    }
}

/// A position ranked by `query`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredPosition {
    #[serde(flatten)]
    pub position: PositionView,
    /// Weighted relevance, rounded to three decimals.
    pub relevance: f64,
}

/// Short view without thinker or domain.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PositionRef {
    pub id: PositionId,
    pub position: String,
    pub topic: String,
}

impl From<&Position> for PositionRef {
    fn from(p: &Position) -> Self {
        Self {
            id: p.id,
            position: p.text.clone(),
            topic: p.topic.clone(),
        }
    }
}

/// Short view with the thinker.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttributedPosition {
    pub id: PositionId,
    pub thinker: String,
    pub position: String,
    pub topic: String,
}

impl From<&Position> for AttributedPosition {
    fn from(p: &Position) -> Self {
        Self {
            id: p.id,
            thinker: p.thinker.clone(),
            position: p.text.clone(),
            topic: p.topic.clone(),
        }
    }
}

// ─── Rules and inference ─────────────────────────────────────────

/// A rule that fired for a query, with its positions resolved.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActivatedRule {
    pub rule_id: String,
    pub rule_name: String,
    pub domain: String,
    pub relation_type: String,
    pub activation_strength: f64,
    /// Stored positions only; ids missing from the corpus are dropped.
    pub positions: Vec<PositionRef>,
}

/// A position reached by one entailment hop from a merged result.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntailedPosition {
    pub id: PositionId,
    pub position: String,
    pub topic: String,
    pub entailed_from: PositionId,
}

/// Output of `infer`: rule hits merged with semantic hits, plus one hop of
/// entailment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InferenceResult {
    pub query: String,
    pub positions: Vec<PositionRef>,
    pub entailed_positions: Vec<EntailedPosition>,
    pub rules_activated: usize,
    /// Merged positions before the `max_positions` cap.
    pub total_positions: usize,
}

// ─── Graph traversal ─────────────────────────────────────────────

/// One node of a forward chain.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChainStep {
    pub depth: usize,
    pub id: PositionId,
    pub position: String,
    pub topic: String,
    pub thinker: String,
    /// Absent for the starting position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entailed_from: Option<PositionId>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForwardChain {
    pub starting_position: String,
    pub chain: Vec<ChainStep>,
    pub total_reached: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContradictionReport {
    pub original: AttributedPosition,
    pub contradictions: Vec<AttributedPosition>,
}

/// Positions that a given position is a more specific instance of.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpecializationReport {
    pub original: AttributedPosition,
    pub generalizations: Vec<AttributedPosition>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DialecticalPair {
    pub thesis: AttributedPosition,
    pub antithesis: AttributedPosition,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DialecticalAnalysis {
    pub topic: String,
    pub total_positions: usize,
    pub thinkers: Vec<String>,
    pub positions_by_thinker: BTreeMap<String, Vec<PositionRef>>,
    pub contradictions: Vec<DialecticalPair>,
    /// Positions of the primary thinker within the topic.
    pub primary_positions: Vec<PositionRef>,
}

// ─── Comparison and critique ─────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Disagreement {
    pub first: PositionRef,
    pub second: PositionRef,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Agreement {
    pub topic: String,
    pub first: PositionRef,
    pub second: PositionRef,
    pub keyword_overlap: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThinkerComparison {
    pub thinker1: String,
    pub thinker2: String,
    pub topic: Option<String>,
    pub thinker1_count: usize,
    pub thinker2_count: usize,
    pub shared_topics: Vec<String>,
    pub agreements: Vec<Agreement>,
    pub disagreements: Vec<Disagreement>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Critique {
    pub claim: String,
    pub critiques: Vec<ScoredPosition>,
    /// Related positions without critical language.
    pub related_positions: Vec<ScoredPosition>,
}

// ─── Statistics ──────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Statistics {
    pub total_positions: usize,
    pub primary_positions: usize,
    pub total_rules: usize,
    pub total_topics: usize,
    pub total_thinkers: usize,
    pub thinker_counts: BTreeMap<String, usize>,
    pub domain_counts: BTreeMap<Domain, usize>,
    pub entailments: usize,
    /// Unordered contradicting pairs.
    pub contradictions: usize,
    pub specificities: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PositionRecord;

    #[test]
    fn scored_position_flattens_view() {
        let p = Position::from_record(PositionRecord {
            id: 3,
            thinker: "Hume".to_string(),
            position: "Custom is the guide of life.".to_string(),
            topic: "custom".to_string(),
        });
        let scored = ScoredPosition {
            position: PositionView::from(&p),
            relevance: round3(0.123456),
        };
        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["position"], "Custom is the guide of life.");
        assert_eq!(json["relevance"], 0.123);
        assert_eq!(json["domain"], "general");
    }

    #[test]
    fn chain_start_omits_entailed_from() {
        let step = ChainStep {
            depth: 0,
            id: 1,
            position: "p".to_string(),
            topic: "t".to_string(),
            thinker: "x".to_string(),
            entailed_from: None,
        };
        let json = serde_json::to_value(&step).unwrap();
        assert!(json.get("entailed_from").is_none());
    }
}
