//! # Engine — Lazily Built, Shared Knowledge Base
//!
//! [`Engine`] is the handle a process creates once and passes around by
//! reference (or `Arc`). Nothing is read at construction; the first query
//! runs the whole load-and-build pipeline, later queries reuse it.
//!
//! ## Lifecycle
//!
//! ```text
//! Unloaded ──first call──► Loading ──build done──► Loaded
//!                             │
//!              other callers wait on the Condvar
//! ```
//!
//! | State | Guarded by | Readers |
//! |-------|-----------|---------|
//! | `LoadState` | `parking_lot::Mutex` + `Condvar` | `load_state()` |
//! | `KnowledgeBase` | `OnceLock` | every query, lock-free once set |
//!
//! Exactly one caller builds. It releases the mutex while building so
//! `load_state()` stays responsive and reports `Loading`. A build that
//! panics puts the state back to `Unloaded` and wakes the waiters, and the
//! next caller builds again.

use std::sync::OnceLock;

use parking_lot::{Condvar, Mutex, MutexGuard};
use serde::Serialize;

use crate::config::EngineConfig;
use crate::core::{Domain, PositionId};
use crate::error::{QueryError, StoreError};
use crate::query::{
    ActivatedRule, ContradictionReport, Critique, DialecticalAnalysis, ForwardChain,
    InferenceResult, KnowledgeBase, PositionView, ScoredPosition, SpecializationReport,
    Statistics, ThinkerComparison,
};
use crate::store::{CorpusSource, JsonFileSource};

/// Where the engine is in its one-time build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
}

/// Owner of the corpus source and, once built, the knowledge base.
pub struct Engine {
    config: EngineConfig,
    source: Box<dyn CorpusSource>,
    state: Mutex<LoadState>,
    ready: Condvar,
    kb: OnceLock<KnowledgeBase>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("state", &self.load_state())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Engine reading the JSON files named in `config`.
    pub fn new(config: EngineConfig) -> Self {
        let source = JsonFileSource::new(config.positions_path.clone(), config.rules_path.clone());
        Self::with_source(config, Box::new(source))
    }

    pub fn with_source(config: EngineConfig, source: Box<dyn CorpusSource>) -> Self {
        Self {
            config,
            source,
            state: Mutex::new(LoadState::Unloaded),
            ready: Condvar::new(),
            kb: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current lifecycle state. Never triggers a load.
    pub fn load_state(&self) -> LoadState {
        *self.state.lock()
    }

    /// Builds the knowledge base if no one has yet, waiting for a build in
    /// progress otherwise.
    pub fn ensure_loaded(&self) -> &KnowledgeBase {
        if let Some(kb) = self.kb.get() {
            return kb;
        }

        let mut state = self.state.lock();
        loop {
            if let Some(kb) = self.kb.get() {
                return kb;
            }
            match *state {
                LoadState::Loading => self.ready.wait(&mut state),
                LoadState::Unloaded | LoadState::Loaded => {
                    *state = LoadState::Loading;
                    let built = MutexGuard::unlocked(&mut state, || {
                        let reset = ResetOnUnwind { engine: self };
                        let built = self.build();
                        std::mem::forget(reset);
                        built
                    });
                    let kb = self.kb.get_or_init(|| built);
                    *state = LoadState::Loaded;
                    self.ready.notify_all();
                    return kb;
                }
            }
        }
    }

    fn build(&self) -> KnowledgeBase {
        tracing::info!(
            positions = ?self.config.positions_path,
            rules = ?self.config.rules_path,
            "Loading corpus"
        );
        let records = or_empty(self.source.load_positions(), "positions");
        let rules = or_empty(self.source.load_rules(), "rules");
        KnowledgeBase::build(records, rules, self.config.clone())
    }

    // ─── Query surface ───────────────────────────────────────────────

    pub fn query(
        &self,
        text: &str,
        max_results: usize,
        thinker: Option<&str>,
        domain: Option<Domain>,
    ) -> Vec<ScoredPosition> {
        self.ensure_loaded().query(text, max_results, thinker, domain)
    }

    pub fn apply_rules(&self, query: &str) -> Vec<ActivatedRule> {
        self.ensure_loaded().apply_rules(query)
    }

    pub fn infer(&self, text: &str, max_positions: usize) -> InferenceResult {
        self.ensure_loaded().infer(text, max_positions)
    }

    pub fn critique(&self, claim: &str, max_results: usize) -> Critique {
        self.ensure_loaded().critique(claim, max_results)
    }

    pub fn forward_chain(
        &self,
        start_id: PositionId,
        max_depth: usize,
    ) -> Result<ForwardChain, QueryError> {
        self.ensure_loaded().forward_chain(start_id, max_depth)
    }

    pub fn find_contradictions(&self, id: PositionId) -> Result<ContradictionReport, QueryError> {
        self.ensure_loaded().find_contradictions(id)
    }

    pub fn find_specializations(&self, id: PositionId) -> Result<SpecializationReport, QueryError> {
        self.ensure_loaded().find_specializations(id)
    }

    pub fn dialectical_analysis(&self, topic: &str) -> Result<DialecticalAnalysis, QueryError> {
        self.ensure_loaded().dialectical_analysis(topic)
    }

    pub fn compare_thinkers(
        &self,
        thinker1: &str,
        thinker2: &str,
        topic: Option<&str>,
    ) -> ThinkerComparison {
        self.ensure_loaded().compare_thinkers(thinker1, thinker2, topic)
    }

    pub fn get_positions_by_topic(&self, topic: &str, thinker: Option<&str>) -> Vec<PositionView> {
        self.ensure_loaded().get_positions_by_topic(topic, thinker)
    }

    pub fn get_positions_by_domain(
        &self,
        domain: Domain,
        thinker: Option<&str>,
        max: usize,
    ) -> Vec<PositionView> {
        self.ensure_loaded().get_positions_by_domain(domain, thinker, max)
    }

    pub fn get_related_topics(&self, topic: &str) -> Vec<String> {
        self.ensure_loaded().get_related_topics(topic)
    }

    pub fn get_all_topics(&self, thinker: Option<&str>) -> Vec<String> {
        self.ensure_loaded().get_all_topics(thinker)
    }

    pub fn get_all_thinkers(&self) -> Vec<String> {
        self.ensure_loaded().get_all_thinkers()
    }

    pub fn statistics(&self) -> Statistics {
        self.ensure_loaded().statistics()
    }
}

/// Armed for the duration of a build. Dropped only when the build unwinds:
/// puts the engine back to `Unloaded` and wakes waiters so one of them can
/// retry.
struct ResetOnUnwind<'a> {
    engine: &'a Engine,
}

impl Drop for ResetOnUnwind<'_> {
    fn drop(&mut self) {
        tracing::error!("Knowledge base build panicked, resetting to unloaded");
        *self.engine.state.lock() = LoadState::Unloaded;
        self.engine.ready.notify_all();
    }
}

/// Store failures degrade to an empty sequence; only the log remembers them.
fn or_empty<T>(loaded: Result<Vec<T>, StoreError>, what: &str) -> Vec<T> {
    match loaded {
        Ok(items) => {
            tracing::info!(count = items.len(), "Loaded {what}");
            items
        }
        Err(err @ StoreError::SourceUnavailable { .. }) => {
            tracing::warn!(error = %err, "No {what} source, continuing empty");
            Vec::new()
        }
        Err(err) => {
            tracing::error!(error = %err, "Rejected {what} source, continuing empty");
            Vec::new()
        }
    }
}
