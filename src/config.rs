//! Engine configuration.

use std::path::PathBuf;

/// Default location of the positions file, relative to the working directory.
pub const DEFAULT_POSITIONS_PATH: &str = "data/positions.json";

/// Default location of the rules file.
pub const DEFAULT_RULES_PATH: &str = "data/rules.json";

/// Thinker whose positions `infer` and `critique` draw from by default.
pub const DEFAULT_PRIMARY_THINKER: &str = "kuczynski";

/// Settings read once when the [`Engine`](crate::Engine) is created.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub positions_path: PathBuf,
    pub rules_path: PathBuf,
    /// Stored lower-cased.
    pub primary_thinker: String,
    /// Shortest keyword allowed to match other keywords by substring in
    /// `query`. Exact keyword hits are unaffected.
    pub fuzzy_min_keyword_len: usize,
    /// Candidate pool `critique` ranks before filtering.
    pub critique_pool: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            positions_path: PathBuf::from(DEFAULT_POSITIONS_PATH),
            rules_path: PathBuf::from(DEFAULT_RULES_PATH),
            primary_thinker: DEFAULT_PRIMARY_THINKER.to_string(),
            fuzzy_min_keyword_len: 4,
            critique_pool: 30,
        }
    }
}

impl EngineConfig {
    pub fn with_positions_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.positions_path = path.into();
        self
    }

    pub fn with_rules_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rules_path = path.into();
        self
    }

    pub fn with_primary_thinker(mut self, thinker: &str) -> Self {
        self.primary_thinker = thinker.to_lowercase();
        self
    }

    pub fn with_fuzzy_min_keyword_len(mut self, len: usize) -> Self {
        self.fuzzy_min_keyword_len = len;
        self
    }

    pub fn with_critique_pool(mut self, pool: usize) -> Self {
        self.critique_pool = pool;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_thinker_is_lowercased() {
        let cfg = EngineConfig::default().with_primary_thinker("Hume");
        assert_eq!(cfg.primary_thinker, "hume");
    }

    #[test]
    fn defaults_point_at_data_dir() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.positions_path, PathBuf::from("data/positions.json"));
        assert_eq!(cfg.rules_path, PathBuf::from("data/rules.json"));
        assert_eq!(cfg.primary_thinker, "kuczynski");
    }
}
