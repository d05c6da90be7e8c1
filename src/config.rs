use std::path::PathBuf;
use std::time::Duration;

use crate::dataset::{DEFAULT_LOCATOR, DataSource};
use crate::playback::{DEFAULT_ADVANCE_MS, DEFAULT_TICK_MS};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub source: DataSource,
    pub tick_ms: u64,
    pub advance_ms: u64,
    pub export_dir: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let locator = lookup("MVP_DATA")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATOR.to_string());
        let tick_ms = lookup("MVP_TICK_MS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TICK_MS)
            .max(10);
        let advance_ms = lookup("MVP_ADVANCE_MS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_ADVANCE_MS)
            .max(tick_ms);
        let export_dir = lookup("MVP_EXPORT_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            source: DataSource::parse(&locator),
            tick_ms,
            advance_ms,
            export_dir,
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_match_playback_cadence() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.tick_ms, 50);
        assert_eq!(cfg.advance_ms, 3000);
        assert_eq!(cfg.source, DataSource::parse("mvp_1981-2020.csv"));
    }

    #[test]
    fn values_are_clamped() {
        let vars = HashMap::from([
            ("MVP_TICK_MS", "2"),
            ("MVP_ADVANCE_MS", "5"),
            ("MVP_DATA", "https://example.com/mvp.csv"),
        ]);
        let cfg = DashboardConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.tick_ms, 10);
        assert_eq!(cfg.advance_ms, 10);
        assert!(matches!(cfg.source, DataSource::Http(_)));
    }
}
