use std::collections::HashMap;

use anyhow::{Context, Result};
use regex::Regex;

/// Cluster name filter built from user supplied regex patterns.
///
/// An empty filter accepts every cluster name. A non-empty filter accepts a
/// name if at least one pattern finds a match anywhere in it.
#[derive(Debug, Default)]
pub struct ClusterFilter {
    patterns: HashMap<String, Regex>,
    /// Reserved: chart labels sourced from config maps are not classified yet.
    pub include_config_maps: bool,
}

impl ClusterFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, pattern: &str) -> Result<()> {
        let re = Regex::new(pattern)
            .with_context(|| format!("invalid cluster pattern {pattern:?}"))?;
        self.patterns.insert(pattern.to_string(), re);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True if there are no patterns, or if at least one pattern matches name.
    pub fn matches(&self, name: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        self.patterns.values().any(|re| re.is_match(name))
    }
}
