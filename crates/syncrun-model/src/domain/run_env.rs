use serde::{Deserialize, Serialize};

use crate::KeyValue;

/// List of environment variables passed to the external program.
///
/// Internally stored as a list of key–value pairs and serialized as a transparent array wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunEnv(pub Vec<KeyValue>);

impl RunEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Create an environment containing a single key–value pair.
    pub fn single<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(vec![KeyValue::new(key, value)])
    }

    /// Check if the environment is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all key–value pairs.
    pub fn iter(&self) -> impl Iterator<Item = &KeyValue> {
        self.0.iter()
    }

    /// Get the value for a key, returning the last matching entry.
    ///
    /// This allows simple override semantics when merging environments.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|kv| kv.key() == key)
            .map(|kv| kv.value())
    }

    /// Append a key–value pair to the environment.
    ///
    /// Later entries override earlier ones when queried via [`RunEnv::get`].
    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.push(KeyValue::new(key, value));
    }

    /// Merge two environments, where entries from `other` override earlier ones.
    pub fn merged(&self, other: &RunEnv) -> RunEnv {
        let mut out = self.0.clone();
        out.extend(other.0.clone());
        RunEnv(out)
    }
}

impl Default for RunEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_and_get() {
        let env = RunEnv::single("RUN_URL", "https://example.test/runs/1");
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("RUN_URL"), Some("https://example.test/runs/1"));
        assert_eq!(env.get("MISSING"), None);
    }

    #[test]
    fn last_entry_wins() {
        let mut env = RunEnv::new();
        env.push("TRIGGER_MODE", "oneormore");
        env.push("TRIGGER_MODE", "continuing");
        assert_eq!(env.get("TRIGGER_MODE"), Some("continuing"));
    }

    #[test]
    fn merged_overrides_earlier() {
        let base = RunEnv::single("SLACK_TOKEN", "xoxb-base");
        let over = RunEnv::single("SLACK_TOKEN", "xoxb-override");
        let merged = base.merged(&over);
        assert_eq!(merged.get("SLACK_TOKEN"), Some("xoxb-override"));
        assert_eq!(merged.len(), 2);
    }
}
