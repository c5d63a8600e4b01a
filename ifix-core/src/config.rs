use crate::orders::DEFAULT_EVENT_CHANNEL_CAPACITY;

/// Runtime configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | IFIX_ENVIRONMENT | development | Environment name |
/// | IFIX_LOG_LEVEL | info | Tracing level or filter directive |
/// | IFIX_LOG_JSON | false | Emit JSON log lines |
/// | IFIX_LOG_DIR | (unset) | Directory for daily rolling log files |
/// | IFIX_EVENT_CHANNEL_CAPACITY | 1024 | Broadcast capacity for external subscribers |
/// | IFIX_SEED_FILE | (unset) | JSON seed with technicians and orders |
///
/// # Example
///
/// ```ignore
/// IFIX_LOG_LEVEL=debug IFIX_SEED_FILE=./seed.json cargo run --bin ifix-demo
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub event_channel_capacity: usize,
    pub seed_file: Option<String>,
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            environment: lookup("IFIX_ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: lookup("IFIX_LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: lookup("IFIX_LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: lookup("IFIX_LOG_DIR").filter(|v| !v.trim().is_empty()),
            event_channel_capacity: lookup("IFIX_EVENT_CHANNEL_CAPACITY")
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(DEFAULT_EVENT_CHANNEL_CAPACITY),
            seed_file: lookup("IFIX_SEED_FILE").filter(|v| !v.trim().is_empty()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.is_development());
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert_eq!(config.log_dir, None);
        assert_eq!(config.event_channel_capacity, 1024);
        assert_eq!(config.seed_file, None);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("IFIX_ENVIRONMENT", "production"),
            ("IFIX_LOG_LEVEL", "debug"),
            ("IFIX_LOG_JSON", "true"),
            ("IFIX_LOG_DIR", "/tmp/ifix"),
            ("IFIX_EVENT_CHANNEL_CAPACITY", "64"),
            ("IFIX_SEED_FILE", "seed.json"),
        ]);
        assert!(config.is_production());
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
        assert_eq!(config.log_dir.as_deref(), Some("/tmp/ifix"));
        assert_eq!(config.event_channel_capacity, 64);
        assert_eq!(config.seed_file.as_deref(), Some("seed.json"));
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = config(&[
            ("IFIX_LOG_JSON", "yes"),
            ("IFIX_EVENT_CHANNEL_CAPACITY", "0"),
            ("IFIX_LOG_DIR", "  "),
        ]);
        assert!(!config.log_json);
        assert_eq!(config.event_channel_capacity, DEFAULT_EVENT_CHANNEL_CAPACITY);
        assert_eq!(config.log_dir, None);
    }
}
