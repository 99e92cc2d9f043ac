//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Document store configuration.
    pub database: DatabaseConfig,
    /// Status migration configuration.
    #[serde(default)]
    pub status_migration: StatusMigrationConfig,
}

/// Document store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Document store connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Status migration configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusMigrationConfig {
    /// How invalid status transitions are handled when applying updates.
    #[serde(default)]
    pub enforcement: EnforcementMode,
    /// Collection the status audit trail is appended to.
    #[serde(default = "default_audit_collection")]
    pub audit_collection: String,
}

fn default_audit_collection() -> String {
    "status_audit_log".to_string()
}

impl Default for StatusMigrationConfig {
    fn default() -> Self {
        Self {
            enforcement: EnforcementMode::default(),
            audit_collection: default_audit_collection(),
        }
    }
}

/// Enforcement policy for invalid status transitions.
///
/// During the migration window most deployments run permissive so that
/// historically-irregular records do not block legitimate operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementMode {
    /// Invalid transitions are rejected before any write is applied.
    Strict,
    /// Invalid transitions are applied anyway and logged as warnings.
    #[default]
    Permissive,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PROCURA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_status_migration_defaults() {
        let cfg = StatusMigrationConfig::default();
        assert_eq!(cfg.enforcement, EnforcementMode::Permissive);
        assert_eq!(cfg.audit_collection, "status_audit_log");
    }

    #[rstest]
    #[case("\"strict\"", EnforcementMode::Strict)]
    #[case("\"permissive\"", EnforcementMode::Permissive)]
    fn test_enforcement_mode_deserializes(#[case] raw: &str, #[case] expected: EnforcementMode) {
        let mode: EnforcementMode = serde_json::from_str(raw).unwrap();
        assert_eq!(mode, expected);
    }

    #[test]
    fn test_database_config_defaults() {
        let cfg: DatabaseConfig =
            serde_json::from_str(r#"{"url": "mongodb://localhost:27017/procura"}"#).unwrap();
        assert_eq!(cfg.max_connections, 10);
        assert_eq!(cfg.min_connections, 1);
    }
}
