//! Service binding and database configuration types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Service bindings (host framework input)
// ============================================================================

/// One bound backing service, as presented by the host staging framework.
///
/// The binding list arrives as an ordered JSON array. Labels are opaque
/// strings such as `postgresql-9.1`; anything we do not recognize as a
/// database system is simply not ours to configure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBinding {
    pub label: String,
    /// Connection credentials. The broker contract says these are always
    /// present on a database binding; `None` on a recognized binding is a
    /// fatal upstream violation.
    #[serde(default)]
    pub credentials: Option<ServiceCredentials>,
}

impl ServiceBinding {
    /// Parse the bound-services document (a JSON array of bindings).
    pub fn parse_list(json: &str) -> Result<Vec<ServiceBinding>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl fmt::Display for ServiceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.credentials {
            Some(creds) => write!(
                f,
                "{} ({}@{}:{}/{})",
                self.label, creds.user, creds.hostname, creds.port, creds.name
            ),
            None => write!(f, "{} (no credentials)", self.label),
        }
    }
}

/// Connection credentials carried on a service binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCredentials {
    pub hostname: String,
    pub port: i32,
    pub user: String,
    pub password: String,
    /// Database name.
    pub name: String,
}

// ============================================================================
// Supported database systems
// ============================================================================

/// Closed set of database systems we know how to configure.
///
/// This is the CANONICAL enumeration - a binding either parses into one of
/// these variants or it is not a database binding at all. Each variant owns
/// its label matching and template selection, so there is no "recognized
/// but unhandled" state to defend against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseSystem {
    Postgresql,
}

impl DatabaseSystem {
    /// Match a service label against the known systems.
    ///
    /// Case-sensitive prefix match: brokers version their labels
    /// (`postgresql-9.1`), the prefix is the stable part.
    pub fn from_label(label: &str) -> Option<Self> {
        if label.starts_with("postgresql") {
            Some(DatabaseSystem::Postgresql)
        } else {
            None
        }
    }

    /// Configuration template activated for this system.
    pub fn template(&self) -> DatabaseTemplate {
        match self {
            DatabaseSystem::Postgresql => DatabaseTemplate::Postgresql,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseSystem::Postgresql => "postgresql",
        }
    }
}

impl fmt::Display for DatabaseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Template profile selected in the rendered server configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseTemplate {
    /// Embedded default storage, no external database bound.
    #[default]
    Default,
    Postgresql,
}

impl DatabaseTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseTemplate::Default => "default",
            DatabaseTemplate::Postgresql => "postgresql",
        }
    }
}

impl fmt::Display for DatabaseTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DatabaseTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(DatabaseTemplate::Default),
            "postgresql" => Ok(DatabaseTemplate::Postgresql),
            _ => Err(format!(
                "Invalid template: '{}'. Expected: default or postgresql",
                s
            )),
        }
    }
}

// ============================================================================
// Resolved configuration
// ============================================================================

/// Normalized database settings consumed by the configuration renderer.
///
/// Built once from the selected binding (or the embedded default) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub template: DatabaseTemplate,
    pub host: String,
    pub port: i32,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl DatabaseConfig {
    /// Fixed configuration used when no external database is bound: the
    /// server falls back to its embedded default storage.
    pub fn embedded() -> Self {
        DatabaseConfig {
            template: DatabaseTemplate::Default,
            host: "localhost".to_string(),
            port: -1,
            username: "sa".to_string(),
            password: String::new(),
            database: "sys".to_string(),
        }
    }
}

/// Complete renderer input: resolved database settings plus the memory
/// allocation granted to the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingConfig {
    /// JVM heap allocation in megabytes. Min and max are set equal.
    pub jvm_mem: u32,
    pub database: DatabaseConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_matches_versioned_postgresql() {
        assert_eq!(
            DatabaseSystem::from_label("postgresql"),
            Some(DatabaseSystem::Postgresql)
        );
        assert_eq!(
            DatabaseSystem::from_label("postgresql-9.1"),
            Some(DatabaseSystem::Postgresql)
        );
    }

    #[test]
    fn test_from_label_is_case_sensitive_prefix() {
        assert_eq!(DatabaseSystem::from_label("PostgreSQL"), None);
        assert_eq!(DatabaseSystem::from_label("mysql-5.5"), None);
        assert_eq!(DatabaseSystem::from_label("redis-2.2"), None);
        // Prefix must start the label, not merely appear in it
        assert_eq!(DatabaseSystem::from_label("not-postgresql"), None);
    }

    #[test]
    fn test_template_selection() {
        assert_eq!(
            DatabaseSystem::Postgresql.template(),
            DatabaseTemplate::Postgresql
        );
        assert_eq!(DatabaseTemplate::Postgresql.as_str(), "postgresql");
        assert_eq!(DatabaseTemplate::Default.as_str(), "default");
    }

    #[test]
    fn test_embedded_config_literal_values() {
        let config = DatabaseConfig::embedded();
        assert_eq!(config.template, DatabaseTemplate::Default);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, -1);
        assert_eq!(config.username, "sa");
        assert_eq!(config.password, "");
        assert_eq!(config.database, "sys");
    }

    #[test]
    fn test_binding_list_parses_and_ignores_unknown_keys() {
        let json = r#"[
            {"label": "postgresql-9.1", "name": "prod-db", "plan": "free",
             "credentials": {"hostname": "h", "port": 5432, "user": "u",
                             "password": "p", "name": "d", "node_id": "n1"}},
            {"label": "redis-2.2"}
        ]"#;
        let bindings = ServiceBinding::parse_list(json).unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].label, "postgresql-9.1");
        let creds = bindings[0].credentials.as_ref().unwrap();
        assert_eq!(creds.hostname, "h");
        assert_eq!(creds.port, 5432);
        assert!(bindings[1].credentials.is_none());
    }

    #[test]
    fn test_template_round_trips_through_str() {
        assert_eq!(
            "postgresql".parse::<DatabaseTemplate>().unwrap(),
            DatabaseTemplate::Postgresql
        );
        assert_eq!(
            "default".parse::<DatabaseTemplate>().unwrap(),
            DatabaseTemplate::Default
        );
        assert!("oracle".parse::<DatabaseTemplate>().is_err());
    }
}
