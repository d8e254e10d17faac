//! Database binding resolution.
//!
//! The host framework hands us every bound backing service. At most one of
//! them is a database we know how to wire up; the rest (caches, queues,
//! unrecognized labels) are not ours to configure and are skipped without
//! complaint.

use crate::error::{Result, StagingError};
use nuxstage_protocol::{DatabaseConfig, DatabaseSystem, ServiceBinding};
use tracing::{error, info};

/// Resolve the active database configuration from the bound services.
///
/// Zero recognized bindings selects the embedded default storage. With one
/// or more, the first recognized binding wins; duplicates are neither
/// merged nor rejected.
pub fn database_config(bindings: &[ServiceBinding]) -> Result<DatabaseConfig> {
    let mut known = bindings
        .iter()
        .filter(|binding| DatabaseSystem::from_label(&binding.label).is_some());

    match known.next() {
        None => {
            info!("No database binding; server will use embedded default storage");
            Ok(DatabaseConfig::embedded())
        }
        Some(binding) => {
            info!("Selected database binding: {}", binding.label);
            config_for(binding)
        }
    }
}

/// Build the configuration for one specific binding.
///
/// Unlike [`database_config`], which only ever sees pre-filtered bindings,
/// this is also the direct entry point for the `resolve` command, so an
/// unrecognized label is a real error here.
pub fn config_for(binding: &ServiceBinding) -> Result<DatabaseConfig> {
    let system = DatabaseSystem::from_label(&binding.label)
        .ok_or_else(|| StagingError::UnknownBinding(binding.clone()))?;

    let creds = match &binding.credentials {
        Some(creds) => creds,
        None => {
            error!("Database binding failed to include credentials: {}", binding);
            return Err(StagingError::MissingCredentials(binding.clone()));
        }
    };

    Ok(DatabaseConfig {
        template: system.template(),
        host: creds.hostname.clone(),
        port: creds.port,
        username: creds.user.clone(),
        password: creds.password.clone(),
        database: creds.name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nuxstage_protocol::{DatabaseTemplate, ServiceCredentials};

    fn postgres_binding(label: &str) -> ServiceBinding {
        ServiceBinding {
            label: label.to_string(),
            credentials: Some(ServiceCredentials {
                hostname: "h".to_string(),
                port: 5432,
                user: "u".to_string(),
                password: "p".to_string(),
                name: "d".to_string(),
            }),
        }
    }

    #[test]
    fn test_no_bindings_yields_embedded_default() {
        let config = database_config(&[]).unwrap();
        assert_eq!(config, DatabaseConfig::embedded());
    }

    #[test]
    fn test_unrecognized_labels_are_ignored() {
        let bindings = vec![
            ServiceBinding {
                label: "redis-2.2".to_string(),
                credentials: None,
            },
            ServiceBinding {
                label: "mongodb-1.8".to_string(),
                credentials: None,
            },
        ];
        let config = database_config(&bindings).unwrap();
        assert_eq!(config, DatabaseConfig::embedded());
    }

    #[test]
    fn test_postgresql_binding_maps_credentials() {
        let config = database_config(&[postgres_binding("postgresql-9.1")]).unwrap();
        assert_eq!(config.template, DatabaseTemplate::Postgresql);
        assert_eq!(config.host, "h");
        assert_eq!(config.port, 5432);
        assert_eq!(config.username, "u");
        assert_eq!(config.password, "p");
        assert_eq!(config.database, "d");
    }

    #[test]
    fn test_first_recognized_binding_wins() {
        let mut second = postgres_binding("postgresql-8.4");
        if let Some(creds) = second.credentials.as_mut() {
            creds.hostname = "other".to_string();
        }
        let bindings = vec![
            ServiceBinding {
                label: "redis-2.2".to_string(),
                credentials: None,
            },
            postgres_binding("postgresql-9.1"),
            second,
        ];
        let config = database_config(&bindings).unwrap();
        assert_eq!(config.host, "h");
    }

    #[test]
    fn test_missing_credentials_is_fatal() {
        let binding = ServiceBinding {
            label: "postgresql".to_string(),
            credentials: None,
        };
        let err = database_config(&[binding]).unwrap_err();
        assert!(matches!(err, StagingError::MissingCredentials(_)));
        assert!(err.to_string().contains("postgresql"));
    }

    #[test]
    fn test_config_for_rejects_unknown_label() {
        let binding = ServiceBinding {
            label: "mysql-5.5".to_string(),
            credentials: None,
        };
        let err = config_for(&binding).unwrap_err();
        assert!(matches!(err, StagingError::UnknownBinding(_)));
        assert!(err.to_string().contains("mysql-5.5"));
    }
}
