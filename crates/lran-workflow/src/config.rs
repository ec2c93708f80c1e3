//! # Network Configuration
//!
//! Loaded once at startup from YAML:
//!
//! ```yaml
//! roles:
//!   Citizen:         { org: CitizenMSP,        issuer: ca.citizen.lran.com }
//!   Lawyer:          { org: LawyerMSP,         issuer: ca.lawyer.lran.com }
//!   RegistryOfficer: { org: RegistryOfficeMSP, issuer: ca.registryoffice.lran.com }
//!   Authority:       { org: BLROMSP,           issuer: ca.blro.lran.com }
//! strict_stage_order: false
//! ```
//!
//! Both keys are optional. An omitted `roles` section means the production
//! bindings; a `roles` section that names only some roles is rejected.

use std::path::{Path, PathBuf};

use lran_registry::RoleTable;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to load a [`NetworkConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file does not exist.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path as given.
        path: PathBuf,
    },

    /// The file could not be read.
    #[error("failed to read config at {path}: {source}")]
    Io {
        /// Path as given.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not a valid configuration.
    #[error("failed to parse config at {path}: {source}")]
    YamlParse {
        /// Path as given.
        path: PathBuf,
        /// Underlying error.
        source: serde_yaml::Error,
    },
}

/// Deployment-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    /// Role → credential bindings.
    #[serde(default)]
    pub roles: RoleTable,
    /// Enforce Lawyer → RegistryOfficer → Authority → complete ordering.
    #[serde(default)]
    pub strict_stage_order: bool,
}

impl NetworkConfig {
    /// Load from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::YamlParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::info!(
            path = %path.display(),
            strict_stage_order = config.strict_stage_order,
            "network config loaded"
        );
        Ok(config)
    }

    /// Load from `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lran_core::Role;
    use std::io::Write;

    fn write(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_mapping_means_defaults() {
        let file = write("{}\n");
        assert_eq!(NetworkConfig::load(file.path()).unwrap(), NetworkConfig::default());
    }

    #[test]
    fn full_file_overrides_roles_and_strictness() {
        let file = write(
            "roles:\n\
             \x20 Citizen: {org: PublicMSP, issuer: ca.public}\n\
             \x20 Lawyer: {org: LawyerMSP, issuer: ca.lawyer.lran.com}\n\
             \x20 RegistryOfficer: {org: RegistryOfficeMSP, issuer: ca.registryoffice.lran.com}\n\
             \x20 Authority: {org: BLROMSP, issuer: ca.blro.lran.com}\n\
             strict_stage_order: true\n",
        );
        let config = NetworkConfig::load(file.path()).unwrap();
        assert!(config.strict_stage_order);
        assert_eq!(config.roles.credential(Role::Citizen).org, "PublicMSP");
    }

    #[test]
    fn partial_role_table_is_rejected() {
        let file = write("roles:\n  Citizen: {org: C, issuer: c}\n");
        assert!(matches!(
            NetworkConfig::load(file.path()),
            Err(ConfigError::YamlParse { .. })
        ));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let file = write("strict: true\n");
        assert!(NetworkConfig::load(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = NetworkConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
        assert_eq!(NetworkConfig::load_or_default(None).unwrap(), NetworkConfig::default());
    }
}
