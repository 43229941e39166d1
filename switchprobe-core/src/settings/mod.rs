//! Probe settings file
//!
//! An optional TOML file supplies connection values the operator does not want
//! to repeat on every invocation, plus transport tuning. Values here sit below
//! command-line flags and environment variables and above the built-in
//! defaults.
//!
//! ```toml
//! [connection]
//! host = "core-sw-01"
//! version = "3"
//! security_level = "authPriv"
//! sec_name = "monitor"
//! auth_password = "..."
//! priv_password = "..."
//!
//! [transport]
//! port = 161
//! timeout_secs = 5
//! retries = 1
//! ```

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

use crate::source::TransportSettings;

/// Errors raised while loading the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file could not be read
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        /// Path of the settings file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid settings TOML
    #[error("Invalid settings file {path}: {reason}")]
    Parse {
        /// Path of the settings file
        path: PathBuf,
        /// Parser message
        reason: String,
    },
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Connection values from the `[connection]` table.
///
/// Every field is optional; an absent field falls through to the built-in
/// default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionSettings {
    /// Device address
    pub host: Option<String>,
    /// SNMP version (`1`, `2c`, `3`)
    pub version: Option<String>,
    /// Community string for v1/v2c
    pub community: Option<String>,
    /// SNMPv3 context name
    pub context: Option<String>,
    /// SNMPv3 security level
    pub security_level: Option<String>,
    /// SNMPv3 authentication protocol
    pub auth_protocol: Option<String>,
    /// SNMPv3 privacy protocol
    pub priv_protocol: Option<String>,
    /// SNMPv3 user name
    pub sec_name: Option<String>,
    /// SNMPv3 authentication passphrase
    pub auth_password: Option<SecretString>,
    /// SNMPv3 privacy passphrase
    pub priv_password: Option<SecretString>,
}

/// Contents of a settings file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeSettings {
    /// `[connection]` table
    pub connection: ConnectionSettings,
    /// `[transport]` table
    pub transport: TransportSettings,
}

impl ProbeSettings {
    /// Parses settings from TOML text
    ///
    /// # Errors
    ///
    /// Returns the parser message if the text is not valid settings TOML.
    pub fn from_toml(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.message().to_string())
    }

    /// Loads settings from a file
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Read`] if the file cannot be read, or
    /// [`SettingsError::Parse`] if its contents are invalid.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&text).map_err(|reason| SettingsError::Parse {
            path: path.to_path_buf(),
            reason,
        })?;
        tracing::debug!(path = %path.display(), "Loaded settings file");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = ProbeSettings::from_toml("").unwrap();
        assert!(settings.connection.host.is_none());
        assert_eq!(settings.transport, TransportSettings::default());
    }

    #[test]
    fn test_partial_tables() {
        let settings = ProbeSettings::from_toml(
            r#"
            [connection]
            host = "core-sw-01"
            version = "3"
            auth_password = "s3cret"

            [transport]
            timeout_secs = 2
            "#,
        )
        .unwrap();

        assert_eq!(settings.connection.host.as_deref(), Some("core-sw-01"));
        assert_eq!(settings.connection.version.as_deref(), Some("3"));
        assert_eq!(
            settings
                .connection
                .auth_password
                .as_ref()
                .map(ExposeSecret::expose_secret),
            Some("s3cret")
        );
        assert_eq!(settings.transport.timeout_secs, 2);
        assert_eq!(settings.transport.port, 161);
        assert_eq!(settings.transport.retries, 1);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ProbeSettings::from_toml("[connection]\nhostname = \"x\"\n").is_err());
    }

    #[test]
    fn test_passwords_redacted_in_debug() {
        let settings =
            ProbeSettings::from_toml("[connection]\npriv_password = \"hunter2\"\n").unwrap();
        assert!(!format!("{settings:?}").contains("hunter2"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[connection]\ncommunity = \"private\"").unwrap();

        let settings = ProbeSettings::load(file.path()).unwrap();
        assert_eq!(settings.connection.community.as_deref(), Some("private"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ProbeSettings::load(Path::new("/nonexistent/switchprobe.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[transport]\nport = \"high\"").unwrap();

        let err = ProbeSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().starts_with("Invalid settings file"));
    }
}
