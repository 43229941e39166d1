//! Version and security-level state machine

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use super::params::{
    AuthKey, AuthProtocol, CommunityVersion, PrivKey, PrivProtocol, SecurityConfig,
    SecurityLevel, SessionConfig, SessionParams, SnmpVersion, UsmSecurity,
};
use crate::tracing::span_names;

/// Errors that reject a session configuration before connecting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NegotiationError {
    /// Version selector is not `1`, `2c` or `3`
    #[error("Invalid SNMP version '{0}' (expected 1, 2c or 3)")]
    InvalidVersion(String),

    /// Security level name is not recognized
    #[error("Invalid SNMPv3 security level '{0}' (expected noAuthNoPriv, authNoPriv or authPriv)")]
    InvalidSecurityLevel(String),

    /// Authentication or privacy protocol name is not recognized
    #[error("Invalid SNMPv3 {kind} protocol '{value}'")]
    InvalidProtocol {
        /// Which sub-protocol was rejected
        kind: &'static str,
        /// The rejected name
        value: String,
    },

    /// A field required by the chosen version or level is empty
    #[error("{field} is required")]
    MissingRequiredField {
        /// Name of the missing option
        field: &'static str,
    },
}

/// Result type for negotiation
pub type NegotiationResult<T> = Result<T, NegotiationError>;

/// Builds a [`SessionConfig`] from raw [`SessionParams`]
///
/// Stateless; all state flows through the arguments and the returned value.
pub struct SessionNegotiator;

impl SessionNegotiator {
    /// Validates `params` and produces a connection configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`NegotiationError`] encountered. Checks run in
    /// order: host, version, then (for v3) user name, security level, and
    /// the layered key validators.
    pub fn negotiate(params: &SessionParams) -> NegotiationResult<SessionConfig> {
        let _span = tracing::debug_span!(span_names::NEGOTIATE).entered();

        let host = params.host.trim();
        if host.is_empty() {
            return Err(NegotiationError::MissingRequiredField { field: "snmp-host" });
        }

        let version: SnmpVersion = params.version.parse()?;
        let config = match version {
            SnmpVersion::V1 => Self::community(host, CommunityVersion::V1, params),
            SnmpVersion::V2c => Self::community(host, CommunityVersion::V2c, params),
            SnmpVersion::V3 => SessionConfig::Usm {
                host: host.to_string(),
                security: Self::usm(params)?,
            },
        };

        if let SessionConfig::Usm { security, .. } = &config {
            tracing::debug!(
                version = %version,
                user = %security.user_name,
                level = %security.security_level(),
                "Negotiated SNMPv3 session"
            );
        } else {
            tracing::debug!(version = %version, "Negotiated community session");
        }

        Ok(config)
    }

    fn community(host: &str, version: CommunityVersion, params: &SessionParams) -> SessionConfig {
        SessionConfig::Community {
            host: host.to_string(),
            version,
            community: params.community.clone(),
        }
    }

    fn usm(params: &SessionParams) -> NegotiationResult<SecurityConfig> {
        Self::validate_no_auth_no_priv(params)?;

        let level: SecurityLevel = params.security_level.parse()?;
        let security = match level {
            SecurityLevel::NoAuthNoPriv => UsmSecurity::NoAuthNoPriv,
            SecurityLevel::AuthNoPriv => UsmSecurity::AuthNoPriv(Self::validate_auth_no_priv(params)?),
            SecurityLevel::AuthPriv => {
                let (auth, privacy) = Self::validate_auth_priv(params)?;
                UsmSecurity::AuthPriv(auth, privacy)
            }
        };

        Ok(SecurityConfig {
            context_name: params.context_name.clone(),
            user_name: params.user_name.clone(),
            security,
        })
    }

    fn validate_no_auth_no_priv(params: &SessionParams) -> NegotiationResult<()> {
        if params.user_name.trim().is_empty() {
            return Err(NegotiationError::MissingRequiredField {
                field: "snmp-sec-name",
            });
        }
        Ok(())
    }

    fn validate_auth_no_priv(params: &SessionParams) -> NegotiationResult<AuthKey> {
        Self::validate_no_auth_no_priv(params)?;
        Ok(AuthKey {
            passphrase: required_secret(&params.auth_passphrase, "snmp-auth-password")?,
            protocol: params.auth_protocol.parse::<AuthProtocol>()?,
        })
    }

    fn validate_auth_priv(params: &SessionParams) -> NegotiationResult<(AuthKey, PrivKey)> {
        let auth = Self::validate_auth_no_priv(params)?;
        let privacy = PrivKey {
            passphrase: required_secret(&params.priv_passphrase, "snmp-priv-password")?,
            protocol: params.priv_protocol.parse::<PrivProtocol>()?,
        };
        Ok((auth, privacy))
    }
}

fn required_secret(secret: &SecretString, field: &'static str) -> NegotiationResult<SecretString> {
    if secret.expose_secret().is_empty() {
        return Err(NegotiationError::MissingRequiredField { field });
    }
    Ok(secret.clone())
}
