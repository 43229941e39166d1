//! Raw and negotiated session parameters

use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;

use super::{
    DEFAULT_AUTH_PROTOCOL, DEFAULT_COMMUNITY, DEFAULT_PRIV_PROTOCOL, DEFAULT_SECURITY_LEVEL,
    DEFAULT_VERSION, NegotiationError,
};

/// Unvalidated connection parameters as supplied by the operator
///
/// Every field is kept as text so that the negotiator decides what is valid.
/// Passphrases are wrapped in [`SecretString`] and never appear in `Debug`
/// output.
#[derive(Debug, Clone)]
pub struct SessionParams {
    /// Target host name or address
    pub host: String,
    /// Version selector: `1`, `2c` or `3`
    pub version: String,
    /// Community string (v1/v2c)
    pub community: String,
    /// SNMPv3 context name
    pub context_name: String,
    /// SNMPv3 security level name
    pub security_level: String,
    /// SNMPv3 authentication protocol name
    pub auth_protocol: String,
    /// SNMPv3 privacy protocol name
    pub priv_protocol: String,
    /// SNMPv3 user (security) name
    pub user_name: String,
    /// SNMPv3 authentication passphrase
    pub auth_passphrase: SecretString,
    /// SNMPv3 privacy passphrase
    pub priv_passphrase: SecretString,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            host: String::new(),
            version: DEFAULT_VERSION.to_string(),
            community: DEFAULT_COMMUNITY.to_string(),
            context_name: String::new(),
            security_level: DEFAULT_SECURITY_LEVEL.to_string(),
            auth_protocol: DEFAULT_AUTH_PROTOCOL.to_string(),
            priv_protocol: DEFAULT_PRIV_PROTOCOL.to_string(),
            user_name: String::new(),
            auth_passphrase: SecretString::default(),
            priv_passphrase: SecretString::default(),
        }
    }
}

impl SessionParams {
    /// Creates parameters for `host` with the built-in defaults
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Sets the version selector
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the community string
    #[must_use]
    pub fn with_community(mut self, community: impl Into<String>) -> Self {
        self.community = community.into();
        self
    }

    /// Sets the SNMPv3 context name
    #[must_use]
    pub fn with_context_name(mut self, context: impl Into<String>) -> Self {
        self.context_name = context.into();
        self
    }

    /// Sets the SNMPv3 security level name
    #[must_use]
    pub fn with_security_level(mut self, level: impl Into<String>) -> Self {
        self.security_level = level.into();
        self
    }

    /// Sets the SNMPv3 user name
    #[must_use]
    pub fn with_user_name(mut self, user: impl Into<String>) -> Self {
        self.user_name = user.into();
        self
    }

    /// Sets the authentication protocol name and passphrase
    #[must_use]
    pub fn with_auth(mut self, protocol: impl Into<String>, passphrase: &str) -> Self {
        self.auth_protocol = protocol.into();
        self.auth_passphrase = SecretString::from(passphrase);
        self
    }

    /// Sets the privacy protocol name and passphrase
    #[must_use]
    pub fn with_privacy(mut self, protocol: impl Into<String>, passphrase: &str) -> Self {
        self.priv_protocol = protocol.into();
        self.priv_passphrase = SecretString::from(passphrase);
        self
    }
}

/// Protocol version selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnmpVersion {
    /// SNMPv1
    V1,
    /// SNMPv2c
    V2c,
    /// SNMPv3 with the user-based security model
    V3,
}

impl FromStr for SnmpVersion {
    type Err = NegotiationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Self::V1),
            "2c" => Ok(Self::V2c),
            "3" => Ok(Self::V3),
            other => Err(NegotiationError::InvalidVersion(other.to_string())),
        }
    }
}

impl fmt::Display for SnmpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => write!(f, "1"),
            Self::V2c => write!(f, "2c"),
            Self::V3 => write!(f, "3"),
        }
    }
}

/// The community-based versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunityVersion {
    /// SNMPv1
    V1,
    /// SNMPv2c
    V2c,
}

/// SNMPv3 security level
///
/// Ordered by increasing protection, so `AuthPriv > AuthNoPriv > NoAuthNoPriv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SecurityLevel {
    /// No authentication, no encryption
    NoAuthNoPriv,
    /// Authenticated, not encrypted
    AuthNoPriv,
    /// Authenticated and encrypted
    AuthPriv,
}

impl FromStr for SecurityLevel {
    type Err = NegotiationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "noauthnopriv" => Ok(Self::NoAuthNoPriv),
            "authnopriv" => Ok(Self::AuthNoPriv),
            "authpriv" => Ok(Self::AuthPriv),
            _ => Err(NegotiationError::InvalidSecurityLevel(s.to_string())),
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAuthNoPriv => write!(f, "noAuthNoPriv"),
            Self::AuthNoPriv => write!(f, "authNoPriv"),
            Self::AuthPriv => write!(f, "authPriv"),
        }
    }
}

/// SNMPv3 authentication protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthProtocol {
    /// HMAC-MD5-96
    Md5,
    /// HMAC-SHA-96
    Sha,
}

impl FromStr for AuthProtocol {
    type Err = NegotiationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MD5" => Ok(Self::Md5),
            "SHA" => Ok(Self::Sha),
            _ => Err(NegotiationError::InvalidProtocol {
                kind: "authentication",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for AuthProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Md5 => write!(f, "MD5"),
            Self::Sha => write!(f, "SHA"),
        }
    }
}

/// SNMPv3 privacy protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivProtocol {
    /// CBC-DES
    Des,
    /// CFB-AES-128
    Aes,
}

impl FromStr for PrivProtocol {
    type Err = NegotiationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DES" => Ok(Self::Des),
            "AES" => Ok(Self::Aes),
            _ => Err(NegotiationError::InvalidProtocol {
                kind: "privacy",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PrivProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Des => write!(f, "DES"),
            Self::Aes => write!(f, "AES"),
        }
    }
}

/// Validated authentication settings
#[derive(Debug, Clone)]
pub struct AuthKey {
    /// Authentication protocol
    pub protocol: AuthProtocol,
    /// Non-empty passphrase
    pub passphrase: SecretString,
}

/// Validated privacy settings
#[derive(Debug, Clone)]
pub struct PrivKey {
    /// Privacy protocol
    pub protocol: PrivProtocol,
    /// Non-empty passphrase
    pub passphrase: SecretString,
}

/// USM security material, shaped by the security level
///
/// Each variant carries exactly the keys its level requires.
#[derive(Debug, Clone)]
pub enum UsmSecurity {
    /// No keys
    NoAuthNoPriv,
    /// Authentication key only
    AuthNoPriv(AuthKey),
    /// Authentication and privacy keys
    AuthPriv(AuthKey, PrivKey),
}

/// Negotiated SNMPv3 security configuration
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Context name (may be empty)
    pub context_name: String,
    /// Non-empty user name
    pub user_name: String,
    /// Keys for the chosen level
    pub security: UsmSecurity,
}

impl SecurityConfig {
    /// The security level implied by the key material
    #[must_use]
    pub const fn security_level(&self) -> SecurityLevel {
        match self.security {
            UsmSecurity::NoAuthNoPriv => SecurityLevel::NoAuthNoPriv,
            UsmSecurity::AuthNoPriv(_) => SecurityLevel::AuthNoPriv,
            UsmSecurity::AuthPriv(..) => SecurityLevel::AuthPriv,
        }
    }

    /// Authentication settings, if the level has them
    #[must_use]
    pub const fn auth(&self) -> Option<&AuthKey> {
        match &self.security {
            UsmSecurity::NoAuthNoPriv => None,
            UsmSecurity::AuthNoPriv(auth) | UsmSecurity::AuthPriv(auth, _) => Some(auth),
        }
    }

    /// Privacy settings, if the level has them
    #[must_use]
    pub const fn privacy(&self) -> Option<&PrivKey> {
        match &self.security {
            UsmSecurity::AuthPriv(_, privacy) => Some(privacy),
            _ => None,
        }
    }
}

/// A validated, ready-to-connect session configuration
#[derive(Debug, Clone)]
pub enum SessionConfig {
    /// SNMPv1 or SNMPv2c with a community string
    Community {
        /// Target host
        host: String,
        /// Protocol version
        version: CommunityVersion,
        /// Community string, copied verbatim
        community: String,
    },
    /// SNMPv3 with the user-based security model
    Usm {
        /// Target host
        host: String,
        /// Security configuration
        security: SecurityConfig,
    },
}

impl SessionConfig {
    /// Target host
    #[must_use]
    pub fn host(&self) -> &str {
        match self {
            Self::Community { host, .. } | Self::Usm { host, .. } => host,
        }
    }

    /// Negotiated protocol version
    #[must_use]
    pub const fn version(&self) -> SnmpVersion {
        match self {
            Self::Community {
                version: CommunityVersion::V1,
                ..
            } => SnmpVersion::V1,
            Self::Community {
                version: CommunityVersion::V2c,
                ..
            } => SnmpVersion::V2c,
            Self::Usm { .. } => SnmpVersion::V3,
        }
    }
}
