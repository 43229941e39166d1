//! SNMP session negotiation
//!
//! Turns the raw connection strings supplied by the operator into a validated
//! [`SessionConfig`]. Validation completes before any socket is opened, so a
//! rejected configuration never leaves a half-open session behind.
//!
//! SNMPv3 security levels are strictly layered: `authPriv` requires everything
//! `authNoPriv` requires, which in turn requires everything `noAuthNoPriv`
//! requires. Each level's validator calls the one below it first and stops at
//! the first failure.

mod negotiator;
mod params;

pub use negotiator::{NegotiationError, NegotiationResult, SessionNegotiator};
pub use params::{
    AuthKey, AuthProtocol, CommunityVersion, PrivKey, PrivProtocol, SecurityConfig,
    SecurityLevel, SessionConfig, SessionParams, SnmpVersion, UsmSecurity,
};

/// Version used when none is given
pub const DEFAULT_VERSION: &str = "2c";

/// Community used when none is given
pub const DEFAULT_COMMUNITY: &str = "public";

/// SNMPv3 security level used when none is given
pub const DEFAULT_SECURITY_LEVEL: &str = "noAuthNoPriv";

/// SNMPv3 authentication protocol used when none is given
pub const DEFAULT_AUTH_PROTOCOL: &str = "MD5";

/// SNMPv3 privacy protocol used when none is given
pub const DEFAULT_PRIV_PROTOCOL: &str = "DES";
