//! Property tests for SNMP session negotiation

use proptest::prelude::*;
use switchprobe_core::session::{
    NegotiationError, SecurityLevel, SessionConfig, SessionNegotiator, SessionParams,
};

/// Strategy for non-blank identifiers
fn word() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,16}"
}

/// Strategy for a v3 parameter set where each credential may be blank
fn v3_params() -> impl Strategy<Value = (SessionParams, String)> {
    (
        prop_oneof![Just("noAuthNoPriv"), Just("authNoPriv"), Just("authPriv")],
        proptest::option::of(word()),
        proptest::option::of(word()),
        proptest::option::of(word()),
    )
        .prop_map(|(level, user, auth, privacy)| {
            let mut params = SessionParams::new("sw1")
                .with_version("3")
                .with_security_level(level)
                .with_user_name(user.unwrap_or_default());
            if let Some(auth) = auth {
                params = params.with_auth("SHA", &auth);
            }
            if let Some(privacy) = privacy {
                params = params.with_privacy("AES", &privacy);
            }
            (params, level.to_string())
        })
}

fn missing_field(result: Result<SessionConfig, NegotiationError>) -> Option<&'static str> {
    match result {
        Err(NegotiationError::MissingRequiredField { field }) => Some(field),
        _ => None,
    }
}

proptest! {
    /// Property: v1 and v2c sessions carry the community string verbatim
    #[test]
    fn community_copied_verbatim(
        version in prop_oneof![Just("1"), Just("2c")],
        community in ".{0,32}",
    ) {
        let params = SessionParams::new("sw1")
            .with_version(version)
            .with_community(community.clone());
        match SessionNegotiator::negotiate(&params).unwrap() {
            SessionConfig::Community { community: negotiated, .. } => {
                prop_assert_eq!(negotiated, community);
            }
            SessionConfig::Usm { .. } => prop_assert!(false, "expected a community session"),
        }
    }

    /// Property: Any v3 session without a user name fails on the user name first
    #[test]
    fn user_name_checked_first((params, _) in v3_params()) {
        prop_assume!(params.user_name.is_empty());
        prop_assert_eq!(
            missing_field(SessionNegotiator::negotiate(&params)),
            Some("snmp-sec-name")
        );
    }

    /// Property: A negotiated v3 session has exactly the requested level,
    /// and it succeeds iff every field that level requires is present
    #[test]
    fn level_requirements_are_layered((params, level) in v3_params()) {
        let level: SecurityLevel = level.parse().unwrap();
        let has_user = !params.user_name.is_empty();
        let has_auth = params.auth_protocol == "SHA";
        let has_priv = params.priv_protocol == "AES";

        let complete = match level {
            SecurityLevel::NoAuthNoPriv => has_user,
            SecurityLevel::AuthNoPriv => has_user && has_auth,
            SecurityLevel::AuthPriv => has_user && has_auth && has_priv,
        };

        let result = SessionNegotiator::negotiate(&params);
        prop_assert_eq!(result.is_ok(), complete);
        if let Ok(SessionConfig::Usm { security, .. }) = result {
            prop_assert_eq!(security.security_level(), level);
            prop_assert_eq!(security.auth().is_some(), level >= SecurityLevel::AuthNoPriv);
            prop_assert_eq!(security.privacy().is_some(), level == SecurityLevel::AuthPriv);
        }
    }

    /// Property: Unknown version selectors are always rejected
    #[test]
    fn unknown_versions_rejected(version in "[4-9][a-z]?") {
        let params = SessionParams::new("sw1").with_version(version);
        prop_assert!(matches!(
            SessionNegotiator::negotiate(&params),
            Err(NegotiationError::InvalidVersion(_))
        ));
    }
}
