//! Shared utility functions used across command modules.

use std::path::Path;

use secrecy::SecretString;
use switchprobe_core::ProbeError;
use switchprobe_core::session::{
    DEFAULT_AUTH_PROTOCOL, DEFAULT_COMMUNITY, DEFAULT_PRIV_PROTOCOL, DEFAULT_SECURITY_LEVEL,
    DEFAULT_VERSION, SessionParams,
};
use switchprobe_core::settings::{ConnectionSettings, ProbeSettings};
use switchprobe_core::source::{Connector, NetworkConnector, ReplayConnector, TransportSettings};

use crate::cli::ProbeOptions;
use crate::error::CliError;

/// Loads the settings file if one was given
pub fn load_settings(path: Option<&Path>) -> Result<ProbeSettings, CliError> {
    match path {
        Some(path) => ProbeSettings::load(path).map_err(|e| ProbeError::from(e).into()),
        None => Ok(ProbeSettings::default()),
    }
}

fn pick(flag: Option<&String>, file: Option<&String>, default: &str) -> String {
    flag.or(file).map_or_else(|| default.to_string(), Clone::clone)
}

fn pick_secret(flag: Option<&String>, file: Option<&SecretString>) -> SecretString {
    match flag {
        Some(value) => SecretString::from(value.as_str()),
        None => file.cloned().unwrap_or_default(),
    }
}

/// Merges flags (already falling back to the environment), the settings file,
/// and the built-in defaults into raw session parameters.
pub fn session_params(options: &ProbeOptions, file: &ConnectionSettings) -> SessionParams {
    SessionParams {
        host: pick(options.host.as_ref(), file.host.as_ref(), ""),
        version: pick(
            options.snmp_version.as_ref(),
            file.version.as_ref(),
            DEFAULT_VERSION,
        ),
        community: pick(
            options.community.as_ref(),
            file.community.as_ref(),
            DEFAULT_COMMUNITY,
        ),
        context_name: pick(options.context.as_ref(), file.context.as_ref(), ""),
        security_level: pick(
            options.security_level.as_ref(),
            file.security_level.as_ref(),
            DEFAULT_SECURITY_LEVEL,
        ),
        auth_protocol: pick(
            options.auth_protocol.as_ref(),
            file.auth_protocol.as_ref(),
            DEFAULT_AUTH_PROTOCOL,
        ),
        priv_protocol: pick(
            options.priv_protocol.as_ref(),
            file.priv_protocol.as_ref(),
            DEFAULT_PRIV_PROTOCOL,
        ),
        user_name: pick(options.sec_name.as_ref(), file.sec_name.as_ref(), ""),
        auth_passphrase: pick_secret(options.auth_password.as_ref(), file.auth_password.as_ref()),
        priv_passphrase: pick_secret(options.priv_password.as_ref(), file.priv_password.as_ref()),
    }
}

/// Picks the replay connector when a snapshot was given, the network
/// connector otherwise
pub fn connector(replay: Option<&Path>, transport: TransportSettings) -> Box<dyn Connector> {
    match replay {
        Some(path) => {
            tracing::info!(path = %path.display(), "Replaying recorded snapshot");
            Box::new(ReplayConnector::from_file(path))
        }
        None => Box::new(NetworkConnector::new(transport)),
    }
}
