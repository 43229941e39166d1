//! Live SNMP transport
//!
//! Wraps an `async_snmp` UDP client in a current-thread tokio runtime so the
//! checks can stay synchronous. One runtime and one client live for the
//! duration of a [`Session`](super::Session).

use std::time::Duration;

use async_snmp::{Auth, Client, UdpClient, Value};
use secrecy::ExposeSecret;
use tokio::runtime::{Builder, Runtime};

use super::{
    CollectionError, CollectionResult, Connector, MetricSource, Oid, RawValue, TransportSettings,
    WalkVisitor,
};
use crate::session::{AuthProtocol, CommunityVersion, PrivProtocol, SessionConfig, UsmSecurity};

/// Connector for live devices
#[derive(Debug, Clone, Default)]
pub struct NetworkConnector {
    settings: TransportSettings,
}

impl NetworkConnector {
    /// Creates a connector with the given transport settings
    #[must_use]
    pub const fn new(settings: TransportSettings) -> Self {
        Self { settings }
    }

    /// Transport settings in use
    #[must_use]
    pub const fn settings(&self) -> TransportSettings {
        self.settings
    }

    /// `host:port` address of the agent
    #[must_use]
    pub fn target(&self, host: &str) -> String {
        format!("{host}:{}", self.settings.port)
    }

    /// Per-request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.settings.timeout_secs)
    }
}

impl Connector for NetworkConnector {
    fn connect(&self, config: &SessionConfig) -> CollectionResult<Box<dyn MetricSource>> {
        let target = self.target(config.host());
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CollectionError::Connect {
                host: target.clone(),
                reason: e.to_string(),
            })?;

        if let SessionConfig::Usm { security, .. } = config
            && !security.context_name.is_empty()
        {
            tracing::warn!(
                context = %security.context_name,
                "Context names are not sent by the network transport"
            );
        }

        let client = runtime
            .block_on(
                Client::builder(target.clone(), credentials(config))
                    .timeout(self.timeout())
                    .retries(self.settings.retries)
                    .connect(),
            )
            .map_err(|e| match e {
                async_snmp::Error::Timeout { .. } => CollectionError::Timeout {
                    host: target.clone(),
                },
                other => CollectionError::Connect {
                    host: target.clone(),
                    reason: other.to_string(),
                },
            })?;

        tracing::debug!(
            agent = %target,
            timeout_secs = self.settings.timeout_secs,
            retries = self.settings.retries,
            "Agent client ready"
        );
        Ok(Box::new(NetworkSource {
            target,
            runtime,
            client: Some(client),
        }))
    }
}

/// Builds the client credentials for a negotiated configuration
fn credentials(config: &SessionConfig) -> Auth {
    match config {
        SessionConfig::Community {
            version: CommunityVersion::V1,
            community,
            ..
        } => Auth::v1(community.as_str()),
        SessionConfig::Community {
            version: CommunityVersion::V2c,
            community,
            ..
        } => Auth::v2c(community.as_str()),
        SessionConfig::Usm { security, .. } => {
            let user = Auth::usm(security.user_name.as_str());
            match &security.security {
                UsmSecurity::NoAuthNoPriv => user.into(),
                UsmSecurity::AuthNoPriv(auth) => user
                    .auth(auth_protocol(auth.protocol), auth.passphrase.expose_secret())
                    .into(),
                UsmSecurity::AuthPriv(auth, privacy) => user
                    .auth(auth_protocol(auth.protocol), auth.passphrase.expose_secret())
                    .privacy(
                        priv_protocol(privacy.protocol),
                        privacy.passphrase.expose_secret(),
                    )
                    .into(),
            }
        }
    }
}

const fn auth_protocol(protocol: AuthProtocol) -> async_snmp::AuthProtocol {
    match protocol {
        AuthProtocol::Md5 => async_snmp::AuthProtocol::Md5,
        AuthProtocol::Sha => async_snmp::AuthProtocol::Sha1,
    }
}

const fn priv_protocol(protocol: PrivProtocol) -> async_snmp::PrivProtocol {
    match protocol {
        PrivProtocol::Des => async_snmp::PrivProtocol::Des,
        PrivProtocol::Aes => async_snmp::PrivProtocol::Aes128,
    }
}

/// Converts a varbind value into the checks' value model
fn raw_value(oid: &Oid, value: &Value) -> CollectionResult<RawValue> {
    match value {
        Value::Integer(v) => {
            u64::try_from(*v)
                .map(RawValue::Unsigned)
                .map_err(|_| CollectionError::UnexpectedValue {
                    oid: oid.clone(),
                    expected: "non-negative integer",
                })
        }
        Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => {
            Ok(RawValue::Unsigned(u64::from(*v)))
        }
        Value::Counter64(v) => Ok(RawValue::Unsigned(*v)),
        Value::NoSuchObject | Value::NoSuchInstance | Value::EndOfMibView => {
            Err(CollectionError::NoSuchObject(oid.clone()))
        }
        other => Ok(RawValue::Text(
            other.as_str().map_or_else(|| other.to_string(), str::to_string),
        )),
    }
}

fn request_error(target: &str, err: async_snmp::Error) -> CollectionError {
    match err {
        async_snmp::Error::Timeout { .. } => CollectionError::Timeout {
            host: target.to_string(),
        },
        other => CollectionError::Remote(other.to_string()),
    }
}

fn to_wire(oid: &Oid) -> CollectionResult<async_snmp::Oid> {
    oid.to_string()
        .parse()
        .map_err(|_| CollectionError::Remote(format!("Cannot encode object identifier {oid}")))
}

fn from_wire(oid: &async_snmp::Oid) -> CollectionResult<Oid> {
    oid.to_string()
        .parse()
        .map_err(|_| CollectionError::Remote(format!("Agent returned malformed identifier {oid}")))
}

struct NetworkSource {
    target: String,
    runtime: Runtime,
    client: Option<UdpClient>,
}

impl NetworkSource {
    fn client(&self) -> CollectionResult<&UdpClient> {
        self.client.as_ref().ok_or_else(|| CollectionError::Connect {
            host: self.target.clone(),
            reason: "session already closed".to_string(),
        })
    }
}

impl MetricSource for NetworkSource {
    fn get(&mut self, addresses: &[Oid]) -> CollectionResult<Vec<RawValue>> {
        let _span = tracing::debug_span!("get", agent = %self.target).entered();
        let client = self.client()?;
        let mut values = Vec::with_capacity(addresses.len());
        for oid in addresses {
            let varbind = self
                .runtime
                .block_on(client.get(&to_wire(oid)?))
                .map_err(|e| request_error(&self.target, e))?;
            values.push(raw_value(oid, &varbind.value)?);
        }
        Ok(values)
    }

    fn walk(&mut self, root: &Oid, visit: &mut WalkVisitor<'_>) -> CollectionResult<()> {
        let _span = tracing::debug_span!("walk", agent = %self.target, root = %root).entered();
        let client = self.client()?;
        let mut cursor = root.clone();
        let mut visited = 0usize;
        loop {
            let varbind = self
                .runtime
                .block_on(client.get_next(&to_wire(&cursor)?))
                .map_err(|e| request_error(&self.target, e))?;
            if matches!(varbind.value, Value::EndOfMibView) {
                break;
            }
            let oid = from_wire(&varbind.oid)?;
            if !oid.starts_with(root) {
                break;
            }
            if oid <= cursor {
                return Err(CollectionError::Remote(format!(
                    "Agent walk did not advance past {cursor}"
                )));
            }
            visit(&oid, raw_value(&oid, &varbind.value)?)?;
            visited += 1;
            cursor = oid;
        }
        tracing::debug!(entries = visited, "Walk finished");
        Ok(())
    }

    fn close(&mut self) {
        self.client = None;
    }
}
