//! Metric sources
//!
//! The checks read values through the [`MetricSource`] trait and never see the
//! wire encoding. A [`Connector`] opens a source for a negotiated
//! [`SessionConfig`] and hands it back wrapped in a [`Session`] guard, which
//! closes the connection when it goes out of scope.

mod network;
mod oid;
mod replay;

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::session::SessionConfig;

pub use network::NetworkConnector;
pub use oid::{Oid, OidError};
pub use replay::{ReplayConnector, ReplaySnapshot, ReplaySource};

/// Default SNMP agent port
pub const DEFAULT_PORT: u16 = 161;

/// Errors raised while collecting values from a device
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// The connection could not be opened
    #[error("Failed to connect to {host}: {reason}")]
    Connect {
        /// Target host
        host: String,
        /// Underlying failure
        reason: String,
    },

    /// The device did not answer in time
    #[error("Request to {host} timed out")]
    Timeout {
        /// Target host
        host: String,
    },

    /// The device answered with an error
    #[error("Device error: {0}")]
    Remote(String),

    /// The requested object does not exist on the device
    #[error("No such object: {0}")]
    NoSuchObject(Oid),

    /// A value had the wrong type for its use
    #[error("Unexpected value for {oid}: expected {expected}")]
    UnexpectedValue {
        /// Object that carried the value
        oid: Oid,
        /// What the caller needed
        expected: &'static str,
    },

    /// The response held fewer values than were requested
    #[error("Short response: requested {requested} values, received {received}")]
    ShortResponse {
        /// Number of objects requested
        requested: usize,
        /// Number of values returned
        received: usize,
    },

    /// A recorded snapshot could not be loaded
    #[error("Failed to load snapshot {path}: {reason}")]
    Snapshot {
        /// Snapshot path
        path: PathBuf,
        /// Read or parse failure
        reason: String,
    },
}

/// Result type for collection operations
pub type CollectionResult<T> = Result<T, CollectionError>;

/// A value returned by a device
///
/// Numeric SNMP types (integers, gauges, counters, timeticks) collapse into
/// `Unsigned`, and octet strings into `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Unsigned integer
    Unsigned(u64),
    /// Text
    Text(String),
}

impl RawValue {
    /// Returns the value as an unsigned integer.
    ///
    /// Text that holds a decimal integer is accepted as well.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Unsigned(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Returns the value as text
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Unsigned(v) => v.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Like [`as_u64`](Self::as_u64), but reports a typed error naming `oid`
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::UnexpectedValue`] if the value is not numeric.
    pub fn expect_u64(&self, oid: &Oid) -> CollectionResult<u64> {
        self.as_u64().ok_or_else(|| CollectionError::UnexpectedValue {
            oid: oid.clone(),
            expected: "unsigned integer",
        })
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Callback invoked for each entry of a walk
pub type WalkVisitor<'a> = dyn FnMut(&Oid, RawValue) -> CollectionResult<()> + 'a;

/// A live source of device values
pub trait MetricSource {
    /// Fetches one value per address, in request order.
    ///
    /// # Errors
    ///
    /// Returns a [`CollectionError`] if any address cannot be read.
    fn get(&mut self, addresses: &[Oid]) -> CollectionResult<Vec<RawValue>>;

    /// Visits every object below `root` in ascending OID order.
    ///
    /// The order is stable, so two walks over parallel table columns line up
    /// index for index.
    ///
    /// # Errors
    ///
    /// Returns a [`CollectionError`] on transport failure, or whatever the
    /// visitor returns.
    fn walk(&mut self, root: &Oid, visit: &mut WalkVisitor<'_>) -> CollectionResult<()>;

    /// Releases the underlying connection. Called exactly once by [`Session`].
    fn close(&mut self) {}
}

/// Opens metric sources for a negotiated session
pub trait Connector {
    /// Opens a source for `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`CollectionError`] if the connection cannot be established.
    fn connect(&self, config: &SessionConfig) -> CollectionResult<Box<dyn MetricSource>>;

    /// Opens a source and wraps it in a [`Session`] guard.
    ///
    /// # Errors
    ///
    /// Propagates the failure of [`connect`](Self::connect).
    fn open(&self, config: &SessionConfig) -> CollectionResult<Session> {
        let _span = tracing::debug_span!("connect", host = %config.host()).entered();
        let source = self.connect(config)?;
        tracing::debug!(version = %config.version(), "Session opened");
        Ok(Session::new(config.host(), source))
    }
}

/// Scoped ownership of an open connection
///
/// Dereferences to the underlying [`MetricSource`]. The connection is closed
/// when the guard is dropped, whichever way the check exits.
pub struct Session {
    host: String,
    source: Box<dyn MetricSource>,
}

impl Session {
    /// Wraps an already open source
    #[must_use]
    pub fn new(host: impl Into<String>, source: Box<dyn MetricSource>) -> Self {
        Self {
            host: host.into(),
            source,
        }
    }

    /// Target host of this session
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }
}

impl Deref for Session {
    type Target = dyn MetricSource;

    fn deref(&self) -> &Self::Target {
        self.source.as_ref()
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.source.as_mut()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.source.close();
        tracing::debug!(host = %self.host, "Session closed");
    }
}

/// Network transport settings (stored in the settings file under `[transport]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransportSettings {
    /// Agent UDP port
    pub port: u16,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Retries after a timeout
    pub retries: u32,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            timeout_secs: 5,
            retries: 1,
        }
    }
}
