//! Offline replay of recorded device values
//!
//! A snapshot is a JSON document mapping dotted OIDs to values:
//!
//! ```json
//! {
//!   "values": {
//!     "1.3.6.1.4.1.11.2.14.11.5.1.9.6.1.0": 85,
//!     "1.3.6.1.4.1.11.2.14.11.1.2.6.1.7.1": "Fan1"
//!   },
//!   "failure": null
//! }
//! ```
//!
//! When `failure` is set, every request fails with that message, which is
//! how an unreachable device is recorded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{CollectionError, CollectionResult, Connector, MetricSource, Oid, RawValue, WalkVisitor};
use crate::session::SessionConfig;

#[derive(Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    values: BTreeMap<String, RawValue>,
    #[serde(default)]
    failure: Option<String>,
}

/// Recorded device state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySnapshot {
    values: BTreeMap<Oid, RawValue>,
    failure: Option<String>,
}

impl ReplaySnapshot {
    /// Creates an empty snapshot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value at `oid`
    #[must_use]
    pub fn with_value(mut self, oid: Oid, value: RawValue) -> Self {
        self.values.insert(oid, value);
        self
    }

    /// Makes every request fail with `message`
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Number of recorded values
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no values are recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parses a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns a message describing the JSON or OID syntax error.
    pub fn from_json(text: &str) -> Result<Self, String> {
        let file: SnapshotFile = serde_json::from_str(text).map_err(|e| e.to_string())?;
        let values = file
            .values
            .into_iter()
            .map(|(key, value)| {
                key.parse::<Oid>()
                    .map(|oid| (oid, value))
                    .map_err(|e| e.to_string())
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(Self {
            values,
            failure: file.failure,
        })
    }

    /// Reads a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Snapshot`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> CollectionResult<Self> {
        let snapshot_error = |reason: String| CollectionError::Snapshot {
            path: path.to_path_buf(),
            reason,
        };
        let text = std::fs::read_to_string(path).map_err(|e| snapshot_error(e.to_string()))?;
        Self::from_json(&text).map_err(snapshot_error)
    }
}

/// A [`MetricSource`] that answers from a [`ReplaySnapshot`]
#[derive(Debug, Clone)]
pub struct ReplaySource {
    snapshot: ReplaySnapshot,
}

impl ReplaySource {
    /// Creates a source over `snapshot`
    #[must_use]
    pub const fn new(snapshot: ReplaySnapshot) -> Self {
        Self { snapshot }
    }

    fn check_failure(&self) -> CollectionResult<()> {
        match &self.snapshot.failure {
            Some(message) => Err(CollectionError::Remote(message.clone())),
            None => Ok(()),
        }
    }
}

impl MetricSource for ReplaySource {
    fn get(&mut self, addresses: &[Oid]) -> CollectionResult<Vec<RawValue>> {
        self.check_failure()?;
        tracing::debug!(count = addresses.len(), "Replaying get");
        addresses
            .iter()
            .map(|oid| {
                self.snapshot
                    .values
                    .get(oid)
                    .cloned()
                    .ok_or_else(|| CollectionError::NoSuchObject(oid.clone()))
            })
            .collect()
    }

    fn walk(&mut self, root: &Oid, visit: &mut WalkVisitor<'_>) -> CollectionResult<()> {
        self.check_failure()?;
        let mut visited = 0usize;
        for (oid, value) in self.snapshot.values.range(root.clone()..) {
            if !oid.starts_with(root) {
                break;
            }
            visit(oid, value.clone())?;
            visited += 1;
        }
        tracing::debug!(root = %root, visited, "Replayed walk");
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum ReplayOrigin {
    File(PathBuf),
    Memory(ReplaySnapshot),
}

/// Opens [`ReplaySource`]s from a snapshot file or an in-memory snapshot
#[derive(Debug, Clone)]
pub struct ReplayConnector {
    origin: ReplayOrigin,
}

impl ReplayConnector {
    /// Replays the snapshot stored at `path`, read when the session opens
    #[must_use]
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: ReplayOrigin::File(path.into()),
        }
    }

    /// Replays an in-memory snapshot
    #[must_use]
    pub const fn from_snapshot(snapshot: ReplaySnapshot) -> Self {
        Self {
            origin: ReplayOrigin::Memory(snapshot),
        }
    }
}

impl Connector for ReplayConnector {
    fn connect(&self, _config: &SessionConfig) -> CollectionResult<Box<dyn MetricSource>> {
        let snapshot = match &self.origin {
            ReplayOrigin::File(path) => ReplaySnapshot::load(path)?,
            ReplayOrigin::Memory(snapshot) => snapshot.clone(),
        };
        Ok(Box::new(ReplaySource::new(snapshot)))
    }
}
