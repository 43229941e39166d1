//! Object identifiers

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors from parsing dotted-decimal OID text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OidError {
    /// No arcs at all
    #[error("Empty object identifier")]
    Empty,
    /// An arc was empty or not a number
    #[error("Invalid arc '{arc}' in object identifier '{input}'")]
    InvalidArc {
        /// The offending arc
        arc: String,
        /// The full text
        input: String,
    },
}

/// An SNMP object identifier
///
/// Ordering is arc-by-arc numeric, which is the order an agent walks a MIB.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Oid(Vec<u32>);

impl Oid {
    /// Builds an OID from its arcs
    #[must_use]
    pub const fn from_arcs(arcs: Vec<u32>) -> Self {
        Self(arcs)
    }

    /// The numeric arcs
    #[must_use]
    pub fn arcs(&self) -> &[u32] {
        &self.0
    }

    /// Returns true if `self` lies at or below `root`
    #[must_use]
    pub fn starts_with(&self, root: &Self) -> bool {
        self.0.starts_with(&root.0)
    }

    /// Returns a new OID with `arc` appended
    #[must_use]
    pub fn child(&self, arc: u32) -> Self {
        let mut arcs = self.0.clone();
        arcs.push(arc);
        Self(arcs)
    }
}

impl FromStr for Oid {
    type Err = OidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('.').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(OidError::Empty);
        }

        body.split('.')
            .map(|arc| {
                arc.parse::<u32>().map_err(|_| OidError::InvalidArc {
                    arc: arc.to_string(),
                    input: s.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{arc}")?;
            first = false;
        }
        Ok(())
    }
}
