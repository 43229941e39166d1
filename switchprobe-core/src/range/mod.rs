//! Threshold range expressions
//!
//! Parses the monitoring-plugin range syntax (`10`, `10:20`, `~:20`, `10:`,
//! `@10:20`) into an immutable [`RangeSpec`] and decides whether a sampled
//! value breaches it.
//!
//! Without the `@` prefix a range describes the acceptable region and the
//! check alerts when the value falls outside it. With `@` the meaning flips
//! and the check alerts when the value falls inside.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors that can occur while parsing a range expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The expression was empty (or only the `@` marker)
    #[error("Empty range expression")]
    Empty,

    /// A bound was not a finite number
    #[error("Invalid range bound '{token}' in '{input}'")]
    InvalidBound {
        /// The offending bound text
        token: String,
        /// The full expression as given
        input: String,
    },

    /// The lower bound is greater than the upper bound
    #[error("Invalid range '{input}': lower bound {lower} is greater than upper bound {upper}")]
    Reversed {
        /// Parsed lower bound
        lower: String,
        /// Parsed upper bound
        upper: String,
        /// The full expression as given
        input: String,
    },
}

/// Result type for range parsing
pub type RangeResult<T> = Result<T, RangeError>;

/// One end of a range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// No limit on this side
    Unbounded,
    /// Inclusive finite limit
    Value(f64),
}

impl Bound {
    /// Returns the finite limit, if any
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Unbounded => None,
            Self::Value(v) => Some(v),
        }
    }
}

/// A parsed threshold range
///
/// Bounds are inclusive. When both are finite, `lower <= upper` holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSpec {
    lower: Bound,
    upper: Bound,
    inverted: bool,
}

impl RangeSpec {
    /// Parses a range expression.
    ///
    /// Surrounding whitespace is ignored. An empty start (`:20`) or `~`
    /// means negative infinity, and an empty end (`10:`) means positive
    /// infinity. A bare number `N` is shorthand for `0:N`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] naming the offending token if the syntax is
    /// malformed, a bound is not a finite number, or the bounds are reversed.
    pub fn parse(input: &str) -> RangeResult<Self> {
        let trimmed = input.trim();
        let (inverted, body) = match trimmed.strip_prefix('@') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        if body.is_empty() {
            return Err(RangeError::Empty);
        }

        let (lower, upper) = match body.split_once(':') {
            Some((start, end)) => {
                let lower = match start {
                    "" | "~" => Bound::Unbounded,
                    token => Bound::Value(parse_bound(token, input)?),
                };
                let upper = if end.is_empty() {
                    Bound::Unbounded
                } else {
                    Bound::Value(parse_bound(end, input)?)
                };
                (lower, upper)
            }
            None => (Bound::Value(0.0), Bound::Value(parse_bound(body, input)?)),
        };

        if let (Bound::Value(lo), Bound::Value(hi)) = (lower, upper)
            && lo > hi
        {
            return Err(RangeError::Reversed {
                lower: lo.to_string(),
                upper: hi.to_string(),
                input: input.to_string(),
            });
        }

        Ok(Self {
            lower,
            upper,
            inverted,
        })
    }

    /// Lower bound of the range
    #[must_use]
    pub const fn lower(&self) -> Bound {
        self.lower
    }

    /// Upper bound of the range
    #[must_use]
    pub const fn upper(&self) -> Bound {
        self.upper
    }

    /// Whether the range alerts on values inside it (`@` prefix)
    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Returns true if `value` lies within the bounds, ends included
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        let above_lower = match self.lower {
            Bound::Unbounded => true,
            Bound::Value(lo) => lo <= value,
        };
        let below_upper = match self.upper {
            Bound::Unbounded => true,
            Bound::Value(hi) => value <= hi,
        };
        above_lower && below_upper
    }

    /// Returns true if `value` breaches the threshold and should alert.
    ///
    /// A NaN sample is never inside a range. It alerts for normal ranges
    /// and stays quiet for inverted ones.
    #[must_use]
    pub fn evaluate(&self, value: f64) -> bool {
        self.inverted == self.contains(value)
    }
}

impl FromStr for RangeSpec {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Renders the canonical `[@]start:end` form, which parses back to an
/// equal range.
impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            f.write_str("@")?;
        }
        match self.lower {
            Bound::Unbounded => f.write_str("~")?,
            Bound::Value(v) => write!(f, "{v}")?,
        }
        f.write_str(":")?;
        if let Bound::Value(v) = self.upper {
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

fn parse_bound(token: &str, input: &str) -> RangeResult<f64> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RangeError::InvalidBound {
            token: token.to_string(),
            input: input.to_string(),
        })
}
