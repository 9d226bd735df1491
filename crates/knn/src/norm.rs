//! The p-norm parameter and its Euclidean fallback.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which p-norm to measure distances with.
///
/// `Other` holds any requested value that is neither a positive integer
/// nor `+∞`. It is never an error: distance computation substitutes the
/// Euclidean norm and reports a [`NonStandardNormWarning`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PNorm {
    /// `(Σ |xᵢ − qᵢ|ᵖ)^(1/p)` for a positive integer p.
    Finite(NonZeroU32),
    /// `max |xᵢ − qᵢ|` (Chebyshev).
    Infinity,
    /// A non-standard request, kept verbatim.
    Other(f64),
}

impl PNorm {
    /// Taxicab norm, p = 1.
    pub const TAXICAB: PNorm = PNorm::Finite(NonZeroU32::MIN);

    /// Euclidean norm, p = 2.
    pub const EUCLIDEAN: PNorm = match NonZeroU32::new(2) {
        Some(p) => PNorm::Finite(p),
        None => unreachable!(),
    };

    /// Classifies a numeric p.
    ///
    /// `+∞` maps to [`PNorm::Infinity`], integral values in `[1, u32::MAX]`
    /// map to [`PNorm::Finite`], everything else (zero, negatives,
    /// fractions, NaN, `−∞`) to [`PNorm::Other`].
    pub fn from_f64(value: f64) -> Self {
        if value == f64::INFINITY {
            return PNorm::Infinity;
        }
        if value.fract() == 0.0 && (1.0..=u32::MAX as f64).contains(&value) {
            if let Some(p) = NonZeroU32::new(value as u32) {
                return PNorm::Finite(p);
            }
        }
        PNorm::Other(value)
    }

    /// Returns `true` unless this is [`PNorm::Other`].
    pub fn is_standard(&self) -> bool {
        !matches!(self, PNorm::Other(_))
    }

    /// Returns the norm that will actually be applied, plus a warning when
    /// the request had to be replaced by the Euclidean norm.
    pub fn resolve(self) -> (PNorm, Option<NonStandardNormWarning>) {
        match self {
            PNorm::Finite(_) | PNorm::Infinity => (self, None),
            PNorm::Other(requested) => (
                PNorm::EUCLIDEAN,
                Some(NonStandardNormWarning { requested }),
            ),
        }
    }
}

impl Default for PNorm {
    fn default() -> Self {
        PNorm::EUCLIDEAN
    }
}

impl From<u32> for PNorm {
    fn from(p: u32) -> Self {
        match NonZeroU32::new(p) {
            Some(p) => PNorm::Finite(p),
            None => PNorm::Other(0.0),
        }
    }
}

impl From<f64> for PNorm {
    fn from(value: f64) -> Self {
        PNorm::from_f64(value)
    }
}

impl fmt::Display for PNorm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PNorm::Finite(p) => write!(f, "{p}"),
            PNorm::Infinity => f.write_str("inf"),
            PNorm::Other(v) => write!(f, "{v}"),
        }
    }
}

/// Error returned when a p-norm string is neither a number nor an infinity token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid p-norm {input:?}: expected a number or \"inf\"")]
pub struct ParsePNormError {
    input: String,
}

impl FromStr for PNorm {
    type Err = ParsePNormError;

    /// Accepts `inf`, `infinity` or `∞` (any case) and any `f64` literal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "inf" | "+inf" | "infinity" | "+infinity" | "∞" => Ok(PNorm::Infinity),
            other => other
                .parse::<f64>()
                .map(PNorm::from_f64)
                .map_err(|_| ParsePNormError {
                    input: trimmed.to_string(),
                }),
        }
    }
}

impl Serialize for PNorm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PNorm::Finite(p) => serializer.serialize_u32(p.get()),
            PNorm::Infinity => serializer.serialize_str("inf"),
            PNorm::Other(v) => serializer.serialize_f64(*v),
        }
    }
}

impl<'de> Deserialize<'de> for PNorm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(v) => Ok(PNorm::from_f64(v as f64)),
            Raw::Float(v) => Ok(PNorm::from_f64(v)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Notice that a requested p could not be honoured.
///
/// The distance computation still completes with the Euclidean norm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NonStandardNormWarning {
    requested: f64,
}

impl NonStandardNormWarning {
    /// The p value originally requested.
    pub fn requested(&self) -> f64 {
        self.requested
    }
}

impl fmt::Display for NonStandardNormWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "p = {} is not a positive integer or infinity; using the Euclidean norm (p = 2)",
            self.requested
        )
    }
}
