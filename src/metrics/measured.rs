use serde::{Deserialize, Serialize};

/// Why a metric could not be computed from its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Degeneracy {
    EmptyInput,
    TooFewPoints,
    ZeroLength,
    ZeroArea,
    Untriangulable,
}

/// A metric value, or the sentinel returned when the input was degenerate.
///
/// Both arms carry a usable number, so callers that only need a score can
/// call [`Measured::value`]; callers that must tell "a real zero" from
/// "could not compute" match on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Measured<T> {
    Value { value: T },
    Degenerate { reason: Degeneracy, sentinel: T },
}

impl<T: Copy> Measured<T> {
    #[must_use]
    pub fn ok(value: T) -> Self {
        Self::Value { value }
    }

    #[must_use]
    pub fn degenerate(reason: Degeneracy, sentinel: T) -> Self {
        Self::Degenerate { reason, sentinel }
    }

    /// The computed value or the sentinel.
    #[must_use]
    pub fn value(&self) -> T {
        match *self {
            Self::Value { value } => value,
            Self::Degenerate { sentinel, .. } => sentinel,
        }
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate { .. })
    }

    #[must_use]
    pub fn reason(&self) -> Option<Degeneracy> {
        match *self {
            Self::Value { .. } => None,
            Self::Degenerate { reason, .. } => Some(reason),
        }
    }

    /// Applies `f` to the value or the sentinel, keeping the variant.
    #[must_use]
    pub fn map<U: Copy>(self, f: impl FnOnce(T) -> U) -> Measured<U> {
        match self {
            Self::Value { value } => Measured::Value { value: f(value) },
            Self::Degenerate { reason, sentinel } => Measured::Degenerate {
                reason,
                sentinel: f(sentinel),
            },
        }
    }
}
