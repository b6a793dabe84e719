//! Error types for matcher construction and reporting.

/// Error returned by matcher accessors and direction parsing.
///
/// Builder misuse (a non-positive threshold or multiplier, a zero-length
/// sampling window) is a programming error and panics at the call site
/// instead; this type covers the conditions a caller can reasonably hit
/// at runtime and recover from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A direction string other than "faster" or "slower" was supplied.
    ///
    /// Only produced by the textual surface ([`Direction`]'s `FromStr`
    /// impl); constructing a matcher with the enum directly cannot fail.
    ///
    /// [`Direction`]: crate::Direction
    InvalidDirection(String),

    /// A message, ratio, or report accessor was called before the matcher
    /// evaluated a workload.
    ///
    /// Estimates only exist after `matches` has run the sampler; failing
    /// fast here beats silently reporting a zero throughput.
    NotMeasured,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDirection(value) => write!(
                f,
                "comparison direction must be \"faster\" or \"slower\", not \"{}\"",
                value
            ),
            Self::NotMeasured => write!(
                f,
                "matcher has not been evaluated yet; call matches() with a workload first"
            ),
        }
    }
}

impl std::error::Error for Error {}
