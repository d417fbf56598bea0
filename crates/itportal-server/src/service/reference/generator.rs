use rand::Rng;

/// Produces candidate reference codes.
pub trait CandidateGenerator {
    /// Returns the next candidate. Uniqueness is checked by the caller.
    fn generate(&self) -> String;
}

/// Generates `{prefix}-NNNNNN` with six random decimal digits.
///
/// The digits come from the thread-local RNG and are not suitable for
/// anything security sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomCandidateGenerator {
    prefix: String,
}

impl RandomCandidateGenerator {
    /// Default code prefix.
    pub const DEFAULT_PREFIX: &'static str = "REF";

    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for RandomCandidateGenerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIX)
    }
}

impl CandidateGenerator for RandomCandidateGenerator {
    fn generate(&self) -> String {
        let digits = rand::rng().random_range(100_000..=999_999);
        format!("{}-{}", self.prefix, digits)
    }
}
