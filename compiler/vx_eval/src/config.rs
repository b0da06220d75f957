//! Evaluation limits.

/// Default ceiling on integer results, in bits.
pub const DEFAULT_MAX_INTEGER_BITS: u64 = 1 << 20;

/// Default ceiling on the list repetition factor.
pub const DEFAULT_MAX_LIST_REPETITION: u64 = 0xFFFF_FFFF;

/// Default ceiling on the length of a repeated list or byte string.
pub const DEFAULT_MAX_REPEAT_LENGTH: u64 = 1 << 30;

/// Limits applied by the evaluator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Integer results wider than this are "bigint overflow".
    pub max_integer_bits: u64,
    /// Largest accepted `(*)` factor.
    pub max_list_repetition: u64,
    /// Largest element or byte count a repetition may produce.
    pub max_repeat_length: u64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_integer_bits: DEFAULT_MAX_INTEGER_BITS,
            max_list_repetition: DEFAULT_MAX_LIST_REPETITION,
            max_repeat_length: DEFAULT_MAX_REPEAT_LENGTH,
        }
    }
}

impl EvalConfig {
    #[must_use]
    pub fn with_max_integer_bits(mut self, bits: u64) -> Self {
        self.max_integer_bits = bits;
        self
    }

    #[must_use]
    pub fn with_max_list_repetition(mut self, factor: u64) -> Self {
        self.max_list_repetition = factor;
        self
    }

    #[must_use]
    pub fn with_max_repeat_length(mut self, length: u64) -> Self {
        self.max_repeat_length = length;
        self
    }
}
