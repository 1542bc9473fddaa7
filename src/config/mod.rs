//! Configuration for the struct converter.

/// Configuration for record conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Maximum nesting depth before conversion gives up
    pub max_depth: usize,
    /// Fail instead of warn when a marker list names an unknown field
    pub strict_explicit_fields: bool,
    /// Log every record conversion at trace level
    pub log_conversions: bool,
    /// Batches smaller than this are converted sequentially
    pub parallel_threshold: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            strict_explicit_fields: false,
            log_conversions: false,
            parallel_threshold: 32,
        }
    }
}

impl ConverterConfig {
    /// Reject marker lists that name fields the record does not have
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict_explicit_fields = true;
        self
    }

    /// Override the nesting limit
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
