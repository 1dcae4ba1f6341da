use crate::logging::LogFormat;

pub use bufroute::operations::DEFAULT_PREFIX;

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default operation-name prefix.
pub fn default_prefix() -> &'static str {
    DEFAULT_PREFIX
}

/// Owned prefix value used where allocation is required (e.g. serde).
pub fn default_prefix_string() -> String {
    DEFAULT_PREFIX.to_string()
}

/// Default log filter expression.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Default logging format.
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}
