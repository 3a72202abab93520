/*!
 * Simulator Limits and Constants
 *
 * Centralized location for the workload encoding, logging defaults and
 * environment variable names.
 */

// =============================================================================
// WORKLOAD ENCODING
// =============================================================================

/// Directive pid that encodes a coalesce request
/// The value column of a coalesce line is ignored
pub const COALESCE_SENTINEL: i64 = -99999;

/// Comment marker for workload files (runs to end of line)
pub const WORKLOAD_COMMENT: char = '#';

// =============================================================================
// LOGGING
// =============================================================================

/// Filter used when `RUST_LOG` is unset
/// Rendered lists go to stdout, so only problems reach stderr by default
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Environment variable that switches tracing output to JSON
pub const TRACE_JSON_ENV: &str = "MMU_TRACE_JSON";

// =============================================================================
// RENDERING
// =============================================================================

/// Banner printed around each directive header in text output
pub const STEP_BANNER: &str = "************************";
