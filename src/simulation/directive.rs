/*!
 * Directives
 * Decoded workload steps
 */

use crate::core::limits::COALESCE_SENTINEL;
use crate::core::types::{Pid, Size};
use miette::Diagnostic;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
    Allocate { owner: Pid, size: Size },
    Deallocate { owner: Pid },
    Coalesce,
}

/// A raw `pid value` pair that does not decode to a directive
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum DirectiveError {
    #[error("PID 0 is not a valid directive")]
    #[diagnostic(
        code(directive::zero_pid),
        help("Use a positive PID to allocate, a negative PID to deallocate, or -99999 to coalesce")
    )]
    ZeroPid,

    #[error("Allocation size for PID {pid} must be positive, got {size}")]
    #[diagnostic(code(directive::invalid_size))]
    InvalidSize { pid: i64, size: i64 },

    #[error("PID {0} does not fit in a process id")]
    #[diagnostic(code(directive::pid_out_of_range))]
    PidOutOfRange(i64),
}

impl Directive {
    /// Decode the `pid value` encoding used by workload files
    ///
    /// `pid == -99999` coalesces, a positive pid allocates `value` units and
    /// a negative pid deallocates `|pid|`.
    pub fn decode(pid: i64, value: i64) -> Result<Self, DirectiveError> {
        if pid == COALESCE_SENTINEL {
            return Ok(Directive::Coalesce);
        }

        let owner = Pid::try_from(pid.unsigned_abs()).map_err(|_| DirectiveError::PidOutOfRange(pid))?;
        match pid.signum() {
            1 => {
                let size = Size::try_from(value)
                    .ok()
                    .filter(|&size| size > 0)
                    .ok_or(DirectiveError::InvalidSize { pid, size: value })?;
                Ok(Directive::Allocate { owner, size })
            }
            -1 => Ok(Directive::Deallocate { owner }),
            _ => Err(DirectiveError::ZeroPid),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Allocate { owner, size } => write!(f, "ALLOCATE: {size} FROM PID: {owner}"),
            Directive::Deallocate { owner } => write!(f, "DEALLOCATE MEM: PID {owner}"),
            Directive::Coalesce => f.write_str("COALESCE/COMPACT"),
        }
    }
}
