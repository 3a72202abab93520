/*!
 * Workload Reader
 * Parses a partition size and an ordered directive sequence from text
 *
 * Format:
 * - blank lines and `#` comments are ignored
 * - the first remaining line is the partition size
 * - every later line is `pid [value]` (see [`Directive::decode`])
 */

use super::directive::{Directive, DirectiveError};
use crate::core::limits::WORKLOAD_COMMENT;
use crate::core::types::Size;
use miette::Diagnostic;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Workload parsing errors
#[derive(Error, Debug, Diagnostic)]
pub enum WorkloadError {
    #[error("Failed to read workload {}", .path.display())]
    #[diagnostic(code(workload::io), help("Check that the input file exists and is readable"))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read workload")]
    #[diagnostic(code(workload::io))]
    Read(#[source] io::Error),

    #[error("Workload is empty: expected a partition size")]
    #[diagnostic(
        code(workload::missing_partition_size),
        help("The first non-comment line must hold the partition size")
    )]
    MissingPartitionSize,

    #[error("Line {line}: partition size must be positive, got {value}")]
    #[diagnostic(code(workload::invalid_partition_size))]
    InvalidPartitionSize { line: usize, value: i64 },

    #[error("Line {line}: {token:?} is not an integer")]
    #[diagnostic(code(workload::invalid_token))]
    InvalidToken { line: usize, token: String },

    #[error("Line {line}: expected {expected}, found {found} values")]
    #[diagnostic(code(workload::token_count), help("Directive lines are `pid size`"))]
    TokenCount {
        line: usize,
        expected: &'static str,
        found: usize,
    },

    #[error("Line {line}: invalid directive")]
    #[diagnostic(code(workload::invalid_directive))]
    InvalidDirective {
        line: usize,
        #[source]
        source: DirectiveError,
    },
}

/// Everything the simulation needs from its input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    pub partition_size: Size,
    pub directives: Vec<Directive>,
}

impl Workload {
    pub fn new(partition_size: Size, directives: Vec<Directive>) -> Self {
        Self {
            partition_size,
            directives,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, WorkloadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| WorkloadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let workload = Self::parse(&text)?;
        debug!(
            path = %path.display(),
            partition_size = workload.partition_size,
            directives = workload.directives.len(),
            "Loaded workload"
        );
        Ok(workload)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self, WorkloadError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(WorkloadError::Read)?;
        Self::parse(&text)
    }

    pub fn parse(input: &str) -> Result<Self, WorkloadError> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(index, raw)| (index + 1, strip_comment(raw).trim()))
            .filter(|(_, text)| !text.is_empty());

        let (line, text) = lines.next().ok_or(WorkloadError::MissingPartitionSize)?;
        let fields = parse_fields(line, text, 1..=1, "a partition size")?;
        let value = fields[0];
        let partition_size = Size::try_from(value)
            .ok()
            .filter(|&size| size > 0)
            .ok_or(WorkloadError::InvalidPartitionSize { line, value })?;

        let directives = lines
            .map(|(line, text)| {
                let fields = parse_fields(line, text, 1..=2, "`pid` or `pid size`")?;
                let value = fields.get(1).copied().unwrap_or(0);
                Directive::decode(fields[0], value)
                    .map_err(|source| WorkloadError::InvalidDirective { line, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(partition_size, directives))
    }
}

fn strip_comment(line: &str) -> &str {
    line.split_once(WORKLOAD_COMMENT)
        .map_or(line, |(before, _)| before)
}

fn parse_fields(
    line: usize,
    text: &str,
    arity: std::ops::RangeInclusive<usize>,
    expected: &'static str,
) -> Result<Vec<i64>, WorkloadError> {
    let tokens: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .collect();

    if !arity.contains(&tokens.len()) {
        return Err(WorkloadError::TokenCount {
            line,
            expected,
            found: tokens.len(),
        });
    }

    tokens
        .into_iter()
        .map(|token| {
            token.parse::<i64>().map_err(|_| WorkloadError::InvalidToken {
                line,
                token: token.to_string(),
            })
        })
        .collect()
}
