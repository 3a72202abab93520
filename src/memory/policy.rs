/*!
 * Placement Policies
 * Candidate selection and free-list ordering per fit policy
 */

use super::block_list::BlockList;
use super::types::Block;
use crate::core::types::Size;
use miette::Diagnostic;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Rule that picks which free block satisfies a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitPolicy {
    /// First block large enough, in current free-list order
    FirstFit,
    /// Smallest leftover; ties go to the block seen first
    BestFit,
    /// Largest leftover; ties go to the block seen first
    WorstFit,
}

impl FitPolicy {
    pub const ALL: [FitPolicy; 3] = [FitPolicy::FirstFit, FitPolicy::BestFit, FitPolicy::WorstFit];

    /// Index of the free block this policy would carve `size` units from
    pub fn select(self, free: &BlockList, size: Size) -> Option<usize> {
        let mut fits = free
            .iter()
            .enumerate()
            .filter(|(_, block)| block.size() >= size)
            .map(|(index, block)| (index, block.size() - size));

        let chosen = match self {
            FitPolicy::FirstFit => fits.next(),
            // min_by_key keeps the first of equal minima
            FitPolicy::BestFit => fits.min_by_key(|&(_, leftover)| leftover),
            FitPolicy::WorstFit => fits.reduce(|best, candidate| {
                if candidate.1 > best.1 {
                    candidate
                } else {
                    best
                }
            }),
        };
        chosen.map(|(index, _)| index)
    }

    /// Return a block to the free list in this policy's order
    pub fn reinsert(self, free: &mut BlockList, block: Block) {
        debug_assert!(block.is_free(), "reinserting owned block {block}");
        match self {
            FitPolicy::FirstFit => free.push_back(block),
            FitPolicy::BestFit => free.insert_ascending_by_size(block),
            FitPolicy::WorstFit => free.insert_descending_by_size(block),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FitPolicy::FirstFit => "first-fit",
            FitPolicy::BestFit => "best-fit",
            FitPolicy::WorstFit => "worst-fit",
        }
    }
}

impl fmt::Display for FitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized policy token
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[error("Unknown memory management policy: {token:?}")]
#[diagnostic(
    code(policy::unknown),
    help("Use -F (first fit / FIFO), -B (best fit) or -W (worst fit)")
)]
pub struct PolicyParseError {
    pub token: String,
}

impl FromStr for FitPolicy {
    type Err = PolicyParseError;

    /// Accepts `-F`, `-FIFO`, `-B`, `-BESTFIT`, `-W`, `-WORSTFIT` in any case,
    /// with or without the leading hyphen, plus spelled-out names such as
    /// `first-fit` or `worst_fit`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .trim_start_matches('-')
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_uppercase())
            .collect();

        match normalized.as_str() {
            "F" | "FIFO" | "FIRST" | "FIRSTFIT" => Ok(FitPolicy::FirstFit),
            "B" | "BEST" | "BESTFIT" => Ok(FitPolicy::BestFit),
            "W" | "WORST" | "WORSTFIT" => Ok(FitPolicy::WorstFit),
            _ => Err(PolicyParseError {
                token: s.to_string(),
            }),
        }
    }
}
