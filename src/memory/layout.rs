/*!
 * Layout Verification
 * Checks that free and allocated blocks tile the partition exactly
 */

use super::block_list::BlockList;
use super::types::Block;
use crate::core::types::{Address, Pid, Size};
use std::collections::HashSet;
use thiserror::Error;

/// A broken partition invariant
///
/// These never come from bad input; they mean the allocator itself is wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutViolation {
    #[error("Free list holds owned block {0}")]
    OwnedBlockInFreeList(Block),

    #[error("Allocated list holds unowned block {0}")]
    FreeBlockInAllocatedList(Block),

    #[error("PID {0} owns more than one block")]
    DuplicateOwner(Pid),

    #[error("Block {block} lies outside partition of size {partition_size}")]
    OutOfBounds { block: Block, partition_size: Size },

    #[error("Blocks {first} and {second} overlap")]
    Overlap { first: Block, second: Block },

    #[error("Addresses [{start}, {end}] are not covered by any block")]
    Gap { start: Address, end: Address },
}

/// Verify every structural invariant of a partition's two lists
pub fn verify_layout(
    partition_size: Size,
    free: &BlockList,
    allocated: &BlockList,
) -> Result<(), LayoutViolation> {
    if let Some(block) = free.iter().find(|block| !block.is_free()) {
        return Err(LayoutViolation::OwnedBlockInFreeList(block.clone()));
    }
    if let Some(block) = allocated.iter().find(|block| block.is_free()) {
        return Err(LayoutViolation::FreeBlockInAllocatedList(block.clone()));
    }

    let mut owners = HashSet::with_capacity(allocated.len());
    for block in allocated {
        if !owners.insert(block.owner()) {
            return Err(LayoutViolation::DuplicateOwner(block.owner()));
        }
    }

    let mut all: Vec<&Block> = free.iter().chain(allocated.iter()).collect();
    if let Some(block) = all.iter().find(|block| block.end() >= partition_size) {
        return Err(LayoutViolation::OutOfBounds {
            block: (*block).clone(),
            partition_size,
        });
    }

    all.sort_by_key(|block| block.start());
    let mut next_expected: Address = 0;
    let mut previous: Option<&Block> = None;
    for block in all {
        if block.start() < next_expected {
            if let Some(previous) = previous {
                return Err(LayoutViolation::Overlap {
                    first: previous.clone(),
                    second: block.clone(),
                });
            }
        }
        if block.start() > next_expected {
            return Err(LayoutViolation::Gap {
                start: next_expected,
                end: block.start() - 1,
            });
        }
        next_expected = block.end() + 1;
        previous = Some(block);
    }

    if next_expected < partition_size {
        return Err(LayoutViolation::Gap {
            start: next_expected,
            end: partition_size - 1,
        });
    }
    Ok(())
}
