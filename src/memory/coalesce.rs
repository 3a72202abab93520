/*!
 * Free Block Coalescing
 * Rebuilds the free list in address order and merges adjacent blocks
 */

use super::block_list::BlockList;
use tracing::{debug, info};

/// Result of one coalescing pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coalesced {
    pub list: BlockList,
    /// Number of pairwise merges performed
    pub merged: usize,
}

/// Merge every run of address-adjacent free blocks
///
/// The input's ordering is discarded: the returned list is always sorted by
/// address, whatever policy built the input.
pub fn coalesce(free: BlockList) -> BlockList {
    coalesce_with_report(free).list
}

/// Same as [`coalesce`], also reporting how many merges happened
pub fn coalesce_with_report(mut free: BlockList) -> Coalesced {
    let before = free.len();

    let mut sorted = BlockList::with_capacity(before);
    while let Some(block) = free.remove_front() {
        sorted.insert_ascending_by_address(block);
    }

    let mut list = BlockList::with_capacity(before);
    let mut merged = 0;
    for block in sorted {
        match list.back_mut() {
            Some(current) if current.is_adjacent_to(&block) => {
                debug!(into = %current, absorbed = %block, "merging adjacent free blocks");
                current.absorb(block);
                merged += 1;
            }
            _ => list.push_back(block),
        }
    }

    if merged > 0 {
        info!(
            "Coalesced {} pairs of adjacent free blocks, reduced from {} to {} blocks",
            merged,
            before,
            list.len()
        );
    }

    Coalesced { list, merged }
}
