/*!
 * Memory Allocator Implementation
 * Allocation and deallocation against a free list and an allocated list
 */

use super::block_list::BlockList;
use super::policy::FitPolicy;
use super::types::{Block, MemoryError, MemoryResult};
use crate::core::types::{Pid, Size, FREE_OWNER};
use tracing::{debug, warn};

/// Allocate `size` units for `owner` using `policy`
///
/// The chosen free block is detached and split. The carved block joins the
/// allocated list in address order; any leftover goes back to the free list
/// through the policy's reinsertion variant. On error nothing is mutated.
pub fn allocate(
    free: &mut BlockList,
    allocated: &mut BlockList,
    owner: Pid,
    size: Size,
    policy: FitPolicy,
) -> MemoryResult<Block> {
    if owner == FREE_OWNER {
        return Err(MemoryError::InvalidOwner);
    }
    if size == 0 {
        return Err(MemoryError::InvalidSize(size));
    }
    if let Some(held) = allocated.find_by_owner(owner) {
        warn!(owner, start = held.start(), end = held.end(), "owner already holds a block");
        return Err(MemoryError::OwnerAlreadyAllocated {
            owner,
            start: held.start(),
            end: held.end(),
        });
    }

    let candidate = policy
        .select(free, size)
        .and_then(|index| free.remove_at(index));
    let Some(candidate) = candidate else {
        let largest_free = free.largest_block_size();
        let total_free = free.total_size();
        warn!(
            owner,
            requested = size,
            largest_free,
            total_free,
            %policy,
            "not enough memory"
        );
        return Err(MemoryError::OutOfMemory {
            requested: size,
            largest_free,
            total_free,
        });
    };

    let candidate_size = candidate.size();
    let (block, leftover) = candidate.split(size, owner);
    allocated.insert_ascending_by_address(block.clone());

    match leftover {
        Some(fragment) => {
            debug!(
                owner,
                start = block.start(),
                end = block.end(),
                candidate_size,
                fragment = %fragment,
                %policy,
                "allocated and split block"
            );
            policy.reinsert(free, fragment);
        }
        None => {
            debug!(owner, start = block.start(), end = block.end(), %policy, "allocated whole block");
        }
    }

    Ok(block)
}

/// Release the block held by `owner` back to the free list
pub fn deallocate(
    allocated: &mut BlockList,
    free: &mut BlockList,
    owner: Pid,
    policy: FitPolicy,
) -> MemoryResult<Block> {
    let block = allocated.remove_by_owner(owner).map_err(|err| {
        warn!(owner, "can't locate memory used by owner");
        err
    })?;

    let released = block.release();
    debug!(
        owner,
        start = released.start(),
        end = released.end(),
        %policy,
        "deallocated block"
    );
    policy.reinsert(free, released.clone());
    Ok(released)
}
