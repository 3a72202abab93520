/*!
 * Partition
 * A single fixed-size address range with its free and allocated lists
 */

use super::allocator;
use super::block_list::BlockList;
use super::coalesce::coalesce_with_report;
use super::layout::{verify_layout, LayoutViolation};
use super::policy::FitPolicy;
use super::stats::MemoryStats;
use super::types::{Block, MemoryError, MemoryResult};
use crate::core::types::{Pid, Size};
use std::mem;
use tracing::info;

/// Owns the free list and the allocated list of one partition
///
/// Every mutation goes through [`allocator`] or the coalescer with this
/// partition's policy, so the two lists always tile `[0, size - 1]`.
#[derive(Debug, Clone)]
pub struct Partition {
    size: Size,
    policy: FitPolicy,
    free: BlockList,
    allocated: BlockList,
}

impl Partition {
    /// Create a partition with one free block spanning all of it
    pub fn new(size: Size, policy: FitPolicy) -> MemoryResult<Self> {
        if size == 0 {
            return Err(MemoryError::InvalidSize(size));
        }

        let mut free = BlockList::new();
        free.push_front(Block::free(0, size - 1)?);
        info!(size, %policy, "Partition initialized");

        Ok(Self {
            size,
            policy,
            free,
            allocated: BlockList::new(),
        })
    }

    pub fn allocate(&mut self, owner: Pid, size: Size) -> MemoryResult<Block> {
        allocator::allocate(&mut self.free, &mut self.allocated, owner, size, self.policy)
    }

    pub fn deallocate(&mut self, owner: Pid) -> MemoryResult<Block> {
        allocator::deallocate(&mut self.allocated, &mut self.free, owner, self.policy)
    }

    /// Replace the free list with its coalesced, address-ordered form
    ///
    /// Returns the number of merges performed.
    pub fn coalesce(&mut self) -> usize {
        let report = coalesce_with_report(mem::take(&mut self.free));
        self.free = report.list;
        report.merged
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn policy(&self) -> FitPolicy {
        self.policy
    }

    pub fn free_list(&self) -> &BlockList {
        &self.free
    }

    pub fn allocated_list(&self) -> &BlockList {
        &self.allocated
    }

    pub fn stats(&self) -> MemoryStats {
        MemoryStats::collect(self.size, &self.free, &self.allocated)
    }

    pub fn verify(&self) -> Result<(), LayoutViolation> {
        verify_layout(self.size, &self.free, &self.allocated)
    }

    /// Drop every block in both lists
    pub fn teardown(&mut self) {
        self.free.clear();
        self.allocated.clear();
    }
}
