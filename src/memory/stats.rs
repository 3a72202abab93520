/*!
 * Memory Statistics
 * Usage and fragmentation figures for a partition
 */

use super::block_list::BlockList;
use crate::core::types::Size;
use serde::Serialize;

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryStats {
    pub total_memory: Size,
    pub used_memory: Size,
    pub free_memory: Size,
    pub allocated_blocks: usize,
    pub free_blocks: usize,
    pub largest_free_block: Size,
    /// External fragmentation: `1 - largest_free_block / free_memory`
    pub fragmentation: f64,
}

impl MemoryStats {
    pub fn collect(total_memory: Size, free: &BlockList, allocated: &BlockList) -> Self {
        let free_memory = free.total_size();
        let largest_free_block = free.largest_block_size();
        let fragmentation = if free_memory == 0 {
            0.0
        } else {
            1.0 - largest_free_block as f64 / free_memory as f64
        };

        Self {
            total_memory,
            used_memory: allocated.total_size(),
            free_memory,
            allocated_blocks: allocated.len(),
            free_blocks: free.len(),
            largest_free_block,
            fragmentation,
        }
    }

    pub fn usage_percentage(&self) -> f64 {
        if self.total_memory == 0 {
            return 0.0;
        }
        self.used_memory as f64 / self.total_memory as f64 * 100.0
    }
}
