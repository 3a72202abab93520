/*!
 * Memory Module
 *
 * Single-partition memory management with pluggable placement.
 *
 * ## Structure
 *
 * - **Blocks**: inclusive address ranges tagged with an owner PID (0 = free)
 * - **Block lists**: one free list and one allocated list per partition
 * - **Policies**: first-fit, best-fit and worst-fit candidate selection, each
 *   with its own free-list ordering for returned blocks
 * - **Splitting**: a larger free block is carved from the front; the leftover
 *   fragment goes back to the free list
 * - **Coalescing**: rebuilds the free list in address order and merges
 *   adjacent free blocks
 */

pub mod allocator;
pub mod block_list;
pub mod coalesce;
pub mod layout;
pub mod partition;
pub mod policy;
pub mod stats;
pub mod types;

// Re-export for convenience
pub use allocator::{allocate, deallocate};
pub use block_list::BlockList;
pub use coalesce::{coalesce, coalesce_with_report, Coalesced};
pub use layout::{verify_layout, LayoutViolation};
pub use partition::Partition;
pub use policy::{FitPolicy, PolicyParseError};
pub use stats::MemoryStats;
pub use types::{Block, MemoryError, MemoryResult};
