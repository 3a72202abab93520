/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
///
/// `0` is reserved for free blocks; allocating processes are numbered from 1.
pub type Pid = u32;

/// Address type for memory operations
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;

/// Owner tag carried by every free block
pub const FREE_OWNER: Pid = 0;
