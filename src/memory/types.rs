/*!
 * Memory Types
 * Address-range blocks and the errors raised while managing them
 */

use crate::core::types::{Address, Pid, Size, FREE_OWNER};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// Every variant is recoverable: the request that raised it is reported as
/// failed and the partition is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "error_type", content = "details")]
pub enum MemoryError {
    #[error("Out of memory: requested {requested} units, largest free block {largest_free} ({total_free} free in total)")]
    OutOfMemory {
        requested: Size,
        largest_free: Size,
        total_free: Size,
    },

    #[error("No memory allocated to PID {owner}")]
    NotFound { owner: Pid },

    #[error("PID {owner} already holds [{start}, {end}]")]
    OwnerAlreadyAllocated {
        owner: Pid,
        start: Address,
        end: Address,
    },

    #[error("PID 0 is reserved for free blocks")]
    InvalidOwner,

    #[error("Invalid size: {0} (must be at least 1)")]
    InvalidSize(Size),

    #[error("Invalid block range: start {start} is past end {end}")]
    InvalidRange { start: Address, end: Address },
}

/// A contiguous, inclusive address range `[start, end]` tagged with its owner
///
/// A block can never be empty: the constructor rejects `end < start`, so
/// `size()` is always at least 1. Blocks are not `Copy`; moving
/// one between lists transfers it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Block {
    start: Address,
    end: Address,
    owner: Pid,
}

impl Block {
    pub fn new(start: Address, end: Address, owner: Pid) -> MemoryResult<Self> {
        if end < start {
            return Err(MemoryError::InvalidRange { start, end });
        }
        Ok(Self { start, end, owner })
    }

    /// Create an unowned block
    pub fn free(start: Address, end: Address) -> MemoryResult<Self> {
        Self::new(start, end, FREE_OWNER)
    }

    /// Create a block of `size` units beginning at `start`
    pub fn with_size(start: Address, size: Size, owner: Pid) -> MemoryResult<Self> {
        if size == 0 {
            return Err(MemoryError::InvalidSize(size));
        }
        let end = start
            .checked_add(size - 1)
            .ok_or(MemoryError::InvalidSize(size))?;
        Self::new(start, end, owner)
    }

    #[inline]
    pub fn start(&self) -> Address {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Address {
        self.end
    }

    #[inline]
    pub fn owner(&self) -> Pid {
        self.owner
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.end - self.start + 1
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.owner == FREE_OWNER
    }

    /// Whether `next` starts right after this block and both are free
    pub fn is_adjacent_to(&self, next: &Block) -> bool {
        self.is_free() && next.is_free() && self.end.checked_add(1) == Some(next.start)
    }

    /// Whether the two ranges share at least one address
    pub fn overlaps(&self, other: &Block) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Carve `[start, start + size - 1]` off the front for `owner`
    ///
    /// The remainder, if any, comes back as a new free block. Callers must
    /// pass `1 <= size <= self.size()`.
    pub fn split(self, size: Size, owner: Pid) -> (Block, Option<Block>) {
        debug_assert!(size >= 1 && size <= self.size(), "split of {size} from {self}");

        let carved_end = self.start + size - 1;
        let carved = Block {
            start: self.start,
            end: carved_end,
            owner,
        };
        let remainder = (carved_end < self.end).then(|| Block {
            start: carved_end + 1,
            end: self.end,
            owner: FREE_OWNER,
        });
        (carved, remainder)
    }

    /// Same range, owner reset to free
    pub fn release(self) -> Block {
        Block {
            owner: FREE_OWNER,
            ..self
        }
    }

    /// Extend this block over an adjacent free successor
    pub fn absorb(&mut self, next: Block) {
        debug_assert!(self.is_adjacent_to(&next), "{self} cannot absorb {next}");
        self.end = next.end;
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_free() {
            write!(f, "[{}, {}]", self.start, self.end)
        } else {
            write!(f, "[{}, {}] pid {}", self.start, self.end, self.owner)
        }
    }
}
