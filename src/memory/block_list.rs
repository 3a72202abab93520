/*!
 * Block List
 * Ordered block container with policy-aware insertion
 */

use super::types::{Block, MemoryError, MemoryResult};
use crate::core::types::{Pid, Size};
use std::collections::vec_deque;
use std::collections::VecDeque;

/// Ordered collection of blocks
///
/// The list itself does not impose an order. Callers pick an insertion
/// variant and the resulting order is whatever those inserts produce. The
/// sorted variants scan from the front and insert before the first block
/// that breaks the order, so they stay well defined on lists that are not
/// currently sorted by that key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockList {
    blocks: VecDeque<Block>,
}

impl BlockList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            blocks: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push_front(&mut self, block: Block) {
        debug_assert!(block.size() >= 1);
        self.blocks.push_front(block);
    }

    pub fn push_back(&mut self, block: Block) {
        debug_assert!(block.size() >= 1);
        self.blocks.push_back(block);
    }

    /// Insert before the first block with a greater start address
    pub fn insert_ascending_by_address(&mut self, block: Block) {
        debug_assert!(block.size() >= 1);
        let index = self.position_or_end(|existing| existing.start() > block.start());
        self.blocks.insert(index, block);
    }

    /// Insert before the first strictly larger block (equal sizes keep insertion order)
    pub fn insert_ascending_by_size(&mut self, block: Block) {
        debug_assert!(block.size() >= 1);
        let index = self.position_or_end(|existing| existing.size() > block.size());
        self.blocks.insert(index, block);
    }

    /// Insert before the first strictly smaller block (equal sizes keep insertion order)
    pub fn insert_descending_by_size(&mut self, block: Block) {
        debug_assert!(block.size() >= 1);
        let index = self.position_or_end(|existing| existing.size() < block.size());
        self.blocks.insert(index, block);
    }

    pub fn remove_front(&mut self) -> Option<Block> {
        self.blocks.pop_front()
    }

    /// Detach the block at `index`, keeping the order of the rest
    pub fn remove_at(&mut self, index: usize) -> Option<Block> {
        self.blocks.remove(index)
    }

    /// Detach the block held by `owner`
    pub fn remove_by_owner(&mut self, owner: Pid) -> MemoryResult<Block> {
        self.blocks
            .iter()
            .position(|block| block.owner() == owner)
            .and_then(|index| self.blocks.remove(index))
            .ok_or(MemoryError::NotFound { owner })
    }

    pub fn find_by_owner(&self, owner: Pid) -> Option<&Block> {
        self.blocks.iter().find(|block| block.owner() == owner)
    }

    pub fn contains_owner(&self, owner: Pid) -> bool {
        self.find_by_owner(owner).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn back_mut(&mut self) -> Option<&mut Block> {
        self.blocks.back_mut()
    }

    /// Iterate in current list order
    pub fn iter(&self) -> vec_deque::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Sum of all block sizes
    pub fn total_size(&self) -> Size {
        self.blocks.iter().map(Block::size).sum()
    }

    /// Size of the largest block, 0 for an empty list
    pub fn largest_block_size(&self) -> Size {
        self.blocks.iter().map(Block::size).max().unwrap_or(0)
    }

    /// Drop every block
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    fn position_or_end(&self, breaks_order: impl Fn(&Block) -> bool) -> usize {
        self.blocks
            .iter()
            .position(breaks_order)
            .unwrap_or(self.blocks.len())
    }
}

impl FromIterator<Block> for BlockList {
    fn from_iter<T: IntoIterator<Item = Block>>(iter: T) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for BlockList {
    type Item = Block;
    type IntoIter = vec_deque::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<'a> IntoIterator for &'a BlockList {
    type Item = &'a Block;
    type IntoIter = vec_deque::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
