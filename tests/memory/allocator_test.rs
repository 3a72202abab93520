/*!
 * Allocator Tests
 * Placement, splitting and release under each fit policy
 */

use mmu_simulator::memory::{allocate, coalesce, deallocate};
use mmu_simulator::{Block, BlockList, FitPolicy, MemoryError, Partition};
use pretty_assertions::assert_eq;

fn free_list(ranges: &[(usize, usize)]) -> BlockList {
    ranges
        .iter()
        .map(|&(start, end)| Block::free(start, end).unwrap())
        .collect()
}

fn ranges(list: &BlockList) -> Vec<(usize, usize)> {
    list.iter().map(|b| (b.start(), b.end())).collect()
}

#[test]
fn test_first_fit_scenario() {
    let mut partition = Partition::new(10, FitPolicy::FirstFit).unwrap();

    let block = partition.allocate(1, 4).unwrap();
    assert_eq!(block, Block::new(0, 3, 1).unwrap());
    assert_eq!(ranges(partition.free_list()), vec![(4, 9)]);
    assert_eq!(
        partition.allocated_list().iter().cloned().collect::<Vec<_>>(),
        vec![Block::new(0, 3, 1).unwrap()]
    );

    let free_before = partition.free_list().clone();
    let allocated_before = partition.allocated_list().clone();

    let result = partition.allocate(2, 10);
    assert_eq!(
        result,
        Err(MemoryError::OutOfMemory {
            requested: 10,
            largest_free: 6,
            total_free: 6,
        })
    );
    assert_eq!(partition.free_list(), &free_before);
    assert_eq!(partition.allocated_list(), &allocated_before);
}

#[test]
fn test_best_fit_and_worst_fit_choose_differently() {
    let layout = [(0, 4), (10, 16)];

    let mut free = free_list(&layout);
    let mut allocated = BlockList::new();
    let block = allocate(&mut free, &mut allocated, 1, 4, FitPolicy::BestFit).unwrap();
    assert_eq!((block.start(), block.end()), (0, 3));

    let mut free = free_list(&layout);
    let mut allocated = BlockList::new();
    let block = allocate(&mut free, &mut allocated, 1, 4, FitPolicy::WorstFit).unwrap();
    assert_eq!((block.start(), block.end()), (10, 13));

    let mut free = free_list(&layout);
    let mut allocated = BlockList::new();
    let block = allocate(&mut free, &mut allocated, 1, 4, FitPolicy::FirstFit).unwrap();
    assert_eq!((block.start(), block.end()), (0, 3));
}

#[test]
fn test_exact_fit_removes_free_block() {
    let mut free = free_list(&[(0, 4), (10, 16)]);
    let mut allocated = BlockList::new();

    allocate(&mut free, &mut allocated, 3, 7, FitPolicy::BestFit).unwrap();
    assert_eq!(ranges(&free), vec![(0, 4)]);
    assert_eq!(ranges(&allocated), vec![(10, 16)]);
}

#[test]
fn test_worst_fit_fragment_placed_by_descending_size() {
    // sizes 20, 8, 3
    let mut free = free_list(&[(0, 19), (30, 37), (50, 52)]);
    let mut allocated = BlockList::new();

    // leaves a fragment of size 5 at [15, 19]
    allocate(&mut free, &mut allocated, 1, 15, FitPolicy::WorstFit).unwrap();
    assert_eq!(ranges(&free), vec![(30, 37), (15, 19), (50, 52)]);
}

#[test]
fn test_best_fit_fragment_placed_by_ascending_size() {
    // sizes 3, 10, 20
    let mut free = free_list(&[(50, 52), (30, 39), (0, 19)]);
    let mut allocated = BlockList::new();

    // best fit is [30, 39]; fragment [34, 39] has size 6
    allocate(&mut free, &mut allocated, 1, 4, FitPolicy::BestFit).unwrap();
    assert_eq!(ranges(&free), vec![(50, 52), (34, 39), (0, 19)]);
}

#[test]
fn test_allocated_list_stays_address_ordered() {
    for policy in FitPolicy::ALL {
        let mut partition = Partition::new(100, policy).unwrap();
        partition.allocate(1, 10).unwrap();
        partition.allocate(2, 20).unwrap();
        partition.allocate(3, 5).unwrap();
        partition.deallocate(2).unwrap();
        partition.allocate(4, 15).unwrap();

        let starts: Vec<_> = partition.allocated_list().iter().map(Block::start).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted, "{policy}");
        assert_eq!(partition.verify(), Ok(()), "{policy}");
    }
}

#[test]
fn test_owner_holds_one_block_at_a_time() {
    let mut partition = Partition::new(50, FitPolicy::FirstFit).unwrap();
    partition.allocate(7, 10).unwrap();

    assert_eq!(
        partition.allocate(7, 5),
        Err(MemoryError::OwnerAlreadyAllocated {
            owner: 7,
            start: 0,
            end: 9
        })
    );
    assert_eq!(partition.allocated_list().len(), 1);

    partition.deallocate(7).unwrap();
    assert!(partition.allocate(7, 5).is_ok());
}

#[test]
fn test_deallocate_unknown_owner() {
    let mut partition = Partition::new(50, FitPolicy::WorstFit).unwrap();
    partition.allocate(1, 10).unwrap();
    let free_before = partition.free_list().clone();

    assert_eq!(
        partition.deallocate(2),
        Err(MemoryError::NotFound { owner: 2 })
    );
    assert_eq!(partition.free_list(), &free_before);
    assert_eq!(partition.allocated_list().len(), 1);
}

#[test]
fn test_deallocate_round_trip_restores_coalesced_free_list() {
    for policy in FitPolicy::ALL {
        let mut partition = Partition::new(64, policy).unwrap();
        partition.allocate(1, 10).unwrap();
        partition.allocate(2, 6).unwrap();
        partition.allocate(3, 12).unwrap();
        partition.deallocate(2).unwrap();

        let before = coalesce(partition.free_list().clone());
        partition.allocate(9, 5).unwrap();
        partition.deallocate(9).unwrap();
        let after = coalesce(partition.free_list().clone());

        assert_eq!(after, before, "{policy}");
    }
}

#[test]
fn test_deallocate_first_fit_appends() {
    let mut free = free_list(&[(10, 19)]);
    let mut allocated: BlockList = [Block::new(0, 9, 5).unwrap()].into_iter().collect();

    deallocate(&mut allocated, &mut free, 5, FitPolicy::FirstFit).unwrap();
    assert_eq!(ranges(&free), vec![(10, 19), (0, 9)]);
}
