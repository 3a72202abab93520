/*!
 * Simulation Driver Tests
 */

use mmu_simulator::simulation::Discard;
use mmu_simulator::{
    Block, Directive, FitPolicy, MemoryError, Simulation, SimulationState, StepOutcome,
};
use pretty_assertions::assert_eq;

#[test]
fn test_new_simulation_is_running() {
    let simulation = Simulation::new(10, FitPolicy::FirstFit).unwrap();
    assert_eq!(simulation.state(), SimulationState::Running);
    assert_eq!(simulation.partition().free_list().len(), 1);
    assert!(simulation.partition().allocated_list().is_empty());
}

#[test]
fn test_zero_partition_rejected() {
    assert_eq!(
        Simulation::new(0, FitPolicy::BestFit).unwrap_err(),
        MemoryError::InvalidSize(0)
    );
}

#[test]
fn test_step_reports() {
    let mut simulation = Simulation::new(10, FitPolicy::FirstFit).unwrap();

    let report = simulation.step(Directive::Allocate { owner: 1, size: 4 });
    assert_eq!(report.step, 0);
    assert_eq!(
        report.outcome,
        StepOutcome::Allocated {
            block: Block::new(0, 3, 1).unwrap()
        }
    );

    let report = simulation.step(Directive::Allocate { owner: 2, size: 10 });
    assert_eq!(report.step, 1);
    assert!(report.outcome.is_failure());

    let report = simulation.step(Directive::Deallocate { owner: 1 });
    assert_eq!(
        report.outcome,
        StepOutcome::Deallocated {
            block: Block::free(0, 3).unwrap()
        }
    );

    let report = simulation.step(Directive::Coalesce);
    assert_eq!(report.outcome, StepOutcome::Coalesced { merged: 1 });
    assert_eq!(simulation.partition().free_list().len(), 1);
}

#[test]
fn test_failures_do_not_stop_the_run() {
    let mut simulation = Simulation::new(16, FitPolicy::WorstFit).unwrap();
    let directives = [
        Directive::Deallocate { owner: 5 },
        Directive::Allocate { owner: 1, size: 32 },
        Directive::Allocate { owner: 1, size: 8 },
        Directive::Allocate { owner: 1, size: 2 },
        Directive::Allocate { owner: 2, size: 8 },
    ];

    let summary = simulation.run(&directives, &mut Discard).unwrap();

    assert_eq!(summary.policy, FitPolicy::WorstFit);
    assert_eq!(summary.steps, 5);
    assert_eq!(summary.failures, 3);
    assert_eq!(summary.stats.used_memory, 16);
    assert_eq!(summary.stats.free_memory, 0);
    assert_eq!(summary.stats.allocated_blocks, 2);
}

#[test]
fn test_finish_tears_down() {
    let mut simulation = Simulation::new(20, FitPolicy::BestFit).unwrap();
    simulation.step(Directive::Allocate { owner: 1, size: 5 });

    let summary = simulation.finish();
    assert_eq!(summary.steps, 1);
    assert_eq!(summary.failures, 0);
    assert_eq!(summary.stats.total_memory, 20);
    assert_eq!(summary.stats.used_memory, 5);

    assert_eq!(simulation.state(), SimulationState::Finished);
    assert!(simulation.partition().free_list().is_empty());
    assert!(simulation.partition().allocated_list().is_empty());
}

#[test]
#[should_panic(expected = "finished simulation")]
fn test_step_after_finish_panics() {
    let mut simulation = Simulation::new(20, FitPolicy::FirstFit).unwrap();
    simulation.finish();
    simulation.step(Directive::Coalesce);
}

#[test]
fn test_run_matches_manual_steps() {
    let directives = [
        Directive::Allocate { owner: 1, size: 6 },
        Directive::Allocate { owner: 2, size: 3 },
        Directive::Deallocate { owner: 1 },
        Directive::Allocate { owner: 3, size: 2 },
        Directive::Coalesce,
    ];

    for policy in FitPolicy::ALL {
        let mut stepped = Simulation::new(12, policy).unwrap();
        let outcomes: Vec<_> = directives
            .iter()
            .map(|&directive| stepped.step(directive).outcome)
            .collect();
        let expected_stats = stepped.partition().stats();

        let mut ran = Simulation::new(12, policy).unwrap();
        let summary = ran.run(&directives, &mut Discard).unwrap();

        assert!(outcomes.iter().all(|outcome| !outcome.is_failure()));
        assert_eq!(summary.stats, expected_stats, "{policy}");
    }
}
