/*!
 * Simulation Driver
 * Replays directives against a partition and renders every step
 */

use super::directive::Directive;
use super::traits::{Frame, RenderSink};
use crate::core::types::Size;
use crate::memory::{Block, FitPolicy, MemoryError, MemoryResult, MemoryStats, Partition};
use serde::Serialize;
use std::io;
use tracing::{debug, debug_span, info, instrument};

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationState {
    /// Building the whole-partition free block
    Initializing,
    /// Accepting directives
    Running,
    /// Lists torn down; no further directives
    Finished,
}

/// What a single directive did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Allocated { block: Block },
    Deallocated { block: Block },
    Coalesced { merged: usize },
    Failed { error: MemoryError },
}

impl StepOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }
}

/// Record of one applied directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Zero-based position in the directive sequence
    pub step: usize,
    pub directive: Directive,
    pub outcome: StepOutcome,
}

/// Totals for a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub policy: FitPolicy,
    pub steps: usize,
    pub failures: usize,
    /// Statistics taken just before teardown
    pub stats: MemoryStats,
}

/// Discrete-event driver owning one partition
#[derive(Debug)]
pub struct Simulation {
    partition: Partition,
    state: SimulationState,
    steps: usize,
    failures: usize,
    verify: bool,
}

impl Simulation {
    /// Initialize a partition of `partition_size` units and start running
    ///
    /// Layout verification after each step is on in debug builds.
    pub fn new(partition_size: Size, policy: FitPolicy) -> MemoryResult<Self> {
        debug!(state = ?SimulationState::Initializing, partition_size, %policy);
        let partition = Partition::new(partition_size, policy)?;
        debug!(state = ?SimulationState::Running, "Simulation ready");

        Ok(Self {
            partition,
            state: SimulationState::Running,
            steps: 0,
            failures: 0,
            verify: cfg!(debug_assertions),
        })
    }

    /// Check the partition layout after every step
    ///
    /// A broken layout is an allocator defect and panics.
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify || cfg!(debug_assertions);
        self
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Apply one directive
    ///
    /// Recoverable failures are folded into the report; the partition is
    /// left as it was and the simulation keeps running.
    ///
    /// # Panics
    ///
    /// Panics when called after [`Simulation::finish`], or when verification
    /// is enabled and the layout invariants no longer hold.
    pub fn step(&mut self, directive: Directive) -> StepReport {
        assert_eq!(
            self.state,
            SimulationState::Running,
            "directive {directive} applied to a finished simulation"
        );

        let step = self.steps;
        self.steps += 1;
        let span = debug_span!("step", step, %directive);
        let _entered = span.enter();

        let result = match directive {
            Directive::Allocate { owner, size } => self
                .partition
                .allocate(owner, size)
                .map(|block| StepOutcome::Allocated { block }),
            Directive::Deallocate { owner } => self
                .partition
                .deallocate(owner)
                .map(|block| StepOutcome::Deallocated { block }),
            Directive::Coalesce => Ok(StepOutcome::Coalesced {
                merged: self.partition.coalesce(),
            }),
        };
        let outcome = result.unwrap_or_else(|error| {
            self.failures += 1;
            StepOutcome::Failed { error }
        });

        if self.verify {
            if let Err(violation) = self.partition.verify() {
                panic!("partition layout broken after {directive}: {violation}");
            }
        }

        StepReport {
            step,
            directive,
            outcome,
        }
    }

    /// Apply every directive in order, rendering both lists after each,
    /// then finish the run
    #[instrument(
        skip_all,
        fields(
            policy = %self.partition.policy(),
            partition_size = self.partition.size(),
            directives = directives.len()
        )
    )]
    pub fn run<S: RenderSink + ?Sized>(
        &mut self,
        directives: &[Directive],
        sink: &mut S,
    ) -> io::Result<RunSummary> {
        for &directive in directives {
            let report = self.step(directive);
            sink.render(&Frame {
                report: &report,
                free: self.partition.free_list(),
                allocated: self.partition.allocated_list(),
            })?;
        }

        let summary = self.finish();
        sink.finish(&summary)?;
        Ok(summary)
    }

    /// Tear down both lists and stop accepting directives
    pub fn finish(&mut self) -> RunSummary {
        let summary = RunSummary {
            policy: self.partition.policy(),
            steps: self.steps,
            failures: self.failures,
            stats: self.partition.stats(),
        };

        self.partition.teardown();
        self.state = SimulationState::Finished;
        info!(
            "Simulation finished: {} steps ({} failed), {} of {} units in use across {} blocks, fragmentation {:.2}",
            summary.steps,
            summary.failures,
            summary.stats.used_memory,
            summary.stats.total_memory,
            summary.stats.allocated_blocks,
            summary.stats.fragmentation
        );
        summary
    }
}
