/*!
 * MMU Simulator Library
 * Single-partition memory allocation simulator exposed as a library
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod simulation;

// Re-exports
pub use memory::{
    Block, BlockList, FitPolicy, LayoutViolation, MemoryError, MemoryResult, MemoryStats,
    Partition,
};
pub use monitoring::init_tracing;
pub use simulation::{
    Directive, JsonRenderer, RenderSink, RunSummary, Simulation, SimulationState, StepOutcome,
    StepReport, TextRenderer, Workload, WorkloadError,
};
