/*!
 * Simulation Module
 * Workload input, the step-by-step driver and its output sinks
 */

pub mod directive;
pub mod driver;
pub mod render;
pub mod traits;
pub mod workload;

// Re-export for convenience
pub use directive::{Directive, DirectiveError};
pub use driver::{RunSummary, Simulation, SimulationState, StepOutcome, StepReport};
pub use render::{failure_message, BlockView, Discard, JsonRenderer, TextRenderer};
pub use traits::{Frame, RenderSink};
pub use workload::{Workload, WorkloadError};
