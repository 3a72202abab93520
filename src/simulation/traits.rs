/*!
 * Simulation Traits
 * Output abstraction for rendered steps
 */

use super::driver::{RunSummary, StepReport};
use crate::memory::BlockList;
use std::io;

/// Everything a sink needs to render one step
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub report: &'a StepReport,
    pub free: &'a BlockList,
    pub allocated: &'a BlockList,
}

/// Destination for the list contents after every directive
pub trait RenderSink {
    /// Render the state after one directive
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()>;

    /// Called once after the last directive
    fn finish(&mut self, _summary: &RunSummary) -> io::Result<()> {
        Ok(())
    }
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        (**self).render(frame)
    }

    fn finish(&mut self, summary: &RunSummary) -> io::Result<()> {
        (**self).finish(summary)
    }
}
