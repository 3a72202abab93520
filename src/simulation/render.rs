/*!
 * Renderers
 * Text and JSON-lines sinks for simulation steps
 */

use super::driver::{RunSummary, StepOutcome, StepReport};
use super::traits::{Frame, RenderSink};
use crate::core::limits::STEP_BANNER;
use crate::core::types::{Address, Pid};
use crate::memory::{BlockList, MemoryError};
use serde::Serialize;
use std::io::{self, Write};

/// One block as seen by the output: `(index, start, end[, owner])`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockView {
    pub index: usize,
    pub start: Address,
    pub end: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Pid>,
}

impl BlockView {
    /// Views of every block in list order; owner omitted for free blocks
    pub fn of_list(list: &BlockList) -> Vec<BlockView> {
        list.iter()
            .enumerate()
            .map(|(index, block)| BlockView {
                index,
                start: block.start(),
                end: block.end(),
                owner: (!block.is_free()).then(|| block.owner()),
            })
            .collect()
    }
}

/// Classic console layout
pub struct TextRenderer<W: Write> {
    writer: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_list(&mut self, title: &str, list: &BlockList) -> io::Result<()> {
        writeln!(self.writer, "{title}:")?;
        for view in BlockView::of_list(list) {
            write!(
                self.writer,
                "Block {}:\t START: {}\t END: {}",
                view.index, view.start, view.end
            )?;
            match view.owner {
                Some(owner) => writeln!(self.writer, "\t PID: {owner}")?,
                None => writeln!(self.writer)?,
            }
        }
        Ok(())
    }
}

/// Console line for a failed directive
pub fn failure_message(error: &MemoryError) -> String {
    match error {
        MemoryError::OutOfMemory { .. } => "Error: Not Enough Memory".to_string(),
        MemoryError::NotFound { owner } => {
            format!("Error: Can't locate Memory Used by PID: {owner}")
        }
        other => format!("Error: {other}"),
    }
}

impl<W: Write> RenderSink for TextRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        writeln!(self.writer, "{STEP_BANNER}")?;
        writeln!(self.writer, "{}", frame.report.directive)?;
        if let StepOutcome::Failed { error } = &frame.report.outcome {
            writeln!(self.writer, "{}", failure_message(error))?;
        }
        writeln!(self.writer, "{STEP_BANNER}")?;

        self.write_list("Free Memory", frame.free)?;
        self.write_list("\nAllocated Memory", frame.allocated)?;
        write!(self.writer, "\n\n")?;
        self.writer.flush()
    }
}

#[derive(Serialize)]
struct JsonFrame<'a> {
    #[serde(flatten)]
    report: &'a StepReport,
    free: Vec<BlockView>,
    allocated: Vec<BlockView>,
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    summary: &'a RunSummary,
}

/// One JSON object per line: each step, then the run summary
pub struct JsonRenderer<W: Write> {
    writer: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, value)?;
        writeln!(self.writer)
    }
}

impl<W: Write> RenderSink for JsonRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        self.write_line(&JsonFrame {
            report: frame.report,
            free: BlockView::of_list(frame.free),
            allocated: BlockView::of_list(frame.allocated),
        })
    }

    fn finish(&mut self, summary: &RunSummary) -> io::Result<()> {
        self.write_line(&JsonSummary { summary })?;
        self.writer.flush()
    }
}

/// Sink that drops every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl RenderSink for Discard {
    fn render(&mut self, _frame: &Frame<'_>) -> io::Result<()> {
        Ok(())
    }
}
