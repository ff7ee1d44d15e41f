// Copyright (c) The ktreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renders a [`KtReport`] as console output.
//!
//! The output consists of banner-delimited sections, in this order:
//!
//! 1. `= ktreport`: one line per spec, with a `.` or `F` per test.
//! 2. `= failures`: details for each failed test. Only present if a test failed.
//! 3. `= short test summary info`: a single PASSED/FAILED line.

mod failures;
mod groups;
mod helpers;
mod summary;

pub use failures::{DEFAULT_STACK_LIMIT, TraceLine, is_stack_frame, truncate_stack_trace};
pub use groups::{GroupOrder, GroupSummaries, GroupSummary, Outcome};
pub use helpers::{BANNER_WIDTH, Styles};

use crate::{report::KtReport, write_str::WriteStr};
use helpers::DisplayBanner;
use std::io;

/// Builder for [`ReportDisplayer`].
#[derive(Clone, Debug)]
pub struct ReportDisplayerBuilder {
    /// Whether to emit ANSI colors.
    pub should_colorize: bool,
    /// The number of consecutive stack frames to show per run of frames.
    pub stack_limit: usize,
    /// How to order spec lines.
    pub group_order: GroupOrder,
}

impl Default for ReportDisplayerBuilder {
    fn default() -> Self {
        Self {
            should_colorize: false,
            stack_limit: DEFAULT_STACK_LIMIT,
            group_order: GroupOrder::default(),
        }
    }
}

impl ReportDisplayerBuilder {
    /// Builds the displayer.
    pub fn build(self) -> ReportDisplayer {
        let mut styles = Styles::default();
        if self.should_colorize {
            styles.colorize();
        }

        ReportDisplayer {
            styles,
            stack_limit: self.stack_limit,
            group_order: self.group_order,
        }
    }
}

/// Writes human-readable reports.
#[derive(Clone, Debug)]
pub struct ReportDisplayer {
    styles: Styles,
    stack_limit: usize,
    group_order: GroupOrder,
}

impl ReportDisplayer {
    /// Writes every section of `report`.
    ///
    /// `report` is expected to already be sorted by unique ID. The writer is flushed after each
    /// section.
    pub fn write_report(&self, report: &KtReport, writer: &mut dyn WriteStr) -> io::Result<()> {
        writeln!(writer, "{}\n", DisplayBanner(Some("ktreport")))?;
        self.write_groups(report, writer)?;
        writer.write_str_flush()?;

        if report.failed_results().next().is_some() {
            writeln!(writer, "\n{}", DisplayBanner(Some("failures")))?;
            let count = failures::write_failures(
                report.failed_results(),
                self.stack_limit,
                &self.styles,
                writer,
            )?;
            tracing::debug!("wrote {count} failure blocks");
            writer.write_str_flush()?;
        }

        writeln!(writer, "\n{}", DisplayBanner(Some("short test summary info")))?;
        summary::write_summary(report, &self.styles, writer)?;
        writeln!(writer, "{}", DisplayBanner(None))?;
        writer.write_str_flush()
    }

    fn write_groups(&self, report: &KtReport, writer: &mut dyn WriteStr) -> io::Result<()> {
        let summaries = GroupSummaries::from_results(&report.test_results);
        let lines = summaries.display_order(&report.test_results, self.group_order);
        tracing::debug!(
            "{} specs, {} lines ({:?} order)",
            summaries.len(),
            lines.len(),
            self.group_order,
        );

        for summary in lines {
            summary.write_line(&self.styles, writer)?;
        }
        Ok(())
    }
}
