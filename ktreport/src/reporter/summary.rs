// Copyright (c) The ktreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::helpers::{DisplaySecs, Styles};
use crate::{report::KtReport, write_str::WriteStr};
use owo_colors::OwoColorize;
use std::io;

/// Writes the final `PASSED 42 passed in 1.234s` line.
///
/// Only the report's top-level counters are used. Per-result data is not consulted.
pub(super) fn write_summary(
    report: &KtReport,
    styles: &Styles,
    writer: &mut dyn WriteStr,
) -> io::Result<()> {
    if report.failed > 0 {
        write!(writer, "{} ", "FAILED".style(styles.fail))?;
    } else {
        write!(writer, "{} ", "PASSED".style(styles.pass))?;
    }

    write!(writer, "{} passed", report.passed_count())?;
    if report.failed > 0 {
        write!(writer, ", {} failed", report.failed)?;
    }

    writeln!(writer, " in {}", DisplaySecs(report.total_duration_secs()))
}
