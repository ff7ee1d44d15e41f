// Copyright (c) The ktreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Detailed output for failed tests.

use super::helpers::{DisplaySecs, Styles};
use crate::{report::KtTestResult, write_str::WriteStr};
use owo_colors::OwoColorize;
use std::io;

/// The default number of consecutive stack frames shown before the rest are omitted.
pub const DEFAULT_STACK_LIMIT: usize = 7;

/// A line of a truncated stack trace.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLine<'a> {
    /// A line shown verbatim.
    Shown(&'a str),
    /// A count of stack frames that were dropped.
    Omitted(usize),
}

/// Returns true if `line` is a stack frame (`at com.example.Foo.bar(Foo.kt:12)`).
pub fn is_stack_frame(line: &str) -> bool {
    line.trim_start().starts_with("at ")
}

/// Truncates a printed throwable.
///
/// Each run of consecutive stack frames shows at most `limit` frames, followed by a single
/// [`TraceLine::Omitted`] for the rest of the run. Any other line ends the run.
pub fn truncate_stack_trace(throwable: &str, limit: usize) -> Vec<TraceLine<'_>> {
    let mut lines = Vec::new();
    let mut shown = 0;
    let mut omitted = 0;

    for line in throwable.trim().split('\n') {
        if !is_stack_frame(line) {
            if omitted > 0 {
                lines.push(TraceLine::Omitted(omitted));
            }
            lines.push(TraceLine::Shown(line));
            shown = 0;
            omitted = 0;
        } else if shown < limit {
            lines.push(TraceLine::Shown(line));
            shown += 1;
        } else {
            omitted += 1;
        }
    }

    if omitted > 0 {
        lines.push(TraceLine::Omitted(omitted));
    }
    lines
}

/// Writes one block per failed result, separated by `***`.
///
/// Returns the number of blocks written.
pub(super) fn write_failures<'a>(
    failures: impl IntoIterator<Item = &'a KtTestResult>,
    stack_limit: usize,
    styles: &Styles,
    writer: &mut dyn WriteStr,
) -> io::Result<usize> {
    let mut count = 0;
    for result in failures {
        if count > 0 {
            write!(writer, "\n***\n")?;
        }
        write_failure(result, stack_limit, styles, writer)?;
        count += 1;
    }
    Ok(count)
}

fn write_failure(
    result: &KtTestResult,
    stack_limit: usize,
    styles: &Styles,
    writer: &mut dyn WriteStr,
) -> io::Result<()> {
    writeln!(
        writer,
        "\n{} ({})\n",
        result.unique_id.style(styles.header),
        DisplaySecs(result.duration_secs()),
    )?;

    if let Some(throwable) = result.throwable() {
        for line in truncate_stack_trace(throwable, stack_limit) {
            match line {
                TraceLine::Shown(line) => writeln!(writer, "{line}")?,
                TraceLine::Omitted(count) => writeln!(writer, "... ({count} lines omitted)")?,
            }
        }
    }

    write_captured("STDOUT", result.stdout(), writer)?;
    write_captured("STDERR", result.stderr(), writer)?;

    Ok(())
}

fn write_captured(header: &str, output: Option<&str>, writer: &mut dyn WriteStr) -> io::Result<()> {
    let Some(output) = output.map(|s| s.trim_end_matches(['\r', '\n'])) else {
        return Ok(());
    };
    if output.is_empty() {
        return Ok(());
    }
    writeln!(writer, "\n{header}:\n{output}")
}
