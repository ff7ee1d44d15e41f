// Copyright (c) The ktreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line parsing and the top-level pipeline.

use crate::{
    errors::ExpectedError,
    output::{OutputContext, OutputOpts, OutputWriter},
    report::{DEFAULT_REPORT_PATH, KtReport},
    reporter::{DEFAULT_STACK_LIMIT, GroupOrder, ReportDisplayerBuilder},
    write_str::WriteStr,
};
use camino::Utf8Path;
use std::ffi::OsString;

/// Renders `build/test-results/ktreport.json` as a console test summary.
///
/// The report is written by the ktreport JUnit platform listener at the end of a Gradle test run.
#[derive(Debug, clap::Parser)]
#[command(
    name = "ktreport",
    version,
    args_override_self = true,
    styles = crate::output::clap_styles::style(),
    max_term_width = 100
)]
pub struct KtreportApp {
    /// Number of consecutive stack frames to show before omitting the rest
    #[arg(long, short, alias = "s", value_name = "LINES", default_value_t = DEFAULT_STACK_LIMIT)]
    stack: usize,

    /// How to order spec lines: adjacent, first-occurrence
    #[arg(
        long,
        value_enum,
        default_value_t,
        hide_possible_values = true,
        value_name = "ORDER"
    )]
    group_order: GroupOrder,

    #[clap(flatten)]
    output: OutputOpts,

    /// Arguments after the first positional one, which are ignored
    #[arg(
        hide = true,
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    ignored: Vec<OsString>,
}

impl KtreportApp {
    /// Parses arguments, also accepting the single-dash `-stack` spelling.
    pub fn parse_args(args: impl IntoIterator<Item = impl Into<OsString>>) -> Self {
        <Self as clap::Parser>::parse_from(normalize_args(args))
    }

    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app against the report in the current directory.
    ///
    /// Returns the exit code.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> i32 {
        let mut stdout = output_writer.stdout_writer();
        match self.exec_path(Utf8Path::new(DEFAULT_REPORT_PATH), output, &mut stdout) {
            Ok(()) => 0,
            Err(err) => {
                err.display(&mut stdout);
                err.process_exit_code()
            }
        }
    }

    fn exec_path(
        &self,
        path: &Utf8Path,
        output: OutputContext,
        writer: &mut dyn WriteStr,
    ) -> Result<(), ExpectedError> {
        if !self.ignored.is_empty() {
            tracing::debug!("ignoring {} extra arguments", self.ignored.len());
        }

        let mut report = KtReport::load(path)?;
        tracing::debug!(
            "decoded {} test results from {path}",
            report.test_results.len()
        );
        report.sort_by_unique_id();

        let displayer = ReportDisplayerBuilder {
            should_colorize: output.should_colorize_stdout(),
            stack_limit: self.stack,
            group_order: self.group_order,
        }
        .build();
        displayer
            .write_report(&report, writer)
            .map_err(|err| ExpectedError::WriteOutput { err })
    }
}

/// Rewrites the single-dash long flag `-stack` to `--stack`.
///
/// Other arguments are passed through unchanged.
fn normalize_args(args: impl IntoIterator<Item = impl Into<OsString>>) -> Vec<OsString> {
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str() {
            Some("-stack") => OsString::from("--stack"),
            Some(s) if s.starts_with("-stack=") => OsString::from(format!("-{s}")),
            _ => arg,
        })
        .collect()
}
