// Copyright (c) The ktreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-spec aggregation and the grouped `MySpec ..F. (0.123s)` view.
//!
//! Aggregation ([`GroupSummaries::from_results`]) is a pure fold over the sorted results. Deciding
//! which summaries to print, and in what order, is controlled by [`GroupOrder`].

use super::helpers::{DisplaySecs, Styles};
use crate::{report::KtTestResult, write_str::WriteStr};
use indexmap::IndexMap;
use owo_colors::OwoColorize;
use std::io;

/// How group lines are ordered and deduplicated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum GroupOrder {
    /// Print a group each time its spec ID starts a new run of adjacent results.
    ///
    /// A spec whose results are not contiguous after sorting by unique ID is printed once per
    /// run, each time with the aggregate over all of its results.
    #[default]
    Adjacent,

    /// Print each group exactly once, in order of first appearance.
    FirstOccurrence,
}

/// The outcome of a single test, as shown in the grouped view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The test passed (or was anything other than failed).
    Pass,
    /// The test failed.
    Fail,
}

impl Outcome {
    fn of(result: &KtTestResult) -> Self {
        if result.is_failed() {
            Outcome::Fail
        } else {
            Outcome::Pass
        }
    }

    fn glyph(self) -> char {
        match self {
            Outcome::Pass => '.',
            Outcome::Fail => 'F',
        }
    }
}

/// Aggregated results for one spec ID.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupSummary<'a> {
    spec_id: &'a str,
    outcomes: Vec<Outcome>,
    duration_secs: f64,
}

impl<'a> GroupSummary<'a> {
    fn new(spec_id: &'a str) -> Self {
        Self {
            spec_id,
            outcomes: Vec::new(),
            duration_secs: 0.0,
        }
    }

    fn add(&mut self, result: &KtTestResult) {
        self.outcomes.push(Outcome::of(result));
        self.duration_secs += result.duration_secs();
    }

    /// The spec ID this summary is for.
    pub fn spec_id(&self) -> &'a str {
        self.spec_id
    }

    /// Outcomes in the order the results were encountered.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// The number of tests in this group.
    pub fn test_count(&self) -> usize {
        self.outcomes.len()
    }

    /// The number of failed tests in this group.
    pub fn fail_count(&self) -> usize {
        self.outcomes.iter().filter(|o| **o == Outcome::Fail).count()
    }

    /// The number of passed tests in this group.
    pub fn pass_count(&self) -> usize {
        self.test_count() - self.fail_count()
    }

    /// Sum of member durations, in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub(super) fn write_line(&self, styles: &Styles, writer: &mut dyn WriteStr) -> io::Result<()> {
        write!(writer, "{} ", self.spec_id)?;
        for outcome in &self.outcomes {
            let style = match outcome {
                Outcome::Pass => styles.pass,
                Outcome::Fail => styles.fail,
            };
            write!(writer, "{}", outcome.glyph().style(style))?;
        }
        writeln!(writer, " ({})", DisplaySecs(self.duration_secs))
    }
}

/// Summaries for every spec ID in a report, keyed in order of first appearance.
#[derive(Clone, Debug, Default)]
pub struct GroupSummaries<'a> {
    groups: IndexMap<&'a str, GroupSummary<'a>>,
}

impl<'a> GroupSummaries<'a> {
    /// Folds results into per-spec summaries.
    ///
    /// Results with an empty spec ID belong to no group.
    pub fn from_results(results: impl IntoIterator<Item = &'a KtTestResult>) -> Self {
        let groups = results
            .into_iter()
            .filter(|result| !result.spec_id.is_empty())
            .fold(IndexMap::new(), |mut groups, result| {
                groups
                    .entry(result.spec_id.as_str())
                    .or_insert_with(|| GroupSummary::new(&result.spec_id))
                    .add(result);
                groups
            });
        Self { groups }
    }

    /// Returns the summary for a spec ID.
    pub fn get(&self, spec_id: &str) -> Option<&GroupSummary<'a>> {
        self.groups.get(spec_id)
    }

    /// Returns the number of distinct groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no result had a spec ID.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns summaries in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = &GroupSummary<'a>> + '_ {
        self.groups.values()
    }

    /// Returns the summaries to print, in print order.
    ///
    /// `results` must be the same sequence the summaries were built from.
    pub fn display_order<'s>(
        &'s self,
        results: &[KtTestResult],
        order: GroupOrder,
    ) -> Vec<&'s GroupSummary<'a>> {
        match order {
            GroupOrder::Adjacent => self.adjacent_runs(results),
            GroupOrder::FirstOccurrence => self.iter().collect(),
        }
    }

    /// One entry per run of results sharing a spec ID; empty spec IDs don't break a run.
    fn adjacent_runs<'s>(&'s self, results: &[KtTestResult]) -> Vec<&'s GroupSummary<'a>> {
        let mut runs = Vec::new();
        let mut current: Option<&str> = None;
        for result in results {
            let spec_id = result.spec_id.as_str();
            if spec_id.is_empty() || current == Some(spec_id) {
                continue;
            }
            if let Some(summary) = current.and_then(|id| self.get(id)) {
                runs.push(summary);
            }
            current = Some(spec_id);
        }
        if let Some(summary) = current.and_then(|id| self.get(id)) {
            runs.push(summary);
        }
        runs
    }
}
