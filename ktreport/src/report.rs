// Copyright (c) The ktreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The test-execution report written by the Kotlin test listener.
//!
//! The report is read once, decoded into a [`KtReport`], and sorted by unique ID. After that it is
//! only ever read by the renderers in [`crate::reporter`].
//!
//! Aggregate counters (`totalTests`, `failed`, ...) are taken as-is from the file and are never
//! reconciled against [`KtReport::test_results`].

use crate::errors::{LoadError, LoadOrParseError, ParseError};
use camino::Utf8Path;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// The location of the report, relative to the current directory.
pub const DEFAULT_REPORT_PATH: &str = "build/test-results/ktreport.json";

/// The status string the test listener writes for a failed test.
pub const FAILED_STATUS: &str = "FAILED";

/// The root of a test report.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct KtReport {
    /// Individual test results, in file order until [`Self::sort_by_unique_id`] is called.
    #[serde(deserialize_with = "null_items_as_default")]
    pub test_results: Vec<KtTestResult>,
    /// The number of tests that ran.
    #[serde(deserialize_with = "null_as_default")]
    pub total_tests: i64,
    /// The number of tests that passed.
    #[serde(deserialize_with = "null_as_default")]
    pub passed: i64,
    /// The number of tests that failed.
    #[serde(deserialize_with = "null_as_default")]
    pub failed: i64,
    /// The number of tests that were skipped or aborted.
    #[serde(deserialize_with = "null_as_default")]
    pub skipped: i64,
    /// Epoch milliseconds at which the run started.
    #[serde(deserialize_with = "null_as_default")]
    pub start_time: i64,
    /// Epoch milliseconds at which the run ended.
    #[serde(deserialize_with = "null_as_default")]
    pub end_time: i64,
    /// Wall-clock duration of the whole run.
    #[serde(deserialize_with = "null_as_default")]
    pub total_duration_ms: i64,
}

impl KtReport {
    /// Reads and decodes the report at `path`.
    pub fn load(path: &Utf8Path) -> Result<Self, LoadOrParseError> {
        let data = std::fs::read(path).map_err(|err| LoadError::new(path, err))?;
        tracing::debug!("read {} bytes from {path}", data.len());
        Ok(Self::parse(path, &data)?)
    }

    /// Decodes a report from raw JSON bytes. `path` is only used for error reporting.
    pub fn parse(path: &Utf8Path, data: &[u8]) -> Result<Self, ParseError> {
        let mut deserializer = serde_json::Deserializer::from_slice(data);
        let report: Self = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|err| ParseError::new(path, err))?;
        // Reject trailing garbage after the top-level object.
        deserializer
            .end()
            .map_err(|err| ParseError::from_json(path, err))?;
        Ok(report)
    }

    /// Sorts results by unique ID in ascending byte order.
    ///
    /// Ties keep no particular order.
    pub fn sort_by_unique_id(&mut self) {
        self.test_results
            .sort_unstable_by(|a, b| a.unique_id.cmp(&b.unique_id));
    }

    /// Returns the number of tests that passed, computed from the top-level counters.
    ///
    /// This is `totalTests - failed`, not the `passed` field. Out-of-range counters wrap.
    pub fn passed_count(&self) -> i64 {
        self.total_tests.wrapping_sub(self.failed)
    }

    /// Returns the total run duration in seconds.
    pub fn total_duration_secs(&self) -> f64 {
        self.total_duration_ms as f64 / 1000.0
    }

    /// Returns failed results, in their current order.
    pub fn failed_results(&self) -> impl Iterator<Item = &KtTestResult> + '_ {
        self.test_results.iter().filter(|result| result.is_failed())
    }
}

/// A single test execution.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct KtTestResult {
    /// Descriptive information about the test.
    #[serde(deserialize_with = "null_as_default")]
    pub identifier: KtTestIdentifier,
    /// The unique ID of the test, used for sorting and display.
    #[serde(deserialize_with = "null_as_default")]
    pub unique_id: String,
    /// The spec (test class) this result belongs to. Empty if ungrouped.
    #[serde(deserialize_with = "null_as_default")]
    pub spec_id: String,
    /// The status string, for example `SUCCESSFUL`, `FAILED` or `ABORTED`.
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Epoch milliseconds at which the test started.
    #[serde(deserialize_with = "null_as_default")]
    pub start_time: i64,
    /// Epoch milliseconds at which the test ended.
    #[serde(deserialize_with = "null_as_default")]
    pub end_time: i64,
    /// How long the test took.
    #[serde(deserialize_with = "null_as_default")]
    pub duration_ms: i64,
    /// Captured standard output.
    pub stdout: Option<String>,
    /// Captured standard error.
    pub stderr: Option<String>,
    /// The printed stack trace of the throwable the test failed with.
    pub throwable: Option<String>,
}

impl KtTestResult {
    /// Returns true if this result counts as a failure.
    ///
    /// A result carrying throwable text is a failure whatever its status says.
    pub fn is_failed(&self) -> bool {
        self.status == FAILED_STATUS || self.throwable().is_some()
    }

    /// Returns the duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }

    /// Returns the throwable text if present and non-empty.
    pub fn throwable(&self) -> Option<&str> {
        non_empty(self.throwable.as_deref())
    }

    /// Returns captured stdout if present and non-empty.
    pub fn stdout(&self) -> Option<&str> {
        non_empty(self.stdout.as_deref())
    }

    /// Returns captured stderr if present and non-empty.
    pub fn stderr(&self) -> Option<&str> {
        non_empty(self.stderr.as_deref())
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Decodes `null` as the default value, the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Like [`null_as_default`], but also for each element of a list.
fn null_items_as_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Display information about a test, as reported by the JUnit platform.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct KtTestIdentifier {
    /// The human-readable test name.
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    /// The test descriptor type, for example `TEST` or `CONTAINER`.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Tags attached to the test.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: BTreeSet<String>,
    /// Short name of the test source.
    pub test_source_name: Option<String>,
    /// Full description of the test source.
    pub test_source_full: Option<String>,
}
