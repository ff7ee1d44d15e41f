// Copyright (c) The ktreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renders a Kotlin test-execution report as a console summary.
//!
//! The report is a JSON file at `build/test-results/ktreport.json`, produced by a JUnit platform
//! listener during a Gradle test run. ktreport reads it and prints:
//!
//! * one line per spec, with a `.` for each passing test and an `F` for each failing one
//! * details for each failure, with long runs of stack frames cut short
//! * a one-line summary
//!
//! The library API is split between [`report`], which decodes the file, and [`reporter`], which
//! renders it to any [`WriteStr`](write_str::WriteStr).

#![warn(missing_docs)]

mod dispatch;
pub mod errors;
mod output;
pub mod report;
pub mod reporter;
pub mod write_str;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::ExpectedError;
#[doc(hidden)]
pub use output::{Color, OutputContext, OutputWriter};
