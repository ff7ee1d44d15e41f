// Copyright (c) The ktreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by ktreport.

use crate::write_str::WriteStr;
use camino::{Utf8Path, Utf8PathBuf};
use std::{error::Error, io};
use thiserror::Error;

/// An error that occurred while reading the report file from disk.
#[derive(Debug, Error)]
#[error("JSONファイル '{path}' の読み込み中にエラーが発生しました")]
#[non_exhaustive]
pub struct LoadError {
    path: Utf8PathBuf,
    #[source]
    err: io::Error,
}

impl LoadError {
    pub(crate) fn new(path: impl Into<Utf8PathBuf>, err: io::Error) -> Self {
        Self {
            path: path.into(),
            err,
        }
    }

    /// Returns the path that could not be read.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// An error that occurred while decoding the report file.
#[derive(Debug, Error)]
#[error("JSONファイル '{path}' のパース中にエラーが発生しました")]
#[non_exhaustive]
pub struct ParseError {
    path: Utf8PathBuf,
    json_path: Option<String>,
    #[source]
    err: serde_json::Error,
}

impl ParseError {
    pub(crate) fn new(
        path: impl Into<Utf8PathBuf>,
        err: serde_path_to_error::Error<serde_json::Error>,
    ) -> Self {
        // The root path displays as ".", which isn't useful to show.
        let json_path = Some(err.path().to_string()).filter(|p| !p.is_empty() && p != ".");
        Self {
            path: path.into(),
            json_path,
            err: err.into_inner(),
        }
    }

    pub(crate) fn from_json(path: impl Into<Utf8PathBuf>, err: serde_json::Error) -> Self {
        Self {
            path: path.into(),
            json_path: None,
            err,
        }
    }

    /// Returns the path that could not be decoded.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the location in the document (for example `testResults[3].durationMs`) at which
    /// decoding failed, if known.
    pub fn json_path(&self) -> Option<&str> {
        self.json_path.as_deref()
    }
}

/// An error returned by [`KtReport::load`](crate::report::KtReport::load).
#[derive(Debug, Error)]
pub enum LoadOrParseError {
    /// The file could not be read.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The file could not be decoded.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// An error that ends a ktreport run.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("failed to load report")]
    Load {
        #[from]
        err: LoadError,
    },
    #[error("failed to parse report")]
    Parse {
        #[from]
        err: ParseError,
    },
    #[error("failed to write report to stdout")]
    WriteOutput {
        #[source]
        err: io::Error,
    },
}

impl From<LoadOrParseError> for ExpectedError {
    fn from(err: LoadOrParseError) -> Self {
        match err {
            LoadOrParseError::Load(err) => Self::Load { err },
            LoadOrParseError::Parse(err) => Self::Parse { err },
        }
    }
}

impl ExpectedError {
    /// Returns the exit code for the process.
    ///
    /// A report that cannot be loaded is reported on stdout and is not a process failure.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::Load { .. } | Self::Parse { .. } => 0,
            Self::WriteOutput { .. } => 1,
        }
    }

    /// Displays this error.
    ///
    /// Load and parse errors become a single localized line on `stdout`. Errors
    /// writing the report itself cannot go to stdout, so they are logged.
    pub fn display(&self, stdout: &mut dyn WriteStr) {
        let err: &dyn Error = match self {
            Self::Load { err } => err as &dyn Error,
            Self::Parse { err } => err as &dyn Error,
            Self::WriteOutput { err } => {
                tracing::error!("failed to write report to stdout: {err}");
                return;
            }
        };

        let res = writeln!(stdout, "エラー: {}", DisplayErrorChain(err))
            .and_then(|()| stdout.write_str_flush());
        if let Err(write_err) = res {
            tracing::error!("failed to write error message to stdout: {write_err}");
        }
    }
}

/// Displays an error followed by each of its sources, separated by `": "`.
pub(crate) struct DisplayErrorChain<'a>(pub(crate) &'a dyn Error);

impl std::fmt::Display for DisplayErrorChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(err) = source {
            write!(f, ": {err}")?;
            source = err.source();
        }
        Ok(())
    }
}
