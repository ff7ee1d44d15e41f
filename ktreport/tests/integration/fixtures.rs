// Copyright (c) The ktreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::Utf8Path;
use camino_tempfile::Utf8TempDir;
use ktreport::reporter::BANNER_WIDTH;
use std::{
    borrow::Cow,
    fmt,
    process::{Command, ExitStatus},
};

/// Where the binary looks for the report, relative to its working directory.
pub const REPORT_PATH: &str = "build/test-results/ktreport.json";

/// A temporary working directory for a ktreport invocation.
pub struct TempProject {
    dir: Utf8TempDir,
}

impl TempProject {
    pub fn new() -> Self {
        Self {
            dir: Utf8TempDir::new().expect("created temp dir"),
        }
    }

    pub fn root(&self) -> &Utf8Path {
        self.dir.path()
    }

    /// Writes `contents` to the report path, creating parent directories.
    pub fn write_report(&self, contents: &str) -> &Self {
        let path = self.root().join(REPORT_PATH);
        std::fs::create_dir_all(path.parent().expect("report path has a parent"))
            .expect("created report dir");
        std::fs::write(&path, contents).expect("wrote report");
        self
    }
}

#[derive(Clone, Debug)]
pub struct KtreportCli {
    args: Vec<String>,
}

impl KtreportCli {
    pub fn new() -> Self {
        Self {
            args: vec!["--color".to_owned(), "never".to_owned()],
        }
    }

    pub fn args(&mut self, args: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn output(&self, project: &TempProject) -> KtreportOutput {
        let mut command = Command::new(env!("CARGO_BIN_EXE_ktreport"));
        command.args(&self.args).current_dir(project.root());
        let output = command.output().expect("failed to execute");

        KtreportOutput {
            command,
            exit_status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

pub struct KtreportOutput {
    pub command: Command,
    pub exit_status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl KtreportOutput {
    pub fn stdout_as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    pub fn stderr_as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_status.code()
    }
}

impl fmt::Display for KtreportOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "command: {:?}\nexit code: {:?}\n\
                   --- stdout ---\n{}\n\n--- stderr ---\n{}\n\n",
            self.command,
            self.exit_status.code(),
            self.stdout_as_str(),
            self.stderr_as_str(),
        )
    }
}

// Match Debug to Display so that failed assertions print the whole invocation.
impl fmt::Debug for KtreportOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Renders a banner the way the binary does.
pub fn banner(title: Option<&str>) -> String {
    let prefix = title.map(|t| format!("= {t} ")).unwrap_or_default();
    let fill = BANNER_WIDTH - prefix.chars().count();
    format!("{prefix}{}", "=".repeat(fill))
}
