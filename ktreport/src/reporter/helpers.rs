// Copyright (c) The ktreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use owo_colors::Style;
use std::fmt;

/// Width of every section banner, in columns.
pub const BANNER_WIDTH: usize = 107;

/// The styles used to render a report.
///
/// The default value is unstyled, which is what tests and `--color never` use.
#[derive(Debug, Default, Clone)]
pub struct Styles {
    pub(crate) is_colorized: bool,
    pub(crate) pass: Style,
    pub(crate) fail: Style,
    pub(crate) header: Style,
}

impl Styles {
    /// Enables terminal colors.
    pub fn colorize(&mut self) {
        self.is_colorized = true;
        self.pass = Style::new().green();
        self.fail = Style::new().red();
        self.header = Style::new().bold();
    }

    /// Returns true if these styles emit ANSI escapes.
    pub fn is_colorized(&self) -> bool {
        self.is_colorized
    }
}

/// Seconds with millisecond precision, e.g. `0.460s`.
pub(super) struct DisplaySecs(pub(super) f64);

impl fmt::Display for DisplaySecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

/// A section banner such as `= failures ====...`, or a plain rule if there is no title.
pub(super) struct DisplayBanner<'a>(pub(super) Option<&'a str>);

impl fmt::Display for DisplayBanner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.0 {
            Some(title) => format!("= {title} "),
            None => String::new(),
        };
        let fill = BANNER_WIDTH.saturating_sub(prefix.chars().count());
        write!(f, "{prefix}{}", "=".repeat(fill))
    }
}
