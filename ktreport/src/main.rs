// Copyright (c) The ktreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use color_eyre::Result;
use ktreport::{KtreportApp, OutputWriter};

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = enable_ansi_support::enable_ansi_support();

    let opts = KtreportApp::parse_args(std::env::args_os());
    let output = opts.init_output();

    let code = opts.exec(output, &mut OutputWriter::default());
    std::process::exit(code)
}
