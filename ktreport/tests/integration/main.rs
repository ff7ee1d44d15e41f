// Copyright (c) The ktreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests that run the `ktreport` binary against a report in a temporary directory.

mod fixtures;

use fixtures::*;
use indoc::{formatdoc, indoc};
use pretty_assertions::assert_eq;

const PASSING_REPORT: &str = indoc! {r#"
    {
      "testResults": [
        {
          "identifier": {
            "displayName": "subtract()",
            "type": "TEST",
            "tags": [],
            "testSourceName": "MethodSource",
            "testSourceFull": "MethodSource [className = 'com.example.CalculatorTest', methodName = 'subtract']"
          },
          "uniqueId": "[engine:junit-jupiter]/[class:com.example.CalculatorTest]/[method:subtract()]",
          "specId": "com.example.CalculatorTest",
          "status": "SUCCESSFUL",
          "startTime": 1700000000100,
          "endTime": 1700000000130,
          "durationMs": 30,
          "stdout": "",
          "stderr": "",
          "throwable": null
        },
        {
          "uniqueId": "[engine:junit-jupiter]/[class:com.example.CalculatorTest]/[method:add()]",
          "specId": "com.example.CalculatorTest",
          "status": "SUCCESSFUL",
          "durationMs": 12
        },
        {
          "uniqueId": "[engine:junit-jupiter]/[class:com.example.StringsTest]/[method:reverse()]",
          "specId": "com.example.StringsTest",
          "status": "SUCCESSFUL",
          "durationMs": 1500
        }
      ],
      "totalTests": 3,
      "passed": 3,
      "failed": 0,
      "skipped": 0,
      "startTime": 1700000000000,
      "endTime": 1700000002000,
      "totalDurationMs": 2000
    }
"#};

const FAILING_REPORT: &str = indoc! {r#"
    {
      "testResults": [
        {
          "uniqueId": "com.example.ParserTest/parsesNumbers()",
          "specId": "com.example.ParserTest",
          "status": "SUCCESSFUL",
          "durationMs": 4
        },
        {
          "uniqueId": "com.example.ParserTest/rejectsGarbage()",
          "specId": "com.example.ParserTest",
          "status": "FAILED",
          "durationMs": 21,
          "stdout": "parsing 'x1'\n",
          "throwable": "java.lang.AssertionError: expected failure\n\tat com.example.Parser.parse(Parser.kt:10)\n\tat com.example.Parser.parse(Parser.kt:11)\n\tat com.example.Parser.parse(Parser.kt:12)\n\tat com.example.Parser.parse(Parser.kt:13)\n\tat com.example.Parser.parse(Parser.kt:14)\n\tat com.example.Parser.parse(Parser.kt:15)\n\tat com.example.Parser.parse(Parser.kt:16)\n\tat com.example.Parser.parse(Parser.kt:17)\n\tat com.example.Parser.parse(Parser.kt:18)\n"
        }
      ],
      "totalTests": 2,
      "passed": 1,
      "failed": 1,
      "totalDurationMs": 25
    }
"#};

#[test]
fn test_passing_report() {
    let project = TempProject::new();
    project.write_report(PASSING_REPORT);

    let output = KtreportCli::new().output(&project);
    assert_eq!(output.exit_code(), Some(0), "{output}");

    let expected = formatdoc! {"
        {header}

        com.example.CalculatorTest .. (0.042s)
        com.example.StringsTest . (1.500s)

        {summary}
        PASSED 3 passed in 2.000s
        {rule}
        ",
        header = banner(Some("ktreport")),
        summary = banner(Some("short test summary info")),
        rule = banner(None),
    };
    assert_eq!(output.stdout_as_str(), expected);
    assert!(!output.stdout_as_str().contains("= failures"));
}

#[test]
fn test_failing_report() {
    let project = TempProject::new();
    project.write_report(FAILING_REPORT);

    let output = KtreportCli::new().output(&project);
    assert_eq!(output.exit_code(), Some(0), "{output}");

    let expected = formatdoc! {"
        {header}

        com.example.ParserTest .F (0.025s)

        {failures}

        com.example.ParserTest/rejectsGarbage() (0.021s)

        java.lang.AssertionError: expected failure
        \tat com.example.Parser.parse(Parser.kt:10)
        \tat com.example.Parser.parse(Parser.kt:11)
        \tat com.example.Parser.parse(Parser.kt:12)
        \tat com.example.Parser.parse(Parser.kt:13)
        \tat com.example.Parser.parse(Parser.kt:14)
        \tat com.example.Parser.parse(Parser.kt:15)
        \tat com.example.Parser.parse(Parser.kt:16)
        ... (2 lines omitted)

        STDOUT:
        parsing 'x1'

        {summary}
        FAILED 1 passed, 1 failed in 0.025s
        {rule}
        ",
        header = banner(Some("ktreport")),
        failures = banner(Some("failures")),
        summary = banner(Some("short test summary info")),
        rule = banner(None),
    };
    assert_eq!(output.stdout_as_str(), expected);
}

#[test]
fn test_stack_flag_spellings() {
    let project = TempProject::new();
    project.write_report(FAILING_REPORT);

    let cases: &[&[&str]] = &[
        &["-stack", "2"],
        &["-stack=2"],
        &["--stack", "2"],
        &["-s", "2"],
        &["-s", "9", "-stack", "2"],
    ];
    for args in cases {
        let output = KtreportCli::new().args(args.iter().copied()).output(&project);
        assert_eq!(output.exit_code(), Some(0), "{output}");

        let stdout = output.stdout_as_str();
        assert!(
            stdout.contains(indoc! {"
                \tat com.example.Parser.parse(Parser.kt:11)
                ... (7 lines omitted)
            "}),
            "for {args:?}: {output}"
        );
        assert!(!stdout.contains("Parser.kt:12"), "for {args:?}: {output}");
    }
}

#[test]
fn test_missing_report() {
    let project = TempProject::new();

    let output = KtreportCli::new().output(&project);
    assert_eq!(output.exit_code(), Some(0), "{output}");

    let stdout = output.stdout_as_str();
    assert_eq!(stdout.lines().count(), 1, "{output}");
    assert!(
        stdout.starts_with(&format!(
            "エラー: JSONファイル '{REPORT_PATH}' の読み込み中にエラーが発生しました: "
        )),
        "{output}"
    );
    assert!(!stdout.contains("= ktreport"), "{output}");
}

#[test]
fn test_malformed_report() {
    let project = TempProject::new();
    project.write_report(r#"{"testResults": [{"uniqueId": "#);

    let output = KtreportCli::new().output(&project);
    assert_eq!(output.exit_code(), Some(0), "{output}");

    let stdout = output.stdout_as_str();
    assert_eq!(stdout.lines().count(), 1, "{output}");
    assert!(
        stdout.starts_with(&format!(
            "エラー: JSONファイル '{REPORT_PATH}' のパース中にエラーが発生しました: "
        )),
        "{output}"
    );
    assert!(!stdout.contains("= ktreport"), "{output}");
}

#[test]
fn test_empty_results() {
    let project = TempProject::new();
    project.write_report(r#"{"testResults": [], "totalTests": 0, "totalDurationMs": 0}"#);

    let output = KtreportCli::new().output(&project);
    assert_eq!(output.exit_code(), Some(0), "{output}");

    let expected = formatdoc! {"
        {header}


        {summary}
        PASSED 0 passed in 0.000s
        {rule}
        ",
        header = banner(Some("ktreport")),
        summary = banner(Some("short test summary info")),
        rule = banner(None),
    };
    assert_eq!(output.stdout_as_str(), expected);
}

#[test]
fn test_verbose_logs_to_stderr() {
    let project = TempProject::new();
    project.write_report(PASSING_REPORT);

    let output = KtreportCli::new().args(["-v"]).output(&project);
    assert_eq!(output.exit_code(), Some(0), "{output}");
    assert!(
        output.stderr_as_str().contains("debug: decoded 3 test results"),
        "{output}"
    );
    assert!(!output.stdout_as_str().contains("debug:"), "{output}");
}

#[test]
fn test_extra_arguments_ignored() {
    let project = TempProject::new();
    project.write_report(PASSING_REPORT);

    let output = KtreportCli::new().args(["extra", "-s"]).output(&project);
    assert_eq!(output.exit_code(), Some(0), "{output}");
    assert!(
        output.stdout_as_str().contains("PASSED 3 passed in 2.000s"),
        "{output}"
    );
}
