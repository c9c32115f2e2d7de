//! Test execution engine.

use rtfmt_core::FormatMode;

use crate::diff;
use crate::execute::execute_fixture_case;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::verify::VerificationResult;

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Mode being tested.
    pub mode: FormatMode,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub const fn new(mode: FormatMode) -> Self {
        Self { mode }
    }

    /// Run all fixtures in a set that apply to this runner's mode.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .filter(|case| mode_matches(self.mode, &case.mode))
            .map(|case| {
                let (actual, diff) = self.execute_case(case);
                VerificationResult {
                    case_name: case.name.clone(),
                    function: case.function.clone(),
                    mode: self.mode.as_str().to_string(),
                    passed: actual == case.expected_output,
                    expected: case.expected_output.clone(),
                    actual,
                    diff,
                }
            })
            .collect()
    }

    fn execute_case(&self, case: &FixtureCase) -> (String, Option<String>) {
        match execute_fixture_case(&case.function, &case.inputs, self.mode) {
            Ok(run) => {
                let diff_out = if run.output != case.expected_output {
                    let mut d = diff::render_diff(&case.expected_output, &run.output);
                    if let Some(note) = &run.note {
                        d.push_str(note);
                        d.push('\n');
                    }
                    Some(d)
                } else {
                    run.note.clone()
                };
                (run.output, diff_out)
            }
            Err(err) => {
                let actual = format!("unsupported:{err}");
                let diff_out = Some(diff::render_diff(&case.expected_output, &actual));
                (actual, diff_out)
            }
        }
    }
}

fn mode_matches(active: FormatMode, case_mode: &str) -> bool {
    let case = case_mode.to_ascii_lowercase();
    case == "both" || case == active.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = r#"{
        "version":"v1",
        "family":"stdio/printf",
        "cases":[
            {"name":"legacy_u","function":"printf","inputs":{"format":"%u","args":[{"kind":"int","value":-1}]},"expected_output":"-1","mode":"legacy"},
            {"name":"strict_u","function":"printf","inputs":{"format":"%u","args":[{"kind":"int","value":-1}]},"expected_output":"4294967295","mode":"strict"},
            {"name":"both_d","function":"printf","inputs":{"format":"%d","args":[{"kind":"int","value":42}]},"expected_output":"42","mode":"both"}
        ]
    }"#;

    #[test]
    fn legacy_runner_executes_matching_cases() {
        let fixture = FixtureSet::from_json(MIXED).expect("valid fixture json");
        let results = TestRunner::new(FormatMode::Legacy).run(&fixture);
        let names: Vec<&str> = results.iter().map(|r| r.case_name.as_str()).collect();
        assert_eq!(names, ["legacy_u", "both_d"]);
        assert!(results.iter().all(|r| r.passed));
    }

    #[test]
    fn strict_runner_executes_matching_cases() {
        let fixture = FixtureSet::from_json(MIXED).expect("valid fixture json");
        let results = TestRunner::new(FormatMode::Strict).run(&fixture);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.passed && r.mode == "strict"));
    }

    #[test]
    fn mismatch_carries_diff() {
        let fixture = FixtureSet::from_json(
            r#"{"version":"v1","family":"stdlib/itoa","cases":[
                {"name":"wrong","function":"itoa","inputs":{"value":255,"base":16},"expected_output":"FF","mode":"both"}
            ]}"#,
        )
        .expect("valid fixture json");
        let results = TestRunner::new(FormatMode::Legacy).run(&fixture);
        assert!(!results[0].passed);
        assert_eq!(results[0].actual, "ff");
        assert!(results[0].diff.as_deref().unwrap().contains("-FF\n+ff"));
    }

    #[test]
    fn unsupported_function_fails_case() {
        let fixture = FixtureSet::from_json(
            r#"{"version":"v1","family":"x","cases":[
                {"name":"nope","function":"scanf","inputs":{},"expected_output":"","mode":"both"}
            ]}"#,
        )
        .expect("valid fixture json");
        let results = TestRunner::new(FormatMode::Strict).run(&fixture);
        assert!(!results[0].passed);
        assert!(results[0].actual.starts_with("unsupported:"));
    }
}
