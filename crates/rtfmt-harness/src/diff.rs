//! Diff rendering for fixture comparison.

/// Render a text diff between expected and actual output.
///
/// Lines are compared pairwise; surplus lines on either side are reported
/// as pure additions or removals.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");
    for i in 0..expected_lines.len().max(actual_lines.len()) {
        let e = expected_lines.get(i);
        let a = actual_lines.get(i);
        if e == a {
            continue;
        }
        out.push_str(&format!("@@ line {} @@\n", i + 1));
        if let Some(e) = e {
            out.push_str(&format!("-{e}\n"));
        }
        if let Some(a) = a {
            out.push_str(&format!("+{a}\n"));
        }
    }
    if expected.lines().eq(actual.lines()) {
        // Only trailing newlines differ.
        out.push_str(&format!("@@ bytes @@\n-{expected:?}\n+{actual:?}\n"));
    }
    out
}
