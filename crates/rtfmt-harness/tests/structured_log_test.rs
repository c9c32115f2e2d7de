//! Log emission and artifact indexing through the filesystem.

use std::path::PathBuf;

use rtfmt_core::FormatMode;
use rtfmt_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, sha256_hex, validate_log_file,
};
use rtfmt_harness::{FixtureSet, TestRunner};

fn scratch(name: &str) -> PathBuf {
    let pid = std::process::id();
    let dir = std::env::temp_dir().join(format!("rtfmt-harness-{pid}-{name}"));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

const FIXTURE: &str = r#"{"version":"v1","family":"stdlib/itoa","cases":[
    {"name":"hex","function":"itoa","inputs":{"value":255,"base":16},"expected_output":"ff","mode":"both"},
    {"name":"wrong","function":"itoa","inputs":{"value":10,"base":10},"expected_output":"ten","mode":"both"}
]}"#;

#[test]
fn verification_log_validates() {
    let dir = scratch("log");
    let log_path = dir.join("run.jsonl");
    let set = FixtureSet::from_json(FIXTURE).unwrap();
    let results = TestRunner::new(FormatMode::Strict).run(&set);

    let mut emitter = LogEmitter::to_file(&log_path, "log-test").unwrap();
    emitter.emit(LogLevel::Info, "verify_start").unwrap();
    for r in &results {
        emitter.emit_entry(LogEntry::for_case(r)).unwrap();
    }
    emitter.flush().unwrap();

    let (lines, errors) = validate_log_file(&log_path).unwrap();
    assert_eq!(lines, 3);
    assert!(errors.is_empty(), "{errors:?}");

    let body = std::fs::read_to_string(&log_path).unwrap();
    let failed: serde_json::Value = serde_json::from_str(body.lines().nth(2).unwrap()).unwrap();
    assert_eq!(failed["outcome"], "fail");
    assert_eq!(failed["level"], "error");
    assert_eq!(failed["mode"], "strict");
    assert_eq!(failed["details"]["actual"], "10");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn corrupted_log_line_is_reported() {
    let dir = scratch("corrupt");
    let log_path = dir.join("bad.jsonl");
    std::fs::write(
        &log_path,
        "{\"timestamp\":\"t\",\"trace_id\":\"rtfmt::r::001\",\"level\":\"info\",\"event\":\"ok\"}\n\nnot json\n",
    )
    .unwrap();
    let (lines, errors) = validate_log_file(&log_path).unwrap();
    assert_eq!(lines, 2);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line_number, 3);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn artifact_index_detects_modified_files() {
    let dir = scratch("index");
    let report = dir.join("report.md");
    std::fs::write(&report, "# report\n").unwrap();

    let mut index = ArtifactIndex::new("index-test");
    index.add_file(&report, "report_markdown").unwrap();
    assert_eq!(index.artifacts[0].sha256, sha256_hex(b"# report\n"));
    assert_eq!(index.artifacts[0].size_bytes, Some(9));
    assert!(index.stale_artifacts().is_empty());

    std::fs::write(&report, "# edited\n").unwrap();
    assert_eq!(index.stale_artifacts(), vec![report.display().to_string()]);

    let json = index.to_json().unwrap();
    let back: ArtifactIndex = serde_json::from_str(&json).unwrap();
    assert_eq!(back.artifacts.len(), 1);
    std::fs::remove_dir_all(&dir).ok();
}
