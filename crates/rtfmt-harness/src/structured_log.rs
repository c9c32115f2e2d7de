//! Structured logging for conformance runs.
//!
//! Provides:
//! - [`LogEntry`]: JSONL log record with required + optional fields.
//! - [`ArtifactIndex`]: links a run's log to its reports with SHA-256 digests.
//! - [`LogEmitter`]: writes JSONL lines to a file or an in-memory buffer.
//! - [`validate_log_line`] / [`validate_log_file`]: schema checks.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::verify::VerificationResult;

// ---------------------------------------------------------------------------
// Log entry
// ---------------------------------------------------------------------------

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Case outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
    Skip,
    Error,
}

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const OUTCOMES: [&str; 4] = ["pass", "fail", "skip", "error"];
const MODES: [&str; 2] = ["legacy", "strict"];

/// Structured log entry.
///
/// Required fields: `timestamp`, `trace_id`, `level`, `event`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub trace_id: String,
    pub level: LogLevel,
    pub event: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Function under test (`printf`, `itoa`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_refs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    /// Create a new log entry with required fields only.
    #[must_use]
    pub fn new(trace_id: impl Into<String>, level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: now_utc(),
            trace_id: trace_id.into(),
            level,
            event: event.into(),
            mode: None,
            symbol: None,
            case_name: None,
            outcome: None,
            duration_ms: None,
            artifact_refs: None,
            details: None,
        }
    }

    /// Entry describing one verified fixture case. The trace id is filled in
    /// by the emitter.
    #[must_use]
    pub fn for_case(result: &VerificationResult) -> Self {
        let (level, outcome) = if result.passed {
            (LogLevel::Info, Outcome::Pass)
        } else {
            (LogLevel::Error, Outcome::Fail)
        };
        let mut entry = Self::new("", level, "case_verified")
            .with_mode(result.mode.clone())
            .with_symbol(result.function.clone())
            .with_case(result.case_name.clone())
            .with_outcome(outcome);
        if !result.passed {
            entry = entry.with_details(serde_json::json!({
                "expected": result.expected,
                "actual": result.actual,
            }));
        }
        entry
    }

    #[must_use]
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    #[must_use]
    pub fn with_case(mut self, case_name: impl Into<String>) -> Self {
        self.case_name = Some(case_name.into());
        self
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    #[must_use]
    pub fn with_duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    #[must_use]
    pub fn with_artifacts(mut self, refs: Vec<String>) -> Self {
        self.artifact_refs = Some(refs);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Serialize to a single JSONL line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// Artifact index
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub path: String,
    pub kind: String,
    pub sha256: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

/// Artifact index linking a run's log to the files it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactIndex {
    pub index_version: u32,
    pub run_id: String,
    pub generated_utc: String,
    pub artifacts: Vec<ArtifactEntry>,
}

impl ArtifactIndex {
    #[must_use]
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            index_version: 1,
            run_id: run_id.into(),
            generated_utc: now_utc(),
            artifacts: Vec::new(),
        }
    }

    /// Add an entry for in-memory content.
    pub fn add_bytes(
        &mut self,
        path: impl Into<String>,
        kind: impl Into<String>,
        data: &[u8],
    ) -> &mut Self {
        self.artifacts.push(ArtifactEntry {
            path: path.into(),
            kind: kind.into(),
            sha256: sha256_hex(data),
            size_bytes: Some(data.len() as u64),
        });
        self
    }

    /// Hash a file on disk and add it.
    pub fn add_file(&mut self, path: &Path, kind: impl Into<String>) -> std::io::Result<&mut Self> {
        let data = std::fs::read(path)?;
        Ok(self.add_bytes(path.display().to_string(), kind, &data))
    }

    /// Paths whose current content no longer matches the recorded digest.
    pub fn stale_artifacts(&self) -> Vec<String> {
        self.artifacts
            .iter()
            .filter(|a| match std::fs::read(&a.path) {
                Ok(data) => !sha256_hex(&data).eq_ignore_ascii_case(&a.sha256),
                Err(_) => true,
            })
            .map(|a| a.path.clone())
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Lowercase hex SHA-256 of `data`.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

// ---------------------------------------------------------------------------
// Log emitter
// ---------------------------------------------------------------------------

enum Sink {
    Writer(Box<dyn Write>),
    Buffer(Vec<u8>),
}

/// Writes structured JSONL log entries.
pub struct LogEmitter {
    sink: Sink,
    seq: u64,
    run_id: String,
}

impl LogEmitter {
    /// Create an emitter that writes to a file.
    pub fn to_file(path: &Path, run_id: &str) -> std::io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self {
            sink: Sink::Writer(Box::new(std::io::BufWriter::new(file))),
            seq: 0,
            run_id: run_id.to_string(),
        })
    }

    /// Create an emitter that collects lines in memory.
    #[must_use]
    pub fn to_buffer(run_id: &str) -> Self {
        Self {
            sink: Sink::Buffer(Vec::new()),
            seq: 0,
            run_id: run_id.to_string(),
        }
    }

    fn next_trace_id(&mut self) -> String {
        self.seq += 1;
        format!("rtfmt::{}::{:03}", self.run_id, self.seq)
    }

    fn write_line(&mut self, entry: &LogEntry) -> std::io::Result<()> {
        let line = entry.to_jsonl().map_err(std::io::Error::other)?;
        match &mut self.sink {
            Sink::Writer(w) => writeln!(w, "{line}"),
            Sink::Buffer(b) => writeln!(b, "{line}"),
        }
    }

    /// Emit an entry with only an event name.
    pub fn emit(&mut self, level: LogLevel, event: &str) -> std::io::Result<LogEntry> {
        let trace_id = self.next_trace_id();
        let entry = LogEntry::new(trace_id, level, event);
        self.write_line(&entry)?;
        Ok(entry)
    }

    /// Emit a populated entry; an empty trace id is assigned the next one.
    pub fn emit_entry(&mut self, mut entry: LogEntry) -> std::io::Result<()> {
        if entry.trace_id.is_empty() {
            entry.trace_id = self.next_trace_id();
        }
        self.write_line(&entry)
    }

    /// Lines written so far, for buffer emitters.
    #[must_use]
    pub fn buffered(&self) -> Option<&str> {
        match &self.sink {
            Sink::Buffer(b) => std::str::from_utf8(b).ok(),
            Sink::Writer(_) => None,
        }
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.sink {
            Sink::Writer(w) => w.flush(),
            Sink::Buffer(_) => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct LogValidationError {
    pub line_number: usize,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for LogValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: field '{}': {}",
            self.line_number, self.field, self.message
        )
    }
}

fn check_enum(
    obj: &serde_json::Map<String, serde_json::Value>,
    field: &str,
    allowed: &[&str],
    line_number: usize,
    errors: &mut Vec<LogValidationError>,
) {
    if let Some(value) = obj.get(field).and_then(|v| v.as_str())
        && !allowed.contains(&value)
    {
        errors.push(LogValidationError {
            line_number,
            field: field.to_string(),
            message: format!("invalid {field}: '{value}'"),
        });
    }
}

/// Validate a single JSONL line against the schema.
pub fn validate_log_line(
    line: &str,
    line_number: usize,
) -> Result<LogEntry, Vec<LogValidationError>> {
    let mut errors = Vec::new();

    let value: serde_json::Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            errors.push(LogValidationError {
                line_number,
                field: "<json>".to_string(),
                message: format!("invalid JSON: {e}"),
            });
            return Err(errors);
        }
    };

    let Some(obj) = value.as_object() else {
        errors.push(LogValidationError {
            line_number,
            field: "<root>".to_string(),
            message: "expected JSON object".to_string(),
        });
        return Err(errors);
    };

    for field in ["timestamp", "trace_id", "level", "event"] {
        if !obj.contains_key(field) {
            errors.push(LogValidationError {
                line_number,
                field: field.to_string(),
                message: "required field missing".to_string(),
            });
        }
    }

    check_enum(obj, "level", &LEVELS, line_number, &mut errors);
    check_enum(obj, "mode", &MODES, line_number, &mut errors);
    check_enum(obj, "outcome", &OUTCOMES, line_number, &mut errors);

    if let Some(trace_id) = obj.get("trace_id").and_then(|v| v.as_str())
        && !trace_id.contains("::")
    {
        errors.push(LogValidationError {
            line_number,
            field: "trace_id".to_string(),
            message: format!("trace_id should follow rtfmt::<run_id>::<seq>, got: '{trace_id}'"),
        });
    }

    // Case entries must say which case and function they describe.
    if obj.contains_key("outcome") {
        for field in ["case_name", "symbol"] {
            if !obj.get(field).is_some_and(serde_json::Value::is_string) {
                errors.push(LogValidationError {
                    line_number,
                    field: field.to_string(),
                    message: "outcome entries must name the case and symbol".to_string(),
                });
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value::<LogEntry>(value).map_err(|e| {
        vec![LogValidationError {
            line_number,
            field: "<deserialization>".to_string(),
            message: format!("failed to deserialize: {e}"),
        }]
    })
}

/// Validate an entire JSONL file.
///
/// Returns the non-empty line count and any validation errors found.
pub fn validate_log_file(path: &Path) -> Result<(usize, Vec<LogValidationError>), std::io::Error> {
    let content = std::fs::read_to_string(path)?;
    let mut all_errors = Vec::new();
    let mut line_count = 0;

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        line_count += 1;
        if let Err(errs) = validate_log_line(line, i + 1) {
            all_errors.extend(errs);
        }
    }

    Ok((line_count, all_errors))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// RFC 3339 UTC timestamp with millisecond precision.
#[must_use]
pub fn now_utc() -> String {
    let duration = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format_utc(duration.as_secs(), duration.subsec_millis())
}

fn format_utc(secs: u64, millis: u32) -> String {
    let days = secs / 86_400;
    let (year, month, day) = civil_from_days(days as i64);
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}.{millis:03}Z",
        (secs % 86_400) / 3600,
        (secs % 3600) / 60,
        secs % 60,
    )
}

// Days since 1970-01-01 to proleptic Gregorian (y, m, d).
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
