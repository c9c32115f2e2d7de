//! Conformance testing harness for rtfmt.
//!
//! This crate provides:
//! - Fixtures: JSON reference cases for the formatter and converters
//! - Execution: decode fixture inputs into calls on `rtfmt-core`
//! - Verification: compare outputs per mode (legacy, strict)
//! - Report generation: human-readable + machine-readable conformance reports
//! - Structured logging: JSONL run logs with a SHA-256 artifact index

#![forbid(unsafe_code)]

pub mod diff;
pub mod execute;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use execute::{ArgValue, CaseExecution, HarnessError, execute_fixture_case};
pub use fixtures::{FixtureCase, FixtureError, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};
