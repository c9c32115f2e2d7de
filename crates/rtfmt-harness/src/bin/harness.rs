//! CLI entrypoint for the rtfmt conformance harness.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use rtfmt_core::FormatMode;
use rtfmt_core::stdio::{FormatArg, Formatter};
use rtfmt_harness::structured_log::{ArtifactIndex, LogEmitter, LogEntry, LogLevel};
use rtfmt_harness::{ArgValue, ConformanceReport, FixtureSet, TestRunner, VerificationSummary};

/// Conformance tooling for rtfmt.
#[derive(Debug, Parser)]
#[command(name = "rtfmt-harness")]
#[command(about = "Conformance testing harness for rtfmt")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the implementation against fixture files.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown; a `.json` sibling is written too).
        #[arg(long)]
        report: Option<PathBuf>,
        /// JSONL structured log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Mode to verify (`legacy`, `strict`, or `both`).
        #[arg(long, default_value = "both")]
        mode: String,
    },
    /// Format a string with typed arguments and print the result.
    Render {
        /// Format string.
        format: String,
        /// Arguments as `kind:value` (`int`, `uint`, `char`, `str`, `double`).
        #[arg(long = "arg")]
        args: Vec<ArgValue>,
        /// Formatting mode (`legacy` or `strict`).
        #[arg(long, default_value = "legacy")]
        mode: String,
        /// Render through snprintf into a buffer of this size.
        #[arg(long)]
        size: Option<usize>,
    },
    /// Convert an integer to text in a base.
    Itoa {
        #[arg(allow_negative_numbers = true)]
        value: i64,
        #[arg(long, default_value_t = 10)]
        base: u32,
        /// Treat the value as unsigned 32-bit.
        #[arg(long)]
        unsigned: bool,
    },
}

fn parse_modes(raw: &str) -> Result<Vec<FormatMode>, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "legacy" => Ok(vec![FormatMode::Legacy]),
        "strict" => Ok(vec![FormatMode::Strict]),
        "both" => Ok(vec![FormatMode::Legacy, FormatMode::Strict]),
        other => Err(format!(
            "Unsupported mode '{other}', expected legacy|strict|both"
        )),
    }
}

fn parse_single_mode(raw: &str) -> Result<FormatMode, String> {
    match parse_modes(raw)?.as_slice() {
        [mode] => Ok(*mode),
        _ => Err(format!(
            "Mode '{raw}' is not a single mode, expected legacy|strict"
        )),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify {
            fixture,
            report,
            log,
            mode,
        } => {
            let modes = parse_modes(&mode)?;
            eprintln!("Verifying against fixtures in {}", fixture.display());

            let mut fixture_sets = Vec::new();
            for (path, set) in FixtureSet::load_dir(&fixture)? {
                match set {
                    Ok(set) => fixture_sets.push(set),
                    Err(err) => eprintln!("Skipping {}: {}", path.display(), err),
                }
            }
            if fixture_sets.is_empty() {
                return Err(format!("No fixture JSON files found in {}", fixture.display()).into());
            }

            let started = Instant::now();
            let mut results = Vec::new();
            for &m in &modes {
                let runner = TestRunner::new(m);
                for set in &fixture_sets {
                    results.extend(runner.run(set));
                }
            }

            let mode_label = modes
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join("+");
            let report_doc = ConformanceReport {
                title: String::from("rtfmt Conformance Report"),
                mode: mode_label,
                timestamp: rtfmt_harness::structured_log::now_utc(),
                summary: VerificationSummary::from_results(results),
            };
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}",
                report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
            );

            let mut index = ArtifactIndex::new("fixture-verify");
            if let Some(report_path) = &report {
                eprintln!("Writing report to {}", report_path.display());
                std::fs::write(report_path, report_doc.to_markdown())?;
                index.add_file(report_path, "report_markdown")?;
                let json_path = report_path.with_extension("json");
                std::fs::write(&json_path, report_doc.to_json())?;
                index.add_file(&json_path, "report_json")?;
            }

            if let Some(log_path) = &log {
                let mut emitter = LogEmitter::to_file(log_path, "fixture-verify")?;
                emitter.emit(LogLevel::Info, "verify_start")?;
                for result in &report_doc.summary.results {
                    emitter.emit_entry(LogEntry::for_case(result))?;
                }
                let refs = index.artifacts.iter().map(|a| a.path.clone()).collect();
                let level = if report_doc.summary.all_passed() {
                    LogLevel::Info
                } else {
                    LogLevel::Error
                };
                emitter.emit_entry(
                    LogEntry::new("", level, "verify_end")
                        .with_duration_ms(elapsed_ms)
                        .with_artifacts(refs)
                        .with_details(serde_json::json!({
                            "total": report_doc.summary.total,
                            "passed": report_doc.summary.passed,
                            "failed": report_doc.summary.failed,
                        })),
                )?;
                emitter.flush()?;
                index.add_file(log_path, "log_jsonl")?;

                let index_path = log_path.with_extension("index.json");
                std::fs::write(&index_path, index.to_json()?)?;
                eprintln!(
                    "Wrote log to {} and index to {}",
                    log_path.display(),
                    index_path.display()
                );
            }

            if !report_doc.summary.all_passed() {
                for r in report_doc.summary.failures() {
                    eprintln!("FAIL [{}] {}", r.mode, r.case_name);
                }
                return Err("Conformance verification failed".into());
            }
        }
        Command::Render {
            format,
            args,
            mode,
            size,
        } => {
            let formatter = Formatter::new(parse_single_mode(&mode)?);
            let args: Vec<FormatArg<'_>> = args.iter().map(ArgValue::as_format_arg).collect();
            let mut stdout = std::io::stdout().lock();
            match size {
                Some(size) => {
                    let mut buf = vec![0u8; size];
                    let total = formatter.snprintf(&mut buf, format.as_bytes(), &args)?;
                    let stored = rtfmt_core::string::c_str_len(&buf);
                    stdout.write_all(&buf[..stored])?;
                    writeln!(stdout)?;
                    eprintln!("total={total} stored={stored}");
                }
                None => {
                    let mut out: Vec<u8> = Vec::new();
                    formatter.format(&mut out, format.as_bytes(), &args)?;
                    stdout.write_all(&out)?;
                    writeln!(stdout)?;
                }
            }
        }
        Command::Itoa {
            value,
            base,
            unsigned,
        } => {
            let mut buf = [0u8; 34];
            let text = if unsigned {
                let v = u32::try_from(value).map_err(|_| format!("{value} is not a u32"))?;
                rtfmt_core::utoa(v, &mut buf, base)?
            } else {
                let v = i32::try_from(value).map_err(|_| format!("{value} is not an i32"))?;
                rtfmt_core::itoa(v, &mut buf, base)?
            };
            println!("{}", String::from_utf8_lossy(text));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_both_modes() {
        assert_eq!(
            parse_modes(" Both ").unwrap(),
            [FormatMode::Legacy, FormatMode::Strict]
        );
        assert!(parse_modes("stirct").is_err());
    }

    #[test]
    fn render_rejects_unknown_and_combined_modes() {
        assert_eq!(parse_single_mode("strict").unwrap(), FormatMode::Strict);
        assert_eq!(parse_single_mode("LEGACY").unwrap(), FormatMode::Legacy);
        let err = parse_single_mode("stirct").unwrap_err();
        assert!(err.contains("stirct"), "{err}");
        assert!(parse_single_mode("both").is_err());
    }

    #[test]
    fn render_mode_typo_fails_cli_run() {
        let cli = Cli::try_parse_from([
            "rtfmt-harness",
            "render",
            "%d",
            "--arg",
            "int:1",
            "--mode",
            "stirct",
        ])
        .unwrap();
        let Command::Render { mode, .. } = cli.command else {
            panic!("expected render subcommand");
        };
        assert!(parse_single_mode(&mode).is_err());
    }
}
