//! Formatting mode configuration.
//!
//! The process-wide mode is set via the `RTFMT_MODE` environment variable, or
//! programmatically with [`set_format_mode`] on targets without an environment:
//! - `legacy` (default): keeps the documented deviations of the legacy C
//!   runtime. `%u` renders signed, `%%` renders as two characters, `%f`
//!   truncates with a saturating cast and argument misuse degrades output
//!   silently. An unknown directive renders as `%` plus its byte and a
//!   trailing `%` is kept as-is.
//! - `strict`: same directive surface, but `%u` renders unsigned, `%%` renders
//!   a single `%`, and argument misuse is reported as a `FormatError`.

use std::sync::atomic::{AtomicU8, Ordering};

/// Rendering mode for the formatter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatMode {
    /// Documented legacy deviations kept: signed `%u`, literal `%%`,
    /// truncated `%f`, silent degradation on misuse.
    #[default]
    Legacy,
    /// Deviations corrected; misuse reported instead of silently degraded.
    Strict,
}

impl FormatMode {
    /// Parse from string (case-insensitive). Unknown values map to `Legacy`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" | "posix" | "checked" => Self::Strict,
            _ => Self::Legacy,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Strict => "strict",
        }
    }

    /// Returns true if misuse is reported instead of degraded.
    #[must_use]
    pub const fn reports_errors(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl core::fmt::Display for FormatMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Atomic cache: 0=unresolved, 1=Legacy, 2=Strict, 255=resolving.
static CACHED_MODE: AtomicU8 = AtomicU8::new(0);

const MODE_UNRESOLVED: u8 = 0;
const MODE_LEGACY: u8 = 1;
const MODE_STRICT: u8 = 2;
const MODE_RESOLVING: u8 = 255;

fn mode_to_u8(mode: FormatMode) -> u8 {
    match mode {
        FormatMode::Legacy => MODE_LEGACY,
        FormatMode::Strict => MODE_STRICT,
    }
}

fn u8_to_mode(v: u8) -> FormatMode {
    match v {
        MODE_STRICT => FormatMode::Strict,
        _ => FormatMode::Legacy,
    }
}

/// Get the configured mode (reads `RTFMT_MODE` on first call, caches thereafter).
///
/// A call that arrives while another is resolving the environment sees
/// `Legacy` rather than blocking.
#[must_use]
pub fn format_mode() -> FormatMode {
    let cached = CACHED_MODE.load(Ordering::Acquire);
    if cached != MODE_UNRESOLVED && cached != MODE_RESOLVING {
        return u8_to_mode(cached);
    }
    if cached == MODE_RESOLVING {
        return FormatMode::Legacy;
    }

    if CACHED_MODE
        .compare_exchange(
            MODE_UNRESOLVED,
            MODE_RESOLVING,
            Ordering::SeqCst,
            Ordering::Relaxed,
        )
        .is_err()
    {
        let v = CACHED_MODE.load(Ordering::Acquire);
        return if v != MODE_UNRESOLVED && v != MODE_RESOLVING {
            u8_to_mode(v)
        } else {
            FormatMode::Legacy
        };
    }

    let mode = std::env::var("RTFMT_MODE")
        .map(|v| FormatMode::from_str_loose(&v))
        .unwrap_or_default();
    // A concurrent set_format_mode() wins over the environment.
    match CACHED_MODE.compare_exchange(
        MODE_RESOLVING,
        mode_to_u8(mode),
        Ordering::AcqRel,
        Ordering::Acquire,
    ) {
        Ok(_) => mode,
        Err(current) => u8_to_mode(current),
    }
}

/// Override the process-wide mode. Takes precedence over `RTFMT_MODE`.
pub fn set_format_mode(mode: FormatMode) {
    CACHED_MODE.store(mode_to_u8(mode), Ordering::Release);
}
