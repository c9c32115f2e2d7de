//! Fixture execution against `rtfmt-core`.
//!
//! Each fixture names a function and carries its inputs as JSON. The inputs
//! are decoded into typed arguments, the call is made under the requested
//! [`FormatMode`], and the result is rendered to a comparable string:
//!
//! | function   | inputs                                  | output              |
//! |------------|-----------------------------------------|---------------------|
//! | `printf`   | `format`, `args`                        | emitted text        |
//! | `snprintf` | `format`, `args`, `size`                | `<total>\|<stored>` |
//! | `itoa`     | `value`, `base`, optional `buffer_len`  | rendered digits     |
//! | `utoa`     | `value`, `base`, optional `buffer_len`  | rendered digits     |
//! | `reverse`  | `s`, `length`                           | reversed text       |
//!
//! Errors returned by the core render as `error:<message>`.

use std::fmt;
use std::str::FromStr;

use rtfmt_core::stdio::{FormatArg, Formatter};
use rtfmt_core::{FormatMode, stdlib, string};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default scratch size for the converters: fits any base-2 rendering.
const DEFAULT_CONVERSION_BUFFER: usize = 34;

/// Errors that prevent a fixture from being executed at all.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("unsupported function '{0}'")]
    UnsupportedFunction(String),
    #[error("bad inputs for {function}: {source}")]
    BadInput {
        function: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("bad argument '{0}', expected <int|uint|char|str|double>:<value>")]
    BadArgument(String),
}

/// Typed argument as written in fixtures and on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ArgValue {
    Int(i32),
    Uint(u32),
    Char(char),
    Str(String),
    Double(f64),
}

impl ArgValue {
    #[must_use]
    pub fn as_format_arg(&self) -> FormatArg<'_> {
        match self {
            Self::Int(v) => FormatArg::Int(*v),
            Self::Uint(v) => FormatArg::unsigned(*v),
            Self::Char(c) => FormatArg::from(*c),
            Self::Str(s) => FormatArg::from(s.as_str()),
            Self::Double(v) => FormatArg::Double(*v),
        }
    }
}

/// Parses `kind:value`, e.g. `int:-42`, `char:A`, `str:hello`.
impl FromStr for ArgValue {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || HarnessError::BadArgument(s.to_string());
        let (kind, value) = s.split_once(':').ok_or_else(bad)?;
        let parsed = match kind.to_ascii_lowercase().as_str() {
            "int" | "d" => Self::Int(value.parse().map_err(|_| bad())?),
            "uint" | "u" => Self::Uint(value.parse().map_err(|_| bad())?),
            "char" | "c" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return Err(bad()),
                }
            }
            "str" | "s" => Self::Str(value.to_string()),
            "double" | "f" => Self::Double(value.parse().map_err(|_| bad())?),
            _ => return Err(bad()),
        };
        Ok(parsed)
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "int:{v}"),
            Self::Uint(v) => write!(f, "uint:{v}"),
            Self::Char(c) => write!(f, "char:{c}"),
            Self::Str(s) => write!(f, "str:{s}"),
            Self::Double(v) => write!(f, "double:{v}"),
        }
    }
}

/// Result of running one fixture case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseExecution {
    /// Rendered output, compared against the fixture's expectation.
    pub output: String,
    /// Extra context for the report (e.g. bytes emitted before an error).
    pub note: Option<String>,
}

impl CaseExecution {
    fn plain(output: String) -> Self {
        Self { output, note: None }
    }
}

#[derive(Deserialize)]
struct FormatInputs {
    format: String,
    #[serde(default)]
    args: Vec<ArgValue>,
}

#[derive(Deserialize)]
struct SnprintfInputs {
    format: String,
    #[serde(default)]
    args: Vec<ArgValue>,
    size: usize,
}

#[derive(Deserialize)]
struct ConvertInputs<T> {
    value: T,
    base: u32,
    #[serde(default = "default_buffer_len")]
    buffer_len: usize,
}

#[derive(Deserialize)]
struct ReverseInputs {
    s: String,
    length: usize,
}

fn default_buffer_len() -> usize {
    DEFAULT_CONVERSION_BUFFER
}

fn decode<T: for<'de> Deserialize<'de>>(
    function: &str,
    inputs: &serde_json::Value,
) -> Result<T, HarnessError> {
    T::deserialize(inputs).map_err(|source| HarnessError::BadInput {
        function: function.to_string(),
        source,
    })
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Execute one fixture case under `mode`.
pub fn execute_fixture_case(
    function: &str,
    inputs: &serde_json::Value,
    mode: FormatMode,
) -> Result<CaseExecution, HarnessError> {
    let formatter = Formatter::new(mode);
    match function {
        "printf" => {
            let inputs: FormatInputs = decode(function, inputs)?;
            let args: Vec<FormatArg<'_>> =
                inputs.args.iter().map(ArgValue::as_format_arg).collect();
            let mut out: Vec<u8> = Vec::new();
            match formatter.format(&mut out, inputs.format.as_bytes(), &args) {
                Ok(_) => Ok(CaseExecution::plain(lossy(&out))),
                Err(err) => Ok(CaseExecution {
                    output: format!("error:{err}"),
                    note: (!out.is_empty())
                        .then(|| format!("emitted before error: {:?}", lossy(&out))),
                }),
            }
        }
        "snprintf" => {
            let inputs: SnprintfInputs = decode(function, inputs)?;
            let args: Vec<FormatArg<'_>> =
                inputs.args.iter().map(ArgValue::as_format_arg).collect();
            let mut buf = vec![0u8; inputs.size];
            let output = match formatter.snprintf(&mut buf, inputs.format.as_bytes(), &args) {
                Ok(total) => {
                    let stored = &buf[..string::c_str_len(&buf)];
                    format!("{total}|{}", lossy(stored))
                }
                Err(err) => format!("error:{err}"),
            };
            Ok(CaseExecution::plain(output))
        }
        "itoa" => {
            let inputs: ConvertInputs<i32> = decode(function, inputs)?;
            let mut buf = vec![0u8; inputs.buffer_len];
            let output = match stdlib::itoa(inputs.value, &mut buf, inputs.base) {
                Ok(text) => lossy(text),
                Err(err) => format!("error:{err}"),
            };
            Ok(CaseExecution::plain(output))
        }
        "utoa" => {
            let inputs: ConvertInputs<u32> = decode(function, inputs)?;
            let mut buf = vec![0u8; inputs.buffer_len];
            let output = match stdlib::utoa(inputs.value, &mut buf, inputs.base) {
                Ok(text) => lossy(text),
                Err(err) => format!("error:{err}"),
            };
            Ok(CaseExecution::plain(output))
        }
        "reverse" => {
            let inputs: ReverseInputs = decode(function, inputs)?;
            let mut buf = inputs.s.into_bytes();
            string::reverse(&mut buf, inputs.length);
            Ok(CaseExecution::plain(lossy(&buf)))
        }
        other => Err(HarnessError::UnsupportedFunction(other.to_string())),
    }
}
