//! The success/failure record printed by the runner.
//!
//! An [`Outcome`] serializes to exactly one of
//!
//! ```text
//! {"success": true, "response": "<text>"}
//! {"success": false, "error": "<text>"}
//! ```
//!
//! and [`to_line`] renders any serializable value on a single line with a
//! space after `:` and `,` and ASCII-only output.

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;

use crate::error::{Error, Result};

/// Result of one runner invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RawOutcome", try_from = "RawOutcome")]
pub enum Outcome {
    /// The completion succeeded; `response` is the first choice's content.
    Success {
        /// Generated text.
        response: String,
    },
    /// Something failed; `error` is the flattened error message.
    Failure {
        /// Error message.
        error: String,
    },
}

impl Outcome {
    /// Creates a success outcome.
    #[must_use]
    pub fn success(response: impl Into<String>) -> Self {
        Self::Success {
            response: response.into(),
        }
    }

    /// Creates a failure outcome.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    /// Flattens a result, keeping only the error's display text.
    #[must_use]
    pub fn from_result<E: fmt::Display>(result: std::result::Result<String, E>) -> Self {
        match result {
            Ok(response) => Self::success(response),
            Err(err) => Self::failure(err.to_string()),
        }
    }

    /// Returns `true` for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Renders the outcome as a single JSON line (without the newline).
    ///
    /// # Errors
    ///
    /// Only fails if serialization itself fails, which does not happen for
    /// string payloads.
    pub fn to_json_line(&self) -> Result<String> {
        to_line(self)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOutcome {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<Outcome> for RawOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success { response } => Self {
                success: true,
                response: Some(response),
                error: None,
            },
            Outcome::Failure { error } => Self {
                success: false,
                response: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<RawOutcome> for Outcome {
    type Error = String;

    fn try_from(raw: RawOutcome) -> std::result::Result<Self, Self::Error> {
        match (raw.success, raw.response, raw.error) {
            (true, Some(response), None) => Ok(Self::Success { response }),
            (false, None, Some(error)) => Ok(Self::Failure { error }),
            (true, _, _) => Err("a successful outcome carries exactly `response`".to_owned()),
            (false, _, _) => Err("a failed outcome carries exactly `error`".to_owned()),
        }
    }
}

/// Writes `", "` between members and `": "` after keys, and escapes every
/// character outside printable ASCII as `\\uXXXX` (UTF-16, lowercase hex).
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            return Ok(());
        }
        writer.write_all(b", ")
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            return Ok(());
        }
        writer.write_all(b", ")
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut rest = fragment;
        while let Some(pos) = rest.find(|c: char| c > '~') {
            writer.write_all(&rest.as_bytes()[..pos])?;
            let Some(c) = rest[pos..].chars().next() else {
                break;
            };
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            rest = &rest[pos + c.len_utf8()..];
        }
        writer.write_all(rest.as_bytes())
    }
}

/// Serializes `value` as one line of JSON using [`SpacedFormatter`].
///
/// # Errors
///
/// Propagates serialization failures of `value`.
pub fn to_line<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| Error::Io(io::Error::other(e)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::LlmError;

    #[test]
    fn success_line_matches_reference_layout() {
        let line = Outcome::success("Mix bananas and flour.").to_json_line().unwrap();
        assert_eq!(line, r#"{"success": true, "response": "Mix bananas and flour."}"#);
    }

    #[test]
    fn failure_line_matches_reference_layout() {
        let line = Outcome::failure("invalid api key").to_json_line().unwrap();
        assert_eq!(line, r#"{"success": false, "error": "invalid api key"}"#);
    }

    #[test]
    fn empty_error_is_kept() {
        let line = Outcome::failure("").to_json_line().unwrap();
        assert_eq!(line, r#"{"success": false, "error": ""}"#);
    }

    #[test]
    fn multiline_text_stays_on_one_line() {
        let line = Outcome::success("step 1\nstep 2\n").to_json_line().unwrap();
        assert!(!line.contains('\n'));
        let back: Outcome = serde_json::from_str(&line).unwrap();
        assert_eq!(back, Outcome::success("step 1\nstep 2\n"));
    }

    #[test]
    fn non_ascii_is_escaped() {
        let line = Outcome::success("Bake at 350°F 🍌").to_json_line().unwrap();
        assert_eq!(
            line,
            r#"{"success": true, "response": "Bake at 350\u00b0F \ud83c\udf4c"}"#
        );
        assert!(line.is_ascii());

        let back: Outcome = serde_json::from_str(&line).unwrap();
        assert_eq!(back, Outcome::success("Bake at 350°F 🍌"));
    }

    #[test]
    fn delete_char_is_escaped() {
        let line = to_line("a\u{7f}b").unwrap();
        assert_eq!(line, r#""a\u007fb""#);
    }

    #[test]
    fn from_result_flattens_errors() {
        let ok: std::result::Result<String, String> = Ok("done".to_owned());
        assert_eq!(Outcome::from_result(ok), Outcome::success("done"));

        let err: std::result::Result<String, Error> =
            Err(LlmError::auth("kronos", "API key is required").into());
        let outcome = Outcome::from_result(err);
        assert!(!outcome.is_success());
        assert_eq!(outcome, Outcome::failure("API key is required"));
    }

    #[test]
    fn rejects_both_keys() {
        let json = r#"{"success": true, "response": "a", "error": "b"}"#;
        assert!(serde_json::from_str::<Outcome>(json).is_err());
    }

    #[test]
    fn rejects_mismatched_flag() {
        assert!(serde_json::from_str::<Outcome>(r#"{"success": false, "response": "a"}"#).is_err());
        assert!(serde_json::from_str::<Outcome>(r#"{"success": true}"#).is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        let json = r#"{"success": false, "error": "x", "code": 1}"#;
        assert!(serde_json::from_str::<Outcome>(json).is_err());
    }

    #[test]
    fn to_line_spaces_arrays() {
        let value = serde_json::json!({"recipes": ["a", "b"]});
        assert_eq!(to_line(&value).unwrap(), r#"{"recipes": ["a", "b"]}"#);
    }
}
