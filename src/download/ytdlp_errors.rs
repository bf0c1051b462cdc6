//! Classification of yt-dlp error output.
//!
//! The rules are an ordered table of `(pattern, category)` pairs evaluated
//! top to bottom against the lowercased output; the first match wins and
//! anything unmatched falls through to [`FailureCategory::Generic`].
//!
//! Only the `ERROR:` lines of a run are classified when there are any, so
//! retry warnings and titles echoed in `Destination:` lines cannot decide
//! the category.

use crate::download::error::DownloadFailure;

/// Categories a failed yt-dlp run is sorted into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Restricted,
    Private,
    Unavailable,
    AgeRestricted,
    Generic,
}

/// Ordered classification rules. Patterns are lowercase.
pub const FAILURE_RULES: &[(&str, FailureCategory)] = &[
    ("http error 403", FailureCategory::Restricted),
    ("private video", FailureCategory::Private),
    ("video unavailable", FailureCategory::Unavailable),
    ("sign in to confirm your age", FailureCategory::AgeRestricted),
];

/// Returns the category of the first rule matching `output`.
pub fn classify(output: &str) -> FailureCategory {
    let lower = output.to_lowercase();
    FAILURE_RULES
        .iter()
        .find(|(pattern, _)| lower.contains(pattern))
        .map(|(_, category)| *category)
        .unwrap_or(FailureCategory::Generic)
}

/// Joins the `ERROR:` lines of `output`, or `None` when there are none.
pub fn error_lines(output: &str) -> Option<String> {
    let errors: Vec<&str> = output
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with("ERROR:"))
        .collect();
    (!errors.is_empty()).then(|| errors.join("\n"))
}

/// Picks the line worth showing to a user: the last `ERROR:` line, or the
/// last non-empty line when yt-dlp printed no explicit error.
pub fn error_summary(output: &str) -> Option<String> {
    let lines: Vec<&str> = output.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    lines
        .iter()
        .rev()
        .find_map(|l| l.strip_prefix("ERROR:").map(str::trim))
        .or_else(|| lines.last().copied())
        .map(str::to_string)
}

/// Turns the output of a failed run into a [`DownloadFailure`].
///
/// A non-zero exit with no output at all still yields a failure that names
/// the exit code.
pub fn failure_from_output(output: &str, exit_code: Option<i32>) -> DownloadFailure {
    let errors = error_lines(output);
    match classify(errors.as_deref().unwrap_or(output)) {
        FailureCategory::Restricted => DownloadFailure::Restricted,
        FailureCategory::Private => DownloadFailure::Private,
        FailureCategory::Unavailable => DownloadFailure::Unavailable,
        FailureCategory::AgeRestricted => DownloadFailure::AgeRestricted,
        FailureCategory::Generic => {
            let summary = error_summary(output).unwrap_or_else(|| match exit_code {
                Some(code) => format!("yt-dlp exited with status {}", code),
                None => "yt-dlp was terminated by a signal".to_string(),
            });
            DownloadFailure::Tool(summary)
        }
    }
}
