/// Truncates `text` to at most `max_chars` characters, appending `...` when cut.
///
/// Works on characters, not bytes, so titles in any script are safe to cut.
///
/// # Example
///
/// ```
/// use tubedrop::core::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello, world", 5), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 5), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Formats a duration in seconds as `m:ss` (minutes are not wrapped into hours).
///
/// Returns `Unknown` for a zero or missing duration.
pub fn format_duration(seconds: Option<u64>) -> String {
    match seconds {
        Some(s) if s > 0 => format!("{}:{:02}", s / 60, s % 60),
        _ => "Unknown".to_string(),
    }
}

/// Formats a duration in seconds as `Xh Ym Zs`, the console style of the CLI.
pub fn format_duration_long(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{}h {}m {}s", hours, minutes, secs)
}

/// Formats a view count with thousands separators (`1,234,567`).
///
/// Returns `Unknown` for a zero or missing count.
pub fn format_views(views: Option<u64>) -> String {
    match views {
        Some(v) if v > 0 => {
            let digits = v.to_string();
            let mut out = String::with_capacity(digits.len() + digits.len() / 3);
            for (i, c) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    out.push(',');
                }
                out.push(c);
            }
            out
        }
        _ => "Unknown".to_string(),
    }
}

/// Bytes as mebibytes with one decimal (`12.3`).
pub fn format_mib(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / (1024.0 * 1024.0))
}
