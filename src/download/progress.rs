//! Parsing of yt-dlp `--newline` progress lines.

use tokio::sync::mpsc;

/// One progress sample from yt-dlp
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadProgress {
    pub percent: u8,
    pub speed_mbs: Option<f64>,
    pub eta_seconds: Option<u64>,
    pub total_size: Option<u64>,
}

/// Channel the executor publishes progress samples on.
pub type ProgressSender = mpsc::UnboundedSender<DownloadProgress>;

/// Creates a sender whose samples are discarded.
pub fn discard_progress() -> ProgressSender {
    let (tx, _rx) = mpsc::unbounded_channel();
    tx
}

/// Parses progress from yt-dlp output line
/// Example: "[download]  45.2% of 10.00MiB at 500.00KiB/s ETA 00:10"
pub fn parse_progress(line: &str) -> Option<DownloadProgress> {
    if !line.contains("[download]") || !line.contains('%') {
        return None;
    }

    let mut percent = None;
    let mut speed_mbs = None;
    let mut eta_seconds = None;
    let mut total_size = None;

    let parts: Vec<&str> = line.split_whitespace().collect();
    for (i, part) in parts.iter().enumerate() {
        if part.ends_with('%') {
            if let Ok(p) = part.trim_end_matches('%').parse::<f32>() {
                // Garbage percentages are clamped rather than trusted
                percent = Some(p.clamp(0.0, 100.0) as u8);
            }
        }

        let next = parts.get(i + 1).copied();
        match (*part, next) {
            // "of 10.00MiB" or "of ~10.00MiB" for estimated sizes
            ("of", Some(size)) => total_size = parse_size(size.trim_start_matches('~')),
            ("at", Some(speed)) => speed_mbs = parse_size(speed).map(|b| b as f64 / (1024.0 * 1024.0)),
            ("ETA", Some(eta)) => eta_seconds = parse_eta(eta),
            _ => {}
        }
    }

    percent.map(|percent| DownloadProgress {
        percent,
        speed_mbs,
        eta_seconds,
        total_size,
    })
}

/// Parses a size such as "10.00MiB" or "500.00KiB/s" into bytes
fn parse_size(size_str: &str) -> Option<u64> {
    let size_str = size_str.trim_end_matches("/s");
    let units: [(&str, f64); 4] = [
        ("GiB", 1024.0 * 1024.0 * 1024.0),
        ("MiB", 1024.0 * 1024.0),
        ("KiB", 1024.0),
        ("B", 1.0),
    ];
    units.iter().find_map(|(suffix, factor)| {
        size_str
            .strip_suffix(suffix)
            .and_then(|n| n.parse::<f64>().ok())
            .map(|n| (n * factor) as u64)
    })
}

/// Parses an ETA such as "00:10" or "1:02:03" into seconds
fn parse_eta(eta_str: &str) -> Option<u64> {
    let mut total = 0u64;
    let mut count = 0;
    for part in eta_str.split(':') {
        total = total * 60 + part.parse::<u64>().ok()?;
        count += 1;
    }
    (2..=3).contains(&count).then_some(total)
}
