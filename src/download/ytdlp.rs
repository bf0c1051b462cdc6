//! yt-dlp process lifecycle: version probe, self-update and streamed runs.

use crate::core::config;
use crate::core::config::limits;
use crate::core::error::{AppError, AppResult};
use crate::core::process::run_with_timeout;
use crate::download::error::DownloadFailure;
use std::collections::VecDeque;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

/// Exit code of `yt-dlp -U` when the binary was installed through pip.
const PIP_MANAGED_EXIT_CODE: i32 = 100;

/// Package managers tried, in order, when yt-dlp cannot update itself.
const PIP_COMMANDS: [&str; 2] = ["pip3", "pip"];

/// Returns the version string reported by `<bin> --version`.
pub async fn ytdlp_version(bin: &str) -> AppResult<String> {
    let mut cmd = Command::new(bin);
    cmd.arg("--version");
    let output = run_with_timeout(&mut cmd, config::ytdlp::version_timeout())
        .await
        .map_err(|e| AppError::ToolUnavailable(format!("{}: {}", bin, e)))?;

    if !output.status.success() {
        return Err(AppError::ToolUnavailable(format!(
            "{} --version exited with {:?}",
            bin,
            output.status.code()
        )));
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if version.is_empty() {
        return Err(AppError::ToolUnavailable(format!("{} printed no version", bin)));
    }
    Ok(version)
}

/// Returns true if yt-dlp runs and reports a version.
pub async fn check_installation(bin: &str) -> bool {
    match ytdlp_version(bin).await {
        Ok(version) => {
            log::info!("yt-dlp version: {}", version);
            true
        }
        Err(e) => {
            log::warn!("yt-dlp check failed: {}", e);
            false
        }
    }
}

/// Tries to update yt-dlp: `yt-dlp -U` first, then `pip3`/`pip`.
///
/// Returns `Ok(())` when one of the attempts succeeded.
pub async fn update_ytdlp(bin: &str) -> AppResult<()> {
    log::info!("Updating yt-dlp...");

    let mut cmd = Command::new(bin);
    cmd.arg("-U");
    match run_with_timeout(&mut cmd, config::ytdlp::self_update_timeout()).await {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if stdout.contains("up to date") || stdout.contains("up-to-date") {
                log::info!("yt-dlp is already up to date");
            } else {
                log::info!("yt-dlp update completed: {}", stdout.trim());
            }
            return Ok(());
        }
        Ok(output) if output.status.code() == Some(PIP_MANAGED_EXIT_CODE) => {
            log::info!("yt-dlp is installed via pip, updating through pip");
        }
        Ok(output) => {
            log::warn!(
                "yt-dlp -U failed (exit code: {:?}): {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Err(e) => log::warn!("yt-dlp -U could not run: {}", e),
    }

    update_via_pip().await
}

async fn update_via_pip() -> AppResult<()> {
    let mut last_error = None;

    for pip in PIP_COMMANDS {
        log::debug!("Trying to update yt-dlp via {}...", pip);
        let mut cmd = Command::new(pip);
        cmd.args(["install", "--upgrade", "yt-dlp"]);

        match run_with_timeout(&mut cmd, config::ytdlp::pip_update_timeout()).await {
            Ok(output) if output.status.success() => {
                log::info!("yt-dlp updated via {}", pip);
                return Ok(());
            }
            Ok(output) => {
                last_error = Some(format!(
                    "{} exited with {:?}: {}",
                    pip,
                    output.status.code(),
                    String::from_utf8_lossy(&output.stderr).trim()
                ));
            }
            Err(e) => last_error = Some(format!("{}: {}", pip, e)),
        }
    }

    let error = last_error.unwrap_or_else(|| "no package manager available".to_string());
    log::warn!(
        "Failed to update yt-dlp: {}. Run 'pip install --upgrade yt-dlp' manually.",
        error
    );
    Err(AppError::ToolUnavailable(error))
}

/// Startup gate: makes sure yt-dlp is runnable.
///
/// A failed probe triggers one update attempt and a second probe. Returns the
/// version on success and [`AppError::ToolUnavailable`] otherwise, which the
/// caller treats as fatal.
pub async fn ensure_ready(bin: &str) -> AppResult<String> {
    match ytdlp_version(bin).await {
        Ok(version) => return Ok(version),
        Err(e) => log::warn!("{}. Trying to install an update...", e),
    }

    if let Err(e) = update_ytdlp(bin).await {
        log::warn!("yt-dlp update failed: {}", e);
    }
    ytdlp_version(bin).await
}

/// A finished yt-dlp run.
#[derive(Debug)]
pub struct ToolRun {
    pub status: ExitStatus,
    /// Last lines of combined stdout/stderr, oldest first
    pub tail: VecDeque<String>,
}

impl ToolRun {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Retained output joined with newlines.
    pub fn combined_output(&self) -> String {
        self.tail.iter().map(String::as_str).collect::<Vec<_>>().join("\n")
    }
}

/// Runs `bin args...`, handing every output line to `on_line` as it arrives.
///
/// stdout and stderr are read concurrently so neither pipe can fill up and
/// stall the child. There is no timeout and no retry.
pub async fn run_streaming<F>(bin: &str, args: &[String], mut on_line: F) -> Result<ToolRun, DownloadFailure>
where
    F: FnMut(&str),
{
    log::debug!("Running {} {}", bin, args.join(" "));

    let mut child = Command::new(bin)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| DownloadFailure::Spawn(format!("{}: {}", bin, e)))?;

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    if let Some(stdout) = child.stdout.take() {
        forward_lines(stdout, tx.clone());
    }
    if let Some(stderr) = child.stderr.take() {
        forward_lines(stderr, tx.clone());
    }
    // Channel closes once both readers hit EOF
    drop(tx);

    let mut tail = VecDeque::with_capacity(limits::OUTPUT_TAIL_LINES);
    while let Some(line) = rx.recv().await {
        log::debug!("yt-dlp: {}", line);
        on_line(&line);
        if tail.len() == limits::OUTPUT_TAIL_LINES {
            tail.pop_front();
        }
        tail.push_back(line);
    }

    let status = child
        .wait()
        .await
        .map_err(|e| DownloadFailure::Spawn(format!("waiting for {}: {}", bin, e)))?;

    Ok(ToolRun { status, tail })
}

fn forward_lines<R>(reader: R, tx: mpsc::UnboundedSender<String>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        // Lines are decoded lossily; a non-UTF-8 byte must not stop the reader
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf).trim_end_matches(['\n', '\r']).to_string();
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::warn!("Failed to read yt-dlp output: {}", e);
                    break;
                }
            }
        }
    });
}
