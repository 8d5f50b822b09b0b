//! External tool invocation shared by the audio and office handlers.

use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::converter::error::ConversionError;

/// Why a tool run did not produce an exit status.
#[derive(Debug)]
pub(crate) enum ToolError {
    /// The binary could not be located.
    NotFound(std::io::Error),
    /// Spawning or waiting failed for another reason.
    Io(std::io::Error),
    /// The run exceeded the configured timeout and was killed.
    TimedOut(Duration),
}

impl ToolError {
    /// Converts into a conversion error naming the tool.
    pub(crate) fn into_conversion_error(self, tool: &str, path: &Path) -> ConversionError {
        match self {
            Self::NotFound(e) => ConversionError::conversion_failed(
                format!("{} could not be started from {:?}: {}", tool, path, e),
                None,
            ),
            Self::Io(e) => ConversionError::Io(e),
            Self::TimedOut(limit) => ConversionError::conversion_failed(
                format!("{} timed out after {} seconds", tool, limit.as_secs()),
                None,
            ),
        }
    }
}

/// Runs `program args..` with stdin closed and output captured.
///
/// Without a timeout the call waits for the tool however long it takes.
pub(crate) async fn run_tool(
    program: &Path,
    args: &[String],
    limit: Option<Duration>,
) -> Result<Output, ToolError> {
    debug!("Running {:?} {}", program, args.join(" "));

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ToolError::NotFound(e)
            } else {
                ToolError::Io(e)
            }
        })?;

    let output = match limit {
        // Dropping the future on timeout drops the child, which kills it.
        Some(limit) => timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| ToolError::TimedOut(limit))?,
        None => child.wait_with_output().await,
    };

    output.map_err(ToolError::Io)
}

/// Returns the captured stderr, or `None` when it is blank.
pub(crate) fn stderr_text(output: &Output) -> Option<String> {
    let text = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_missing_binary() {
        let program = PathBuf::from("/nonexistent/tool");
        let err = run_tool(&program, &[], None).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));

        let converted = err.into_conversion_error("FFmpeg", &program);
        assert!(matches!(converted, ConversionError::ConversionFailed { .. }));
        assert!(converted.to_string().contains("FFmpeg could not be started"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stderr() {
        let args = vec!["-c".to_string(), "echo oops >&2; exit 3".to_string()];
        let output = run_tool(Path::new("sh"), &args, None).await.unwrap();
        assert_eq!(output.status.code(), Some(3));
        assert_eq!(stderr_text(&output), Some("oops".to_string()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_tool() {
        let args = vec!["5".to_string()];
        let err = run_tool(Path::new("sleep"), &args, Some(Duration::from_millis(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::TimedOut(_)));
    }
}
