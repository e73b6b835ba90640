//! HTML-to-PDF conversion through an external program

use crate::error::{JournoError, Result};
use std::fs::{self, File};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use wait_timeout::ChildExt;

const STDERR_TAIL_CHARS: usize = 2000;

/// Last `max` characters of `text`
fn tail(text: &str, max: usize) -> &str {
    if max == 0 {
        return "";
    }
    match text.char_indices().rev().nth(max - 1) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

/// Anything that turns a standalone HTML document into PDF bytes
pub trait PdfRenderer {
    fn render(&self, html: &str) -> Result<Vec<u8>>;
}

/// Runs `<program> [args] --quiet <input.html> <output.pdf>` in a scratch
/// directory that is removed afterwards, whatever the outcome.
pub struct CommandRenderer {
    command: String,
    timeout: Duration,
    scratch_root: Option<PathBuf>,
}

impl CommandRenderer {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        CommandRenderer {
            command: command.into(),
            timeout,
            scratch_root: None,
        }
    }

    /// Create scratch directories under `root` instead of the system temp dir
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    fn scratch_dir(&self) -> Result<TempDir> {
        let dir = match &self.scratch_root {
            Some(root) => TempDir::new_in(root),
            None => TempDir::new(),
        };
        dir.map_err(|e| JournoError::Render(format!("Cannot create scratch directory: {}", e)))
    }

    /// Split the configured command into program and leading arguments
    fn parse_command(&self) -> Result<(String, Vec<String>)> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| JournoError::Render("No renderer configured".to_string()))?;
        Ok((program.to_string(), parts.map(str::to_string).collect()))
    }
}

impl PdfRenderer for CommandRenderer {
    fn render(&self, html: &str) -> Result<Vec<u8>> {
        let (program, args) = self.parse_command()?;

        let scratch = self.scratch_dir()?;
        let input = scratch.path().join("entry.html");
        let output = scratch.path().join("entry.pdf");
        let log = scratch.path().join("renderer.log");
        fs::write(&input, html)
            .map_err(|e| JournoError::Render(format!("Cannot write renderer input: {}", e)))?;
        // A file never fills up the way an unread pipe does
        let stderr = File::create(&log)
            .map_err(|e| JournoError::Render(format!("Cannot create renderer log: {}", e)))?;

        let mut child = Command::new(&program)
            .args(&args)
            .arg("--quiet")
            .arg(&input)
            .arg(&output)
            .stdout(Stdio::null())
            .stderr(stderr)
            .spawn()
            .map_err(|e| {
                tracing::warn!(renderer = %program, error = %e, "renderer spawn failed");
                JournoError::Render(format!("Failed to launch renderer '{}': {}", program, e))
            })?;

        match child.wait_timeout(self.timeout) {
            Ok(Some(status)) if status.success() => {}
            Ok(Some(status)) => {
                let stderr = fs::read(&log)
                    .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                    .unwrap_or_default();
                let detail = tail(stderr.trim(), STDERR_TAIL_CHARS);
                tracing::error!(
                    renderer = %program,
                    status = ?status.code(),
                    stderr = %detail,
                    "renderer failed"
                );
                return Err(JournoError::Render(if detail.is_empty() {
                    format!("'{}' exited with {}", program, status)
                } else {
                    format!("'{}' exited with {}: {}", program, status, detail)
                }));
            }
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                tracing::error!(renderer = %program, timeout = ?self.timeout, "renderer timed out");
                return Err(JournoError::Render(format!(
                    "'{}' timed out after {} seconds",
                    program,
                    self.timeout.as_secs()
                )));
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(JournoError::Render(format!(
                    "Failed waiting for '{}': {}",
                    program, e
                )));
            }
        }

        let pdf = fs::read(&output).map_err(|e| {
            JournoError::Render(format!("Renderer produced no output file: {}", e))
        })?;
        tracing::debug!(renderer = %program, bytes = pdf.len(), "rendered PDF");
        Ok(pdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_with_args() {
        let renderer = CommandRenderer::new(
            "  wkhtmltopdf  --enable-local-file-access ",
            Duration::from_secs(1),
        );
        let (program, args) = renderer.parse_command().unwrap();
        assert_eq!(program, "wkhtmltopdf");
        assert_eq!(args, vec!["--enable-local-file-access"]);
    }

    #[test]
    fn test_tail_keeps_the_end() {
        assert_eq!(tail("abcdef", 3), "def");
        assert_eq!(tail("ab", 3), "ab");
        assert_eq!(tail("héllo", 4), "éllo");
    }

    #[test]
    fn test_unusable_scratch_dir_is_render_error() {
        let dir = TempDir::new().unwrap();
        let renderer = CommandRenderer::new("wkhtmltopdf", Duration::from_secs(1))
            .with_scratch_root(dir.path().join("missing"));

        match renderer.render("<html></html>") {
            Err(JournoError::Render(msg)) => assert!(msg.contains("scratch directory")),
            other => panic!("Expected render error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_command_is_render_error() {
        let renderer = CommandRenderer::new("", Duration::from_secs(1));
        assert!(matches!(
            renderer.render("<html></html>"),
            Err(JournoError::Render(_))
        ));
    }

    #[test]
    fn test_missing_program_is_render_error() {
        let renderer = CommandRenderer::new("journo-no-such-renderer", Duration::from_secs(1));
        assert!(matches!(
            renderer.render("<html></html>"),
            Err(JournoError::Render(_))
        ));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::{Path, PathBuf};

        fn script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("fake-renderer");
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn test_render_reads_output_file() {
            let dir = TempDir::new().unwrap();
            // $1 is --quiet, $2 input, $3 output
            let path = script(dir.path(), r#"cp "$2" "$3""#);
            let renderer = CommandRenderer::new(path.to_string_lossy(), Duration::from_secs(5));

            let pdf = renderer.render("<p>hi</p>").unwrap();
            assert_eq!(pdf, b"<p>hi</p>");
        }

        #[test]
        fn test_nonzero_exit_is_render_error() {
            let dir = TempDir::new().unwrap();
            let path = script(dir.path(), "echo broken >&2; exit 3");
            let renderer = CommandRenderer::new(path.to_string_lossy(), Duration::from_secs(5));

            match renderer.render("<p>hi</p>") {
                Err(JournoError::Render(msg)) => assert!(msg.contains("broken")),
                other => panic!("Expected render error, got {:?}", other),
            }
        }

        #[test]
        fn test_noisy_failure_reports_exit_status() {
            let dir = TempDir::new().unwrap();
            // Far more than a pipe buffer holds
            let path = script(
                dir.path(),
                "i=0; while [ $i -lt 4000 ]; do echo 'warning: something odd in the page layout' >&2; i=$((i+1)); done; echo fatal >&2; exit 2",
            );
            let renderer = CommandRenderer::new(path.to_string_lossy(), Duration::from_secs(20));

            match renderer.render("<p>hi</p>") {
                Err(JournoError::Render(msg)) => {
                    assert!(!msg.contains("timed out"));
                    assert!(msg.contains("exited with"));
                    assert!(msg.ends_with("fatal"));
                }
                other => panic!("Expected render error, got {:?}", other),
            }
        }

        #[test]
        fn test_timeout_is_render_error() {
            let dir = TempDir::new().unwrap();
            let path = script(dir.path(), "sleep 5");
            let renderer = CommandRenderer::new(path.to_string_lossy(), Duration::from_millis(200));

            match renderer.render("<p>hi</p>") {
                Err(JournoError::Render(msg)) => assert!(msg.contains("timed out")),
                other => panic!("Expected render error, got {:?}", other),
            }
        }
    }
}
