//! Chromium renderer - prints the report with a headless browser.
//!
//! Each render gets its own temporary directory holding the HTML input, the
//! PDF output and the browser profile. The browser is spawned with
//! kill-on-drop, so an error or timeout never leaves a process behind, and
//! the directory is removed when the render returns.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use tokio::process::Command;
use url::Url;

use super::PdfRenderer;
use crate::error::{AppError, Result};

const INPUT_FILE: &str = "report.html";
const OUTPUT_FILE: &str = "report.pdf";

/// Headless Chromium/Chrome renderer.
pub struct ChromiumRenderer {
    browser_path: PathBuf,
    timeout: Duration,
}

impl ChromiumRenderer {
    /// Create a renderer, using `browser_path` when given or probing the
    /// usual install locations otherwise.
    pub fn new(browser_path: Option<PathBuf>, timeout: Duration) -> Self {
        let browser_path = browser_path.unwrap_or_else(Self::find_browser_path);
        tracing::info!("[PDF] Browser path: {:?}", browser_path);
        Self { browser_path, timeout }
    }

    pub fn browser_path(&self) -> &Path {
        &self.browser_path
    }

    /// Check if the browser binary can be started.
    pub fn is_available(&self) -> bool {
        self.browser_path.is_file()
            || std::process::Command::new(&self.browser_path)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .is_ok()
    }

    fn find_browser_path() -> PathBuf {
        let candidates: &[&str] = if cfg!(target_os = "windows") {
            &[
                "chrome.exe",
                "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe",
                "C:\\Program Files (x86)\\Google\\Chrome\\Application\\chrome.exe",
                "C:\\Program Files (x86)\\Microsoft\\Edge\\Application\\msedge.exe",
            ]
        } else if cfg!(target_os = "macos") {
            &[
                "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
                "/Applications/Chromium.app/Contents/MacOS/Chromium",
                "chromium",
            ]
        } else {
            &[
                "chromium",
                "chromium-browser",
                "google-chrome",
                "google-chrome-stable",
                "/usr/bin/chromium",
                "/usr/bin/chromium-browser",
                "/usr/bin/google-chrome",
            ]
        };

        for candidate in candidates {
            let found = Path::new(candidate).is_file()
                || std::process::Command::new(candidate)
                    .arg("--version")
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status()
                    .is_ok();
            if found {
                return PathBuf::from(candidate);
            }
        }

        // Fallback - assume chromium is in PATH
        PathBuf::from("chromium")
    }

    fn browser_args(workdir: &Path, input: &Url, output: &Path) -> Vec<String> {
        vec![
            "--headless=new".to_string(),
            "--disable-gpu".to_string(),
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--no-first-run".to_string(),
            "--no-pdf-header-footer".to_string(),
            "--run-all-compositor-stages-before-draw".to_string(),
            format!("--user-data-dir={}", workdir.join("profile").display()),
            format!("--print-to-pdf={}", output.display()),
            input.to_string(),
        ]
    }
}

#[async_trait]
impl PdfRenderer for ChromiumRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>> {
        let workdir = tempfile::Builder::new()
            .prefix("pagespeed-report-")
            .tempdir()
            .context("Failed to create render directory")?;

        let input = workdir.path().join(INPUT_FILE);
        let output = workdir.path().join(OUTPUT_FILE);
        tokio::fs::write(&input, html)
            .await
            .context("Failed to write report HTML")?;

        let input_url = Url::from_file_path(&input)
            .map_err(|_| AppError::render(format!("Not an absolute path: {:?}", input)))?;

        let start_time = Instant::now();
        let child = Command::new(&self.browser_path)
            .args(Self::browser_args(workdir.path(), &input_url, &output))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn browser at {:?}", self.browser_path))?;

        let result = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.context("Failed to wait for browser")?,
            Err(_) => {
                tracing::warn!("[PDF] Browser timed out after {:?}", self.timeout);
                return Err(AppError::render(format!(
                    "Browser did not finish within {}s",
                    self.timeout.as_secs_f64()
                )));
            }
        };

        tracing::debug!(
            "[PDF] Browser finished in {:.2}ms",
            start_time.elapsed().as_secs_f64() * 1000.0
        );

        let stderr = String::from_utf8_lossy(&result.stderr);
        if !stderr.trim().is_empty() {
            tracing::debug!("[PDF] stderr: {}", stderr.trim());
        }

        if !result.status.success() {
            return Err(AppError::render(format!(
                "Browser exited with {}: {}",
                result.status,
                if stderr.trim().is_empty() { "Unknown error" } else { stderr.trim() }
            )));
        }

        let pdf = tokio::fs::read(&output)
            .await
            .map_err(|e| AppError::render(format!("Browser produced no PDF: {}", e)))?;

        Ok(pdf)
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    // Scripts are created and run from one test so no concurrent fork can
    // inherit a script's write handle.
    #[tokio::test]
    async fn renders_with_fake_browser_and_cleans_up() {
        let scratch = tempfile::tempdir().unwrap();
        let marker = scratch.path().join("output-path");

        let ok = write_script(
            scratch.path(),
            "fake-chromium",
            &format!(
                r#"for arg in "$@"; do
  case "$arg" in
    --print-to-pdf=*) out="${{arg#--print-to-pdf=}}" ;;
  esac
done
printf '%s' "$out" > "{}"
printf '%%PDF-1.4 fake' > "$out""#,
                marker.display()
            ),
        );
        let renderer = ChromiumRenderer::new(Some(ok), Duration::from_secs(10));
        assert!(renderer.is_available());

        let pdf = renderer.render("<html><body>hola</body></html>").await.unwrap();
        assert_eq!(pdf, b"%PDF-1.4 fake");

        let used_output = PathBuf::from(std::fs::read_to_string(&marker).unwrap());
        assert!(!used_output.parent().unwrap().exists(), "render directory was not removed");

        let failing = write_script(scratch.path(), "failing-chromium", "echo 'boom' >&2\nexit 3");
        let renderer = ChromiumRenderer::new(Some(failing), Duration::from_secs(10));
        let err = renderer.render("<html></html>").await.unwrap_err();
        assert!(err.to_string().contains("boom"), "{err}");

        let silent = write_script(scratch.path(), "silent-chromium", "exit 0");
        let renderer = ChromiumRenderer::new(Some(silent), Duration::from_secs(10));
        let err = renderer.render("<html></html>").await.unwrap_err();
        assert!(matches!(err, AppError::Render(_)));

        let slow = write_script(scratch.path(), "slow-chromium", "sleep 5");
        let renderer = ChromiumRenderer::new(Some(slow), Duration::from_millis(200));
        let started = Instant::now();
        let err = renderer.render("<html></html>").await.unwrap_err();
        assert!(err.to_string().contains("did not finish"), "{err}");
        assert!(started.elapsed() < Duration::from_secs(4));

        let missing = ChromiumRenderer::new(
            Some(scratch.path().join("no-such-browser")),
            Duration::from_secs(1),
        );
        assert!(!missing.is_available());
        assert!(matches!(missing.render("<html></html>").await, Err(AppError::Other(_))));
    }
}
