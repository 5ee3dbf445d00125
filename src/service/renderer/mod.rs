//! HTML to PDF rendering.
//!
//! The report core only needs "self-contained HTML in, PDF bytes out".
//! `ChromiumRenderer` does this with a headless browser process; tests swap
//! in their own implementation.

mod chromium;

pub use chromium::ChromiumRenderer;

use async_trait::async_trait;

use crate::error::Result;

/// Strategy trait for turning a report document into PDF bytes.
///
/// Implementations must release every resource they acquire (processes,
/// temporary files) before returning, on success and on error.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Convert a self-contained HTML document to PDF bytes.
    async fn render(&self, html: &str) -> Result<Vec<u8>>;

    /// Human-readable name for this renderer.
    fn name(&self) -> &'static str;
}
