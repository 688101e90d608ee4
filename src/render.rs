#![allow(missing_docs)]

use pdfium_render::prelude::*;
use std::path::Path;
use tracing::debug;

use crate::error::{EaipError, Result};

/// Rasterization zoom factor; charts are distributed at A4-ish page sizes
/// and 2.8 keeps runway labels legible in chat clients.
pub const DEFAULT_ZOOM: f32 = 2.8;

/// Renders the first page of a chart PDF to PNG bytes.
pub struct ChartRenderer {
    zoom: f32,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self { zoom: DEFAULT_ZOOM }
    }

    pub fn with_zoom(zoom: f32) -> Self {
        Self { zoom }
    }

    /// Rasterize page 1 of `pdf_path` at the configured zoom.
    ///
    /// The PNG is written next to the source PDF, read back, and deleted
    /// again; only the bytes are returned. Runs on the blocking pool
    /// since pdfium is not async-safe.
    pub async fn render_first_page(&self, pdf_path: &Path) -> Result<Vec<u8>> {
        debug!("Rendering chart {}", pdf_path.display());

        let path = pdf_path.to_path_buf();
        let zoom = self.zoom;

        tokio::task::spawn_blocking(move || render_blocking(&path, zoom))
            .await
            .map_err(|e| EaipError::Render(e.to_string()))?
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_blocking(path: &Path, zoom: f32) -> Result<Vec<u8>> {
    let pdfium = Pdfium::new(Pdfium::bind_to_system_library()?);
    let document = pdfium.load_pdf_from_file(path, None)?;
    let page = document.pages().first()?;

    let bitmap = page.render_with_config(&PdfRenderConfig::new().scale_page_by_factor(zoom))?;
    let image = bitmap.as_image().into_rgb8();

    let png_path = path.with_extension("png");
    image.save_with_format(&png_path, image::ImageFormat::Png)?;

    let bytes = std::fs::read(&png_path)?;
    std::fs::remove_file(&png_path)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_zoom() {
        let renderer = ChartRenderer::new();
        assert_eq!(renderer.zoom, DEFAULT_ZOOM);

        let renderer = ChartRenderer::with_zoom(1.0);
        assert_eq!(renderer.zoom, 1.0);
    }
}
