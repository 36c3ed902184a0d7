//! PDF to image conversion
//!
//! Renders the first page of every PDF in a directory to a grayscale PNG.
//! A file that fails to render is logged and recorded in the summary; the
//! batch carries on with the next file.

use crate::batch::{BatchProgress, BatchSummary, FileOutcome, ProgressCallback};
use crate::error::{DatasetError, Result};
use crate::files::{count_entries, ensure_dir, list_files};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Default rendering resolution
pub const DEFAULT_DPI: u16 = 400;

/// Options for PDF conversion
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Rendering resolution in dots per inch
    pub dpi: u16,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self { dpi: DEFAULT_DPI }
    }
}

impl ConvertOptions {
    /// Set the rendering resolution
    pub fn with_dpi(mut self, dpi: u16) -> Self {
        self.dpi = dpi;
        self
    }
}

/// Rasterizes the first page of a PDF
pub trait PageRenderer {
    /// Render page 1 of `pdf` as a grayscale PNG inside `out_dir`.
    ///
    /// Returns the path of the written image.
    fn render_first_page(&self, pdf: &Path, out_dir: &Path, dpi: u16) -> Result<PathBuf>;
}

impl<T: PageRenderer + ?Sized> PageRenderer for &T {
    fn render_first_page(&self, pdf: &Path, out_dir: &Path, dpi: u16) -> Result<PathBuf> {
        (**self).render_first_page(pdf, out_dir, dpi)
    }
}

/// Whether a directory entry is submitted to the renderer
pub fn is_pdf(file_name: &str) -> bool {
    file_name.ends_with(".pdf")
}

/// Convert every PDF of `src_dir` into `out_dir`.
///
/// `make_renderer` is only called when the directory holds at least one PDF.
/// Per-file render failures end up in the returned summary; listing the
/// source, creating the output directory and binding the renderer are fatal.
pub fn convert_pdfs<R, F>(
    src_dir: &Path,
    out_dir: &Path,
    options: &ConvertOptions,
    make_renderer: F,
    progress: Option<&dyn ProgressCallback>,
) -> Result<BatchSummary>
where
    R: PageRenderer,
    F: FnOnce() -> Result<R>,
{
    if options.dpi == 0 {
        return Err(DatasetError::InvalidDpi(options.dpi));
    }

    let start_time = Instant::now();
    ensure_dir(out_dir)?;

    let entry_count = count_entries(src_dir)?;
    let pdfs: Vec<String> = list_files(src_dir)?
        .into_iter()
        .filter(|name| is_pdf(name))
        .collect();

    if pdfs.is_empty() {
        tracing::info!("No PDF files found in {}", src_dir.display());
        return Ok(BatchSummary::from_outcomes(Vec::new(), start_time.elapsed()));
    }

    let renderer = make_renderer()?;
    let mut tracker = BatchProgress::new(entry_count, progress);
    let mut outcomes = Vec::with_capacity(pdfs.len());

    for file in pdfs {
        tracker.start_file();
        let file_start = Instant::now();

        let outcome = match renderer.render_first_page(&src_dir.join(&file), out_dir, options.dpi) {
            Ok(output) => FileOutcome::Converted {
                file,
                duration: file_start.elapsed(),
                output,
            },
            Err(e) => {
                tracing::warn!("Failed to convert {}: {}", file, e);
                FileOutcome::Failed {
                    file,
                    duration: file_start.elapsed(),
                    error: e.to_string(),
                }
            }
        };
        outcomes.push(outcome);
    }

    let summary = BatchSummary::from_outcomes(outcomes, start_time.elapsed());
    tracing::info!(
        "Converted {}/{} PDF files from {}",
        summary.successful,
        summary.total,
        src_dir.display()
    );
    Ok(summary)
}

/// Convert with PDFium bound from `./` or the system library path
#[cfg(feature = "pdfium")]
pub fn convert_pdfs_with_pdfium(
    src_dir: &Path,
    out_dir: &Path,
    options: &ConvertOptions,
    progress: Option<&dyn ProgressCallback>,
) -> Result<BatchSummary> {
    convert_pdfs(src_dir, out_dir, options, PdfiumRenderer::bind, progress)
}

#[cfg(feature = "pdfium")]
pub use self::pdfium::PdfiumRenderer;

/// Write a row-major 8-bit grayscale buffer to `output` as PNG
#[cfg(feature = "pdfium")]
pub fn save_grayscale_png(width: u32, height: u32, pixels: Vec<u8>, output: &Path) -> Result<()> {
    let image_error = |message: String| DatasetError::ImageWrite {
        path: output.to_path_buf(),
        message,
    };

    let gray = image::GrayImage::from_raw(width, height, pixels).ok_or_else(|| {
        image_error(format!("pixel buffer does not fit a {width}x{height} image"))
    })?;
    gray.save_with_format(output, image::ImageFormat::Png)
        .map_err(|e| image_error(e.to_string()))
}

#[cfg(feature = "pdfium")]
mod pdfium {
    use super::{save_grayscale_png, PageRenderer};
    use crate::error::{DatasetError, Result};
    use crate::key::FileKey;
    use pdfium_render::prelude::*;
    use std::path::{Path, PathBuf};

    /// PDF points per inch
    const POINTS_PER_INCH: f32 = 72.0;

    /// Renderer backed by a dynamically loaded PDFium
    pub struct PdfiumRenderer {
        pdfium: Pdfium,
    }

    impl PdfiumRenderer {
        /// Bind PDFium, trying the working directory before system paths
        pub fn bind() -> Result<Self> {
            let bindings =
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                    .or_else(|_| Pdfium::bind_to_system_library())
                    .map_err(|e| {
                        DatasetError::RendererUnavailable(format!(
                            "failed to load the PDFium library: {e:?}"
                        ))
                    })?;

            Ok(Self {
                pdfium: Pdfium::new(bindings),
            })
        }
    }

    impl PageRenderer for PdfiumRenderer {
        fn render_first_page(&self, pdf: &Path, out_dir: &Path, dpi: u16) -> Result<PathBuf> {
            let render_error = |message: String| DatasetError::Render {
                file: pdf.to_path_buf(),
                message,
            };

            let document = self
                .pdfium
                .load_pdf_from_file(pdf, None)
                .map_err(|e| render_error(format!("cannot load PDF: {e:?}")))?;
            let page = document
                .pages()
                .get(0)
                .map_err(|e| render_error(format!("cannot read first page: {e:?}")))?;

            let scale = f32::from(dpi) / POINTS_PER_INCH;
            let config = PdfRenderConfig::new()
                .set_target_width((page.width().value * scale).round() as i32)
                .set_target_height((page.height().value * scale).round() as i32)
                .use_grayscale_rendering(true)
                .render_form_data(true)
                .render_annotations(true);

            let bitmap = page
                .render_with_config(&config)
                .map_err(|e| render_error(format!("cannot render page: {e:?}")))?;

            let name = pdf
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            let output = out_dir.join(format!("{}.png", FileKey::from_file_name(name)));

            let gray = bitmap.as_image().into_luma8();
            save_grayscale_png(gray.width(), gray.height(), gray.into_raw(), &output)?;

            Ok(output)
        }
    }
}
