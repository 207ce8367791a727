//! The card scanning pipeline: preprocess, recognize, extract.

use crate::extraction::{extract_pan_data, ExtractedPanData};
use crate::ocr::{OcrEngine, OcrError};
use crate::preprocess::{preprocess_image, PreprocessError};

/// Errors from [`scan_pan_card`].
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),

    #[error(transparent)]
    Ocr(#[from] OcrError),

    /// The blocking preprocessing task panicked or was cancelled.
    #[error("Preprocessing task failed: {0}")]
    Task(String),
}

/// Run a photo of a PAN card through the full pipeline.
///
/// Missing fields come back as `NOT_FOUND`. Only a bad image or a broken
/// engine is an error. The result's confidence is the OCR mean line
/// confidence (0-100).
pub async fn scan_pan_card(
    engine: &dyn OcrEngine,
    image: &[u8],
    contrast: f64,
) -> Result<ExtractedPanData, ScanError> {
    let owned = image.to_vec();
    let processed = tokio::task::spawn_blocking(move || preprocess_image(&owned, contrast))
        .await
        .map_err(|e| ScanError::Task(e.to_string()))??;

    let recognized = engine.recognize(&processed).await?;
    tracing::debug!(
        engine = engine.name(),
        lines = recognized.lines.len(),
        "Recognized card text"
    );

    let data = extract_pan_data(&recognized.text, &recognized.line_texts())
        .with_confidence(recognized.mean_confidence());
    Ok(data)
}
