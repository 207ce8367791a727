//! OCR engine abstraction.
//!
//! An [`OcrEngine`] turns image bytes into text plus per-line confidence.
//! Engines are expected to return empty or low-confidence output for
//! unreadable images rather than failing.

use async_trait::async_trait;
use serde::Serialize;

/// One recognized line of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrLine {
    pub text: String,
    /// Engine confidence on a 0-100 scale.
    pub confidence: f64,
}

/// Everything an engine recognized in one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OcrOutput {
    pub text: String,
    pub lines: Vec<OcrLine>,
}

impl OcrOutput {
    /// Build output from lines, joining them into the full text.
    pub fn from_lines(lines: Vec<OcrLine>) -> Self {
        let text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self { text, lines }
    }

    /// Arithmetic mean of the line confidences, 0 when there are no lines.
    pub fn mean_confidence(&self) -> f64 {
        if self.lines.is_empty() {
            return 0.0;
        }
        self.lines.iter().map(|l| l.confidence).sum::<f64>() / self.lines.len() as f64
    }

    pub fn line_texts(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.text.clone()).collect()
    }
}

/// Errors from OCR engines.
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    /// The engine is not installed or cannot be started.
    #[error("OCR backend not available: {0}")]
    BackendNotAvailable(String),

    /// The engine ran but reported a failure.
    #[error("OCR failed: {0}")]
    Failed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A text recognizer.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Recognize text in an encoded image.
    async fn recognize(&self, image: &[u8]) -> Result<OcrOutput, OcrError>;
}
