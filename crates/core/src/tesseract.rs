//! Tesseract OCR engine, driven through the `tesseract` command line.
//!
//! The image is written to a temp file and recognized with TSV output so
//! that word-level confidences are available. Words are grouped back into
//! lines by their (page, block, paragraph, line) position.

use std::time::Instant;

use async_trait::async_trait;
use tokio::process::Command;

use crate::ocr::{OcrEngine, OcrError, OcrLine, OcrOutput};

/// Default executable name.
pub const DEFAULT_BINARY: &str = "tesseract";

/// Default recognition language.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// TSV `level` value for word rows.
const WORD_LEVEL: &str = "5";

/// Number of columns in a Tesseract TSV row.
const TSV_COLUMNS: usize = 12;

/// Tesseract command-line engine.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: String,
    language: String,
}

impl TesseractEngine {
    pub fn new(binary: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY, DEFAULT_LANGUAGE)
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn recognize(&self, image: &[u8]) -> Result<OcrOutput, OcrError> {
        let input = tempfile::Builder::new()
            .prefix("pancheck-ocr-")
            .suffix(".png")
            .tempfile()?;
        tokio::fs::write(input.path(), image).await?;

        let start = Instant::now();
        let output = Command::new(&self.binary)
            .arg(input.path())
            .arg("stdout")
            .args(["-l", &self.language])
            .arg("tsv")
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OcrError::BackendNotAvailable(format!(
                    "{} not found (install tesseract-ocr)",
                    self.binary
                )));
            }
            Err(e) => return Err(OcrError::Io(e)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Failed(format!("tesseract failed: {}", stderr.trim())));
        }

        let recognized = parse_tsv(&String::from_utf8_lossy(&output.stdout));
        tracing::debug!(
            engine = self.name(),
            lines = recognized.lines.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "OCR complete"
        );
        Ok(recognized)
    }
}

/// Parse Tesseract TSV output into lines.
///
/// Only word rows with a non-negative confidence and non-empty text count.
/// A line's confidence is the mean of its word confidences.
pub fn parse_tsv(tsv: &str) -> OcrOutput {
    let mut grouped: Vec<([&str; 4], Vec<(&str, f64)>)> = Vec::new();

    for row in tsv.lines() {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < TSV_COLUMNS || cols[0] != WORD_LEVEL {
            continue;
        }
        let Ok(confidence) = cols[10].trim().parse::<f64>() else {
            continue;
        };
        let word = cols[11].trim();
        if confidence < 0.0 || word.is_empty() {
            continue;
        }

        let key = [cols[1], cols[2], cols[3], cols[4]];
        match grouped.last_mut() {
            Some((last, words)) if *last == key => words.push((word, confidence)),
            _ => grouped.push((key, vec![(word, confidence)])),
        }
    }

    let lines = grouped
        .into_iter()
        .map(|(_, words)| OcrLine {
            text: words.iter().map(|(w, _)| *w).collect::<Vec<_>>().join(" "),
            confidence: words.iter().map(|(_, c)| c).sum::<f64>() / words.len() as f64,
        })
        .collect();

    OcrOutput::from_lines(lines)
}
