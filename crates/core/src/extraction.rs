//! PAN card field extraction from OCR text.
//!
//! Extraction is an ordered list of independent [`ExtractionRule`]s. Each
//! rule targets one [`PanField`]. For every field the rules are tried in list
//! order, and the first candidate that passes that field's acceptance check
//! wins. Fields never influence each other. A field with no accepted
//! candidate is reported as [`NOT_FOUND`], so a partial result is always
//! returned.

use std::cmp::Reverse;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::pan::{is_valid_pan, normalize_birth_date, repair_pan, today};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Sentinel for a field no rule could fill.
pub const NOT_FOUND: &str = "NOT_FOUND";

/// Lines containing any of these are never treated as the holder name.
/// OCR often merges card headers into one run, so they match anywhere in a
/// line.
pub const NAME_NOISE_FRAGMENTS: &[&str] = &["DATE", "INCOME", "TAX", "DEPARTMENT"];

/// Noise that only disqualifies a line as a separate word (`PANKAJ` is a name).
pub const NAME_NOISE_WORDS: &[&str] = &["PAN"];

/// Bounds (inclusive, in characters) for a line to be considered a name.
pub const MIN_NAME_LENGTH: usize = 3;
pub const MAX_NAME_LENGTH: usize = 50;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Structured fields read off a PAN card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedPanData {
    pub pan_number: String,
    pub name: String,
    /// ISO `YYYY-MM-DD`.
    pub date_of_birth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ExtractedPanData {
    /// A result with every field set to [`NOT_FOUND`].
    pub fn not_found() -> Self {
        Self {
            pan_number: NOT_FOUND.to_string(),
            name: NOT_FOUND.to_string(),
            date_of_birth: NOT_FOUND.to_string(),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Whether every field was found.
    pub fn is_complete(&self) -> bool {
        [&self.pan_number, &self.name, &self.date_of_birth]
            .iter()
            .all(|v| v.as_str() != NOT_FOUND)
    }

    pub fn get(&self, field: PanField) -> &str {
        match field {
            PanField::PanNumber => &self.pan_number,
            PanField::Name => &self.name,
            PanField::DateOfBirth => &self.date_of_birth,
        }
    }

    fn set(&mut self, field: PanField, value: String) {
        match field {
            PanField::PanNumber => self.pan_number = value,
            PanField::Name => self.name = value,
            PanField::DateOfBirth => self.date_of_birth = value,
        }
    }
}

/// A field on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanField {
    PanNumber,
    Name,
    DateOfBirth,
}

impl PanField {
    pub const ALL: [PanField; 3] = [PanField::PanNumber, PanField::Name, PanField::DateOfBirth];
}

enum Matcher {
    /// Every match of the pattern over the full text, in order. Capture
    /// group 1 is the value when present, otherwise the whole match.
    Pattern(Regex),
    /// Letters-and-spaces lines free of noise words, longest first.
    NameLines,
    /// The first match of the pattern on each line, top to bottom.
    PatternLines(Regex),
}

/// One way of finding a value for one field.
pub struct ExtractionRule {
    pub field: PanField,
    pub name: &'static str,
    matcher: Matcher,
}

impl ExtractionRule {
    /// A rule that searches the whole (uppercased) text with `pattern`.
    pub fn new(field: PanField, name: &'static str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            field,
            name,
            matcher: Matcher::Pattern(Regex::new(pattern)?),
        })
    }

    /// The line-scanning heuristic for the holder name.
    pub fn name_lines() -> Self {
        Self {
            field: PanField::Name,
            name: "name_line",
            matcher: Matcher::NameLines,
        }
    }

    /// A rule that tries `pattern` against each line in turn.
    pub fn per_line(
        field: PanField,
        name: &'static str,
        pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            field,
            name,
            matcher: Matcher::PatternLines(Regex::new(pattern)?),
        })
    }

    fn builtin(field: PanField, name: &'static str, pattern: &str) -> Self {
        Self::new(field, name, pattern).expect("valid regex")
    }

    /// Raw candidate values in preference order.
    fn candidates(&self, text: &str, lines: &[String]) -> Vec<String> {
        match &self.matcher {
            Matcher::Pattern(re) => re
                .captures_iter(text)
                .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
                .map(|m| m.as_str().to_string())
                .collect(),
            Matcher::NameLines => name_line_candidates(lines),
            Matcher::PatternLines(re) => lines
                .iter()
                .filter_map(|line| re.captures(line))
                .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
                .map(|m| m.as_str().to_string())
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default rule set
// ---------------------------------------------------------------------------

static DEFAULT_RULES: LazyLock<Vec<ExtractionRule>> = LazyLock::new(|| {
    use PanField::*;

    const DATE: &str = r"(\d{2}[/-]\d{2}[/-]\d{4})";

    vec![
        ExtractionRule::builtin(PanNumber, "pan_bare", r"[A-Z]{5}[0-9]{4}[A-Z]"),
        ExtractionRule::builtin(PanNumber, "pan_label", r"\bPAN\b[:\s]*([A-Z0-9]{10})"),
        ExtractionRule::builtin(
            PanNumber,
            "permanent_account_number_label",
            r"PERMANENT[:\s]*ACCOUNT[:\s]*NUMBER[:\s]*(?:CARD)?[:\s]*([A-Z0-9]{10})",
        ),
        ExtractionRule::builtin(Name, "name_label", r"\bNAME\b[:\s]*([A-Z][A-Z ]{2,})"),
        ExtractionRule::builtin(
            Name,
            "card_holder_name_label",
            r"CARD[:\s]*HOLDER[:\s]*NAME[:\s]*([A-Z][A-Z ]{2,})",
        ),
        ExtractionRule::builtin(
            Name,
            "holder_name_label",
            r"HOLDER[:\s]*NAME[:\s]*([A-Z][A-Z ]{2,})",
        ),
        ExtractionRule::name_lines(),
        ExtractionRule::builtin(
            DateOfBirth,
            "date_of_birth_label",
            &format!(r"DATE[:\s]*OF[:\s]*BIRTH[:\s]*{DATE}"),
        ),
        ExtractionRule::builtin(DateOfBirth, "dob_label", &format!(r"\bDOB[:\s]*{DATE}")),
        ExtractionRule::builtin(
            DateOfBirth,
            "birth_date_label",
            &format!(r"BIRTH[:\s]*DATE[:\s]*{DATE}"),
        ),
        ExtractionRule::builtin(DateOfBirth, "date_day_first", &format!(r"\b{DATE}\b")),
        ExtractionRule::builtin(
            DateOfBirth,
            "date_year_first",
            r"\b(\d{4}[/-]\d{2}[/-]\d{2})\b",
        ),
        // Unanchored, so dates glued to OCR noise still match.
        ExtractionRule::per_line(DateOfBirth, "date_line", r"(\d{2}/\d{2}/\d{4})")
            .expect("valid regex"),
    ]
});

/// The built-in rule list, in evaluation order.
pub fn default_rules() -> &'static [ExtractionRule] {
    &DEFAULT_RULES
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract card fields with the built-in rules.
///
/// `lines` are the per-line OCR readings. When empty, the text is split on
/// newlines instead.
pub fn extract_pan_data(text: &str, lines: &[String]) -> ExtractedPanData {
    extract_with_rules(default_rules(), text, lines, today())
}

/// Extract card fields with an explicit rule list and reference date.
pub fn extract_with_rules(
    rules: &[ExtractionRule],
    text: &str,
    lines: &[String],
    today: NaiveDate,
) -> ExtractedPanData {
    let text = text.to_uppercase();
    let lines: Vec<String> = if lines.is_empty() {
        text.lines().map(str::to_string).collect()
    } else {
        lines.iter().map(|l| l.to_uppercase()).collect()
    };

    let mut data = ExtractedPanData::not_found();

    for field in PanField::ALL {
        let hit = rules.iter().filter(|r| r.field == field).find_map(|rule| {
            rule.candidates(&text, &lines)
                .into_iter()
                .find_map(|raw| accept(field, &raw, today))
                .map(|value| (rule.name, value))
        });

        match hit {
            Some((rule, value)) => {
                tracing::debug!(?field, rule, "Field extracted");
                data.set(field, value);
            }
            None => tracing::debug!(?field, "Field not found"),
        }
    }

    data
}

/// Field-specific validation and normalization of a raw candidate.
fn accept(field: PanField, raw: &str, today: NaiveDate) -> Option<String> {
    match field {
        PanField::PanNumber => {
            let raw = raw.trim();
            if is_valid_pan(raw) {
                Some(raw.to_string())
            } else {
                repair_pan(raw)
            }
        }
        PanField::Name => {
            let name = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            (name.chars().count() >= MIN_NAME_LENGTH).then_some(name)
        }
        PanField::DateOfBirth => normalize_birth_date(raw, today),
    }
}

/// Lines that could be the holder name, longest first.
fn name_line_candidates(lines: &[String]) -> Vec<String> {
    let mut candidates: Vec<String> = lines
        .iter()
        .map(|line| {
            line.chars()
                .filter(|c| c.is_ascii_uppercase() || c.is_whitespace())
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| {
            let len = line.chars().count();
            (MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len)
                && !NAME_NOISE_FRAGMENTS.iter().any(|f| line.contains(f))
                && !line
                    .split(' ')
                    .any(|word| NAME_NOISE_WORDS.contains(&word))
        })
        .collect();

    candidates.sort_by_key(|line| Reverse(line.chars().count()));
    candidates
}
