//! PAN number format and date-of-birth rules.
//!
//! A PAN is five uppercase letters, four digits and one uppercase letter
//! (e.g. `ABCDE1234F`). Birth dates must be real calendar dates, not in the
//! future and not before [`MIN_BIRTH_YEAR`].

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Anchored PAN format.
pub const PAN_PATTERN: &str = r"^[A-Z]{5}[0-9]{4}[A-Z]$";

/// Length of a PAN in characters.
pub const PAN_LENGTH: usize = 10;

/// Earliest accepted birth year.
pub const MIN_BIRTH_YEAR: i32 = 1900;

/// Date format accepted on the verification form.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format expected by the KYC provider.
pub const PROVIDER_DATE_FORMAT: &str = "%d/%m/%Y";

static PAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(PAN_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// PAN format
// ---------------------------------------------------------------------------

/// Whether `pan` is exactly a well-formed PAN.
pub fn is_valid_pan(pan: &str) -> bool {
    PAN_RE.is_match(pan)
}

/// Try to turn a 10-character OCR reading into a well-formed PAN.
///
/// OCR engines routinely confuse `0`/`O`, `1`/`I`, `5`/`S`, `8`/`B` and
/// `2`/`Z`. Since a PAN has a fixed letter/digit layout, each position can be
/// coerced to the expected class. Returns `None` if the result still does
/// not match [`PAN_PATTERN`].
pub fn repair_pan(candidate: &str) -> Option<String> {
    let chars: Vec<char> = candidate.trim().to_uppercase().chars().collect();
    if chars.len() != PAN_LENGTH {
        return None;
    }

    let repaired: String = chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            if (5..9).contains(&i) {
                as_digit(c)
            } else {
                as_letter(c)
            }
        })
        .collect();

    is_valid_pan(&repaired).then_some(repaired)
}

fn as_digit(c: char) -> char {
    match c {
        'O' | 'D' | 'Q' => '0',
        'I' | 'L' => '1',
        'Z' => '2',
        'S' => '5',
        'B' => '8',
        other => other,
    }
}

fn as_letter(c: char) -> char {
    match c {
        '0' => 'O',
        '1' => 'I',
        '2' => 'Z',
        '5' => 'S',
        '8' => 'B',
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Today's date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Whether `date` is an acceptable date of birth relative to `today`.
pub fn is_plausible_birth_date(date: NaiveDate, today: NaiveDate) -> bool {
    date <= today && date.year() >= MIN_BIRTH_YEAR
}

/// Build a birth date from raw numeric components.
///
/// Rejects impossible dates (e.g. 31 February) and anything outside the
/// plausible range.
pub fn birth_date_from_parts(year: i32, month: u32, day: u32, today: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).filter(|d| is_plausible_birth_date(*d, today))
}

/// Normalize a `DD/MM/YYYY`, `DD-MM-YYYY`, `YYYY/MM/DD` or `YYYY-MM-DD`
/// string to ISO `YYYY-MM-DD`.
///
/// The layout is chosen by the width of the first component. Returns `None`
/// for malformed or implausible dates.
pub fn normalize_birth_date(raw: &str, today: NaiveDate) -> Option<String> {
    let parts: Vec<&str> = raw.trim().split(['/', '-']).collect();
    let [first, second, third] = parts.as_slice() else {
        return None;
    };

    let (year, month, day) = if first.len() == 4 {
        (*first, *second, *third)
    } else {
        (*third, *second, *first)
    };

    let date = birth_date_from_parts(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?, today)?;
    Some(date.format(ISO_DATE_FORMAT).to_string())
}

/// Parse a strict ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), ISO_DATE_FORMAT).map_err(|_| {
        CoreError::Validation(format!(
            "Date of birth must be in YYYY-MM-DD format (got '{raw}')"
        ))
    })
}

/// Reformat an ISO `YYYY-MM-DD` date as `DD/MM/YYYY`.
pub fn iso_to_provider_date(raw: &str) -> Result<String, CoreError> {
    Ok(parse_iso_date(raw)?.format(PROVIDER_DATE_FORMAT).to_string())
}
