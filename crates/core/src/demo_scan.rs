//! Canned scan results for the demonstration extraction endpoint.
//!
//! The demo endpoint does not look at the uploaded image. It returns one of
//! these records at random. Each record is checked against the same PAN and
//! birth-date rules as a real scan before it is handed out.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::CoreError;
use crate::extraction::ExtractedPanData;
use crate::pan::{is_plausible_birth_date, is_valid_pan, parse_iso_date, today};

/// A fixed demo result.
#[derive(Debug, Clone, Copy)]
pub struct DemoScan {
    pub pan_number: &'static str,
    pub name: &'static str,
    /// ISO `YYYY-MM-DD`.
    pub date_of_birth: &'static str,
    /// 0-1 scale.
    pub confidence: f64,
}

pub const DEMO_SCANS: [DemoScan; 5] = [
    DemoScan {
        pan_number: "ABCDE1234F",
        name: "JOHN RONALD DOE",
        date_of_birth: "1990-05-15",
        confidence: 0.95,
    },
    DemoScan {
        pan_number: "XYZAB5678G",
        name: "JANE SMITH",
        date_of_birth: "1985-12-20",
        confidence: 0.92,
    },
    DemoScan {
        pan_number: "PQRST9012H",
        name: "MICHAEL BROWN",
        date_of_birth: "1978-08-10",
        confidence: 0.88,
    },
    DemoScan {
        pan_number: "LMNOP3456I",
        name: "SARAH WILSON",
        date_of_birth: "1992-03-25",
        confidence: 0.91,
    },
    DemoScan {
        pan_number: "UVWXY7890J",
        name: "DAVID JOHNSON",
        date_of_birth: "1980-11-08",
        confidence: 0.89,
    },
];

impl DemoScan {
    /// Check the record and convert it to an extraction result.
    pub fn validated(&self) -> Result<ExtractedPanData, CoreError> {
        if !is_valid_pan(self.pan_number) {
            return Err(CoreError::Internal(format!(
                "Invalid PAN number format detected: {}",
                self.pan_number
            )));
        }

        let dob = parse_iso_date(self.date_of_birth)
            .map_err(|e| CoreError::Internal(format!("Invalid date format detected: {e}")))?;
        if !is_plausible_birth_date(dob, today()) {
            return Err(CoreError::Internal(format!(
                "Implausible date of birth detected: {}",
                self.date_of_birth
            )));
        }

        Ok(ExtractedPanData {
            pan_number: self.pan_number.to_string(),
            name: self.name.to_string(),
            date_of_birth: self.date_of_birth.to_string(),
            confidence: Some(self.confidence),
        })
    }
}

/// Pick a demo result at random.
pub fn pick_demo_scan<R: Rng + ?Sized>(rng: &mut R) -> Result<ExtractedPanData, CoreError> {
    DEMO_SCANS
        .choose(rng)
        .ok_or_else(|| CoreError::Internal("No demo scans configured".to_string()))?
        .validated()
}
