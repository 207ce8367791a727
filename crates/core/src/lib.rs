//! Domain logic for PAN card scanning and account rules.
//!
//! Nothing in this crate knows about HTTP. The API crate wires these pieces
//! behind axum handlers.

pub mod accounts;
pub mod demo_scan;
pub mod error;
pub mod extraction;
pub mod ocr;
pub mod pan;
pub mod preprocess;
pub mod scan;
pub mod tesseract;
pub mod types;
