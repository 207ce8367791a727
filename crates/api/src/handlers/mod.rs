pub mod auth;
pub mod ocr;
pub mod verify;
