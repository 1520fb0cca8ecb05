use thiserror::Error;

use crate::scan::{PatientId, ScanId};

#[derive(Error, Debug)]
pub enum RetinaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid image payload: {0}")]
    InvalidPayload(#[from] base64::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Config serialization error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Scan {0} not found")]
    ScanNotFound(ScanId),

    #[error("Patient {0} not found")]
    PatientNotFound(PatientId),

    #[error("Scan {target} is not a comparison candidate for scan {current}")]
    InvalidComparisonTarget { current: ScanId, target: ScanId },

    #[error("No scan selected")]
    NoScanSelected,

    #[error("Session rejected: {0}")]
    Unauthorized(String),

    #[error("Scan repository error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, RetinaError>;
