#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use image::{Rgba, RgbaImage};

use retina_core::io::image_io::encode_payload;
use retina_core::repository::Session;
use retina_core::scan::{PatientId, PatientRef, Scan, ScanId, ScanStatus};

/// Noon UTC on the given day.
pub fn day(year: i32, month: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, d, 12, 0, 0).unwrap()
}

/// Solid-colour image encoded as a base64 PNG payload.
pub fn solid_payload(width: u32, height: u32, rgb: [u8; 3]) -> String {
    let img = RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]));
    encode_payload(&img).unwrap()
}

pub fn patient(id: u64) -> PatientRef {
    PatientRef {
        id: PatientId(id),
        firstname: "Amina".into(),
        lastname: "Benali".into(),
    }
}

/// Pending scan with a small grey image.
pub fn scan(id: u64, patient_id: u64, label: Option<&str>, created_at: DateTime<Utc>) -> Scan {
    scan_sized(id, patient_id, label, created_at, 40, 20)
}

pub fn scan_sized(
    id: u64,
    patient_id: u64,
    label: Option<&str>,
    created_at: DateTime<Utc>,
    width: u32,
    height: u32,
) -> Scan {
    Scan {
        id: ScanId(id),
        patient: patient(patient_id),
        image_data: solid_payload(width, height, [128, 128, 128]),
        diagnosis_label: label.map(str::to_string),
        confidence: 0.87,
        details: None,
        severity_level: None,
        symptoms: None,
        anamnesis: None,
        status: ScanStatus::Pending,
        doctor_notes: None,
        created_at,
    }
}

/// Three scans of patient 1 with levels 0, 2 and 4, oldest first.
pub fn progressing_history() -> Vec<Scan> {
    vec![
        scan(1, 1, Some("Pas de Rétinopathie (Sain)"), day(2024, 1, 10)),
        scan(2, 1, Some("Rétinopathie Modérée"), day(2024, 4, 10)),
        scan(3, 1, Some("Rétinopathie Proliférante"), day(2024, 7, 10)),
    ]
}

pub fn session() -> Session {
    Session::new("dr.idrissi", "test-token")
}
