use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::io::image_io::decode_payload;
use crate::severity::{classify, queue_priority, SeverityLevel};

/// Repository identifier of a scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanId(pub u64);

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Repository identifier of a patient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(pub u64);

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Owning patient of a scan, as delivered with the scan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientRef {
    pub id: PatientId,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
}

impl PatientRef {
    pub fn full_name(&self) -> String {
        match (self.firstname.is_empty(), self.lastname.is_empty()) {
            (true, true) => self.id.to_string(),
            (false, true) => self.firstname.clone(),
            (true, false) => self.lastname.clone(),
            (false, false) => format!("{} {}", self.firstname, self.lastname),
        }
    }
}

/// Review status of a scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanStatus {
    #[default]
    Pending,
    Validated,
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Validated => write!(f, "Validated"),
        }
    }
}

/// One retinal image plus its AI diagnosis and clinical metadata.
///
/// Field names on the wire follow the scan service's camelCase JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scan {
    pub id: ScanId,
    pub patient: PatientRef,
    /// Base64 text of the encoded raster (JPEG, PNG, ...).
    pub image_data: String,
    #[serde(rename = "aiPrediction", default)]
    pub diagnosis_label: Option<String>,
    /// AI confidence in [0, 1].
    #[serde(rename = "aiConfidence", default)]
    pub confidence: f32,
    /// Raw JSON object mapping class name to probability.
    #[serde(rename = "aiDetails", default)]
    pub details: Option<String>,
    /// Typed ordinal severity, when the inference service provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_level: Option<u8>,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub anamnesis: Option<String>,
    #[serde(default)]
    pub status: ScanStatus,
    #[serde(default)]
    pub doctor_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Scan {
    /// Severity of this scan. A typed ordinal wins over label matching.
    pub fn severity(&self) -> SeverityLevel {
        self.severity_level
            .and_then(SeverityLevel::from_ordinal)
            .unwrap_or_else(|| classify(self.diagnosis_label.as_deref()))
    }

    /// Rank in the review queue; lower is more urgent.
    ///
    /// A typed ordinal ranks by its level. Otherwise the label is matched and
    /// an unknown or absent label sorts last.
    pub fn queue_priority(&self) -> u8 {
        match self.severity_level.and_then(SeverityLevel::from_ordinal) {
            Some(level) => level.queue_priority(),
            None => queue_priority(self.diagnosis_label.as_deref()),
        }
    }

    /// Diagnosis label, or the level-0 label when the scan has none.
    pub fn label_or_default(&self) -> String {
        match self.diagnosis_label.as_deref() {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => SeverityLevel::Healthy.label().to_string(),
        }
    }

    /// AI class probabilities, most probable first.
    ///
    /// A missing or malformed distribution yields an empty list.
    pub fn probability_distribution(&self) -> Vec<(String, f32)> {
        let Some(raw) = self.details.as_deref() else {
            return Vec::new();
        };
        match serde_json::from_str::<BTreeMap<String, f32>>(raw) {
            Ok(map) => {
                let mut entries: Vec<(String, f32)> = map.into_iter().collect();
                entries.sort_by(|a, b| b.1.total_cmp(&a.1));
                entries
            }
            Err(e) => {
                debug!(scan = %self.id, error = %e, "Unparsable AI details, ignoring");
                Vec::new()
            }
        }
    }

    /// The `n` most probable AI classes.
    pub fn top_probabilities(&self, n: usize) -> Vec<(String, f32)> {
        let mut entries = self.probability_distribution();
        entries.truncate(n);
        entries
    }

    /// Decode the image payload into an RGBA raster.
    pub fn decode_image(&self) -> Result<RgbaImage> {
        decode_payload(&self.image_data)
    }

    pub fn is_pending(&self) -> bool {
        self.status == ScanStatus::Pending
    }
}

/// Sort scans oldest first.
pub fn sort_chronologically(scans: &mut [Scan]) {
    scans.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}
