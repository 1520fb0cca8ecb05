use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::scan::{Scan, ScanId, ScanStatus};
use crate::severity::{classify, ColorTier, SeverityLevel};

/// Data handed to the report renderer. Annotation ink is never part of it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportExport {
    pub scan_id: ScanId,
    pub patient: String,
    pub created_at: DateTime<Utc>,
    pub status: ScanStatus,
    pub final_diagnosis: String,
    pub severity: SeverityLevel,
    #[serde(skip)]
    pub color_tier: ColorTier,
    pub follow_up: String,
    pub advice: Vec<String>,
    pub notes: String,
}

impl ReportExport {
    /// Assemble the export for a scan with the physician's current diagnosis and notes.
    ///
    /// Severity follows the final diagnosis; when it is still the scan's own
    /// label the scan's typed severity (if any) is used.
    pub fn new(scan: &Scan, final_diagnosis: &str, notes: &str) -> Self {
        let final_diagnosis = if final_diagnosis.trim().is_empty() {
            scan.label_or_default()
        } else {
            final_diagnosis.to_string()
        };
        let severity = if final_diagnosis == scan.label_or_default() {
            scan.severity()
        } else {
            classify(Some(&final_diagnosis))
        };
        let profile = severity.profile();
        Self {
            scan_id: scan.id,
            patient: scan.patient.full_name(),
            created_at: scan.created_at,
            status: scan.status,
            final_diagnosis,
            severity,
            color_tier: profile.color_tier,
            follow_up: profile.follow_up.to_string(),
            advice: profile.advice.iter().map(|a| a.to_string()).collect(),
            notes: notes.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain-text rendering for terminals and exported files.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let status = match self.status {
            ScanStatus::Validated => "VALIDÉ PAR MÉDECIN",
            ScanStatus::Pending => "ANALYSE IA (Non validée)",
        };
        let _ = writeln!(out, "RAPPORT D'ANALYSE  Réf: {}", self.scan_id);
        let _ = writeln!(out, "Date: {}", self.created_at.format("%Y-%m-%d"));
        let _ = writeln!(out, "Patient: {}", self.patient);
        let _ = writeln!(out, "Statut: {status}");
        let _ = writeln!(out);
        let _ = writeln!(out, "Résultat: {}", self.final_diagnosis);
        let _ = writeln!(out, "Recommandation: {}", self.follow_up);
        let _ = writeln!(out, "Conseils:");
        for advice in &self.advice {
            let _ = writeln!(out, "  - {advice}");
        }
        if !self.notes.is_empty() {
            let _ = writeln!(out, "Note du Médecin: \"{}\"", self.notes);
        }
        out
    }
}

/// Direction of the disease between two consecutive scans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    FirstExam,
    Improving,
    Stable,
    Worsening,
}

impl Trend {
    pub fn between(previous: Option<SeverityLevel>, current: SeverityLevel) -> Self {
        match previous {
            None => Self::FirstExam,
            Some(prev) if current > prev => Self::Worsening,
            Some(prev) if current < prev => Self::Improving,
            Some(_) => Self::Stable,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::FirstExam => "Premier examen enregistré pour ce patient.",
            Self::Improving => "Amélioration par rapport à l'examen précédent.",
            Self::Stable => "État stable par rapport à l'examen précédent.",
            Self::Worsening => "Aggravation par rapport à l'examen précédent.",
        }
    }
}

/// Narrative analysis of a scan in the context of the patient's history.
///
/// `history` may be in any order and may include `current`.
pub fn narrative_report(current: &Scan, history: &[Scan]) -> String {
    let level = current.severity();
    let previous = history
        .iter()
        .filter(|s| s.id != current.id && s.created_at < current.created_at)
        .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    let trend = Trend::between(previous.map(Scan::severity), level);
    let exams = history.iter().filter(|s| s.id != current.id).count() + 1;

    let mut out = String::new();
    let _ = writeln!(out, "Patient : {}", current.patient.full_name());
    let _ = writeln!(
        out,
        "Diagnostic actuel : {} (niveau {}/4, confiance {:.0}%)",
        current.label_or_default(),
        level.ordinal(),
        current.confidence * 100.0
    );
    let _ = writeln!(out, "Examens au dossier : {exams}");
    let _ = write!(out, "Évolution : {}", trend.describe());
    if let Some(prev) = previous {
        let _ = write!(
            out,
            " (précédent : {} du {})",
            prev.label_or_default(),
            prev.created_at.format("%Y-%m-%d")
        );
    }
    let _ = writeln!(out);
    match current.symptoms.as_deref().map(str::trim) {
        Some(symptoms) if !symptoms.is_empty() => {
            let _ = writeln!(out, "Symptômes déclarés : {symptoms}");
        }
        _ => {
            let _ = writeln!(out, "Symptômes déclarés : aucun");
        }
    }
    let _ = write!(out, "Recommandation : {}", level.profile().follow_up);
    out
}
