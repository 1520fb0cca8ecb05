use chrono::{DateTime, Utc};

use crate::consts::{EVOLUTION_LEVEL_STEP, EVOLUTION_MAX_POINTS, EVOLUTION_SINGLE_X};
use crate::scan::{Scan, ScanId};
use crate::severity::SeverityLevel;

/// One plotted scan on the 0..100 x 0..100 chart plane.
#[derive(Clone, Debug, PartialEq)]
pub struct EvolutionPoint {
    pub x: f32,
    pub y: f32,
    pub level: SeverityLevel,
    pub date: DateTime<Utc>,
    pub scan_id: ScanId,
    pub label: String,
}

impl EvolutionPoint {
    /// Hover text, e.g. `2024-03-02 : Rétinopathie Modérée`.
    pub fn tooltip(&self) -> String {
        format!("{} : {}", self.date.format("%Y-%m-%d"), self.label)
    }
}

/// Trend series built from a patient's history.
#[derive(Clone, Debug, PartialEq)]
pub enum Evolution {
    /// Fewer than two scans; no chart is drawn.
    InsufficientData { available: usize },
    Series(Vec<EvolutionPoint>),
}

impl Evolution {
    pub fn points(&self) -> &[EvolutionPoint] {
        match self {
            Self::InsufficientData { .. } => &[],
            Self::Series(points) => points,
        }
    }

    /// Polyline vertices `(x, y)` in chronological order.
    pub fn line(&self) -> Vec<(f32, f32)> {
        self.points().iter().map(|p| (p.x, p.y)).collect()
    }

    /// Closed area outline under the line, with its base on the `y = 100` axis.
    pub fn area_polygon(&self) -> Vec<(f32, f32)> {
        let points = self.points();
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Vec::new();
        };
        let mut polygon = Vec::with_capacity(points.len() + 2);
        polygon.push((first.x, 100.0));
        polygon.extend(points.iter().map(|p| (p.x, p.y)));
        polygon.push((last.x, 100.0));
        polygon
    }
}

/// Chart height for a severity level: healthy at 100, proliferative at 0.
pub fn level_y(level: SeverityLevel) -> f32 {
    100.0 - level.ordinal() as f32 * EVOLUTION_LEVEL_STEP
}

/// Build the evolution series using the default point budget.
pub fn build_evolution(history: &[Scan]) -> Evolution {
    build_evolution_bounded(history, EVOLUTION_MAX_POINTS)
}

/// Build the evolution series from the `max_points` most recent scans.
///
/// The series never holds more than [`EVOLUTION_MAX_POINTS`] scans.
pub fn build_evolution_bounded(history: &[Scan], max_points: usize) -> Evolution {
    let max_points = max_points.min(EVOLUTION_MAX_POINTS);
    let mut sorted: Vec<&Scan> = history.iter().collect();
    sorted.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    let skip = sorted.len().saturating_sub(max_points);
    let recent = &sorted[skip..];

    if recent.len() < 2 {
        return Evolution::InsufficientData {
            available: recent.len(),
        };
    }

    Evolution::Series(plot_points(recent))
}

fn plot_points(scans: &[&Scan]) -> Vec<EvolutionPoint> {
    let n = scans.len();
    scans
        .iter()
        .enumerate()
        .map(|(i, scan)| {
            let level = scan.severity();
            let x = if n > 1 {
                i as f32 / (n - 1) as f32 * 100.0
            } else {
                EVOLUTION_SINGLE_X
            };
            EvolutionPoint {
                x,
                y: level_y(level),
                level,
                date: scan.created_at,
                scan_id: scan.id,
                label: scan.label_or_default(),
            }
        })
        .collect()
}
