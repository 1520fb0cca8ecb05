pub mod annotate;
pub mod classify;
pub mod config;
pub mod history;
pub mod queue;
pub mod render;
pub mod report;
pub mod validate;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use retina_core::config::ViewerConfig;
use retina_core::geometry::Point;
use retina_core::repository::{JsonScanStore, Session};

/// Scan store and credentials shared by every store-backed command.
#[derive(Args)]
pub struct StoreArgs {
    /// JSON scan store
    pub store: PathBuf,

    /// Clinician user name
    #[arg(long, default_value = "local")]
    pub user: String,

    /// Session token
    #[arg(long, default_value = "local")]
    pub token: String,

    /// Viewer config (TOML); defaults are used when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl StoreArgs {
    pub fn open(&self) -> Result<JsonScanStore> {
        JsonScanStore::open(&self.store)
            .with_context(|| format!("Failed to open scan store {}", self.store.display()))
    }

    pub fn session(&self) -> Session {
        Session::new(&self.user, &self.token)
    }

    pub fn viewer_config(&self) -> Result<ViewerConfig> {
        match &self.config {
            Some(path) => ViewerConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            None => Ok(ViewerConfig::default()),
        }
    }
}

/// Parse a comma-separated list of numbers, requiring exactly `n` values.
pub fn parse_numbers(text: &str, n: usize, what: &str) -> Result<Vec<f32>> {
    let values: Vec<f32> = text
        .split(',')
        .map(|s| s.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Invalid {what} '{text}'"))?;
    if values.len() != n {
        bail!("{what} requires exactly {n} comma-separated values, got {}", values.len());
    }
    Ok(values)
}

/// `"x,y"` to a point.
pub fn parse_point(text: &str) -> Result<Point> {
    let v = parse_numbers(text, 2, "point")?;
    Ok(Point::new(v[0], v[1]))
}

/// `"x0,y0,x1,y1"` to a start and end point.
pub fn parse_drag(text: &str) -> Result<(Point, Point)> {
    let v = parse_numbers(text, 4, "drag")?;
    Ok((Point::new(v[0], v[1]), Point::new(v[2], v[3])))
}

/// `"x,y;x,y;..."` to a polyline of at least two points.
pub fn parse_path(text: &str) -> Result<Vec<Point>> {
    let points = text
        .split(';')
        .filter(|s| !s.trim().is_empty())
        .map(parse_point)
        .collect::<Result<Vec<_>>>()?;
    if points.len() < 2 {
        bail!("Pen path '{text}' needs at least two points");
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_drag() {
        let (a, b) = parse_drag("0, 0,3,4").unwrap();
        assert_eq!(a, Point::new(0.0, 0.0));
        assert_eq!(b, Point::new(3.0, 4.0));
    }

    #[test]
    fn rejects_short_path() {
        assert!(parse_path("1,2").is_err());
        assert_eq!(parse_path("1,2;3,4;").unwrap().len(), 2);
    }
}
