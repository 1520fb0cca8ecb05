use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use retina_core::annotation::Tool;
use retina_core::geometry::{Point, Size};
use retina_core::io::image_io::save_image;
use retina_core::scan::ScanId;
use retina_core::session::ViewerSession;
use tracing::debug;

use super::{parse_drag, parse_path, StoreArgs};

#[derive(Args)]
pub struct AnnotateArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Scan id
    #[arg(short, long)]
    pub scan: u64,

    /// Circle drag in native pixels: "x0,y0,x1,y1" (centre, then a point on the rim)
    #[arg(long)]
    pub circle: Vec<String>,

    /// Arrow drag in native pixels: "x0,y0,x1,y1" (tail, then tip)
    #[arg(long)]
    pub arrow: Vec<String>,

    /// Freehand stroke in native pixels: "x,y;x,y;..."
    #[arg(long)]
    pub pen: Vec<String>,

    /// Output file path (native resolution)
    #[arg(short, long, default_value = "annotated.png")]
    pub output: PathBuf,
}

/// Replay one drag through the session's pointer routing.
///
/// Native points are projected to display space first so the session maps
/// them back exactly as it would live pointer input.
fn replay(session: &mut ViewerSession, tool: Tool, path: &[Point]) {
    if session.tool() != tool {
        session.select_tool(tool);
    }
    let transform = session.transform();
    let to_display = |p: Point| transform.to_display(session.viewport(), p);

    let mut points = path.iter().map(|&p| to_display(p)).collect::<Vec<_>>().into_iter();
    let Some(first) = points.next() else {
        return;
    };
    session.pointer_down(first);
    for p in points {
        session.pointer_move(p);
    }
    session.pointer_up();
    debug!(?tool, points = path.len(), "Replayed gesture");
}

pub fn run(args: &AnnotateArgs) -> Result<()> {
    if args.circle.is_empty() && args.arrow.is_empty() && args.pen.is_empty() {
        bail!("Nothing to draw: pass at least one --circle, --arrow or --pen");
    }

    let config = args.store.viewer_config()?;
    let store = args.store.open()?;
    let scan_id = ScanId(args.scan);
    let scan = store.scan(scan_id)?.clone();

    let mut session = ViewerSession::new(config);
    session
        .select_scan(scan)
        .with_context(|| format!("Failed to decode image of scan {scan_id}"))?;
    if let Some((w, h)) = session.native_image().map(|img| img.dimensions()) {
        // Display at 1:1 so the replay is pixel exact.
        let fit = session.transform().fit_fraction;
        session.set_container(Size::new(w as f32 / fit, h as f32 / fit));
    }

    for text in &args.circle {
        let (a, b) = parse_drag(text)?;
        replay(&mut session, Tool::Circle, &[a, b]);
    }
    for text in &args.arrow {
        let (a, b) = parse_drag(text)?;
        replay(&mut session, Tool::Arrow, &[a, b]);
    }
    for text in &args.pen {
        let path = parse_path(text)?;
        replay(&mut session, Tool::Pen, &path);
    }

    let Some(image) = session.composite_image() else {
        bail!("Nothing to render for scan {scan_id}");
    };
    save_image(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!(
        "Annotated {} ({} inked pixels) to {}",
        scan_id,
        session.surface().committed().inked_count(),
        args.output.display()
    );
    Ok(())
}
