use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use image::Rgba;
use retina_core::geometry::Size;
use retina_core::io::image_io::save_image;
use retina_core::repository::ScanRepository;
use retina_core::scan::ScanId;
use retina_core::session::ViewerSession;
use retina_core::viewport::ColorFilter;

use super::{parse_numbers, parse_point, StoreArgs};

#[derive(Clone, Copy, ValueEnum)]
pub enum FilterArg {
    Rgb,
    Green,
    Negative,
}

impl From<FilterArg> for ColorFilter {
    fn from(f: FilterArg) -> Self {
        match f {
            FilterArg::Rgb => ColorFilter::None,
            FilterArg::Green => ColorFilter::GreenChannel,
            FilterArg::Negative => ColorFilter::Negative,
        }
    }
}

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Scan id
    #[arg(short, long)]
    pub scan: u64,

    /// Zoom factor (1-5)
    #[arg(long, default_value_t = 1.0)]
    pub zoom: f32,

    /// Brightness percent (50-200)
    #[arg(long, default_value_t = 100.0)]
    pub brightness: f32,

    /// Contrast percent (50-200)
    #[arg(long, default_value_t = 100.0)]
    pub contrast: f32,

    /// Colour filter
    #[arg(long, value_enum, default_value = "rgb")]
    pub filter: FilterArg,

    /// Pan offset in display pixels: "x,y"
    #[arg(long, allow_hyphen_values = true)]
    pub pan: Option<String>,

    /// Show this earlier scan of the same patient on the left
    #[arg(long)]
    pub compare: Option<u64>,

    /// Pane size in display pixels: "width,height"
    #[arg(long, default_value = "800,600")]
    pub pane: String,

    /// Output file path
    #[arg(short, long, default_value = "view.png")]
    pub output: PathBuf,
}

pub fn run(args: &RenderArgs) -> Result<()> {
    let config = args.store.viewer_config()?;
    let store = args.store.open()?;
    let scan_id = ScanId(args.scan);
    let scan = store.scan(scan_id)?.clone();
    let patient = scan.patient.id;

    let pane = parse_numbers(&args.pane, 2, "pane size")?;
    let mut session = ViewerSession::new(config);
    session.set_container(Size::new(pane[0], pane[1]));
    session
        .select_scan(scan)
        .with_context(|| format!("Failed to decode image of scan {scan_id}"))?;

    let viewport = session.viewport_mut();
    viewport.set_zoom(args.zoom);
    viewport.set_brightness(args.brightness);
    viewport.set_contrast(args.contrast);
    viewport.set_filter(args.filter.into());
    if let Some(ref pan) = args.pan {
        viewport.set_offset(parse_point(pan)?);
    }

    if let Some(target) = args.compare {
        let history = store
            .fetch_patient_history(&args.store.session(), patient)
            .with_context(|| format!("Failed to fetch history of patient {patient}"))?;
        session.load_history(scan_id, history);
        session.toggle_compare();
        session.set_comparison_target(ScanId(target))?;
    }

    let Some(image) = session.render(Rgba([0, 0, 0, 255]))? else {
        bail!("Nothing to render for scan {scan_id}");
    };
    save_image(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!(
        "Rendered {} ({}x{}) to {}",
        scan_id,
        image.width(),
        image.height(),
        args.output.display()
    );
    Ok(())
}
