// ============================================================================
// lanescope CLI: render a gel image with its lane annotation to PNG
// ============================================================================
//
// Usage examples:
//   lanescope gel.png --wells 40,60,420,60 --lane-length 300 --lane-start 25
//   lanescope gel.png --wells 40,60,420,60 --zoom 3 --at 200,150 -o zoomed.png
//   lanescope gel.png --pan -80,0 --measure-length 230,340
//
// Gestures are replayed through the same session code an interactive host
// uses, so the output matches what the viewer would show.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use lanescope::session::Input;
use lanescope::{
    DrawingSurface, GelSession, LaneCommand, LaneForm, PixmapSurface, SourceImage, SurfacePoint,
    ViewConfig,
};

/// Render a gel image with its well line and lane box.
#[derive(Parser, Debug)]
#[command(name = "lanescope", about = "Pan, zoom and annotate gel lanes")]
pub struct CliArgs {
    /// Gel image to load (any format the image crate reads)
    pub image: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "lanescope.png", value_name = "FILE")]
    pub output: PathBuf,

    /// Config file (defaults to the per-user config)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the settings in use back to the config file
    #[arg(long)]
    pub save_config: bool,

    /// Well endpoints in image pixels
    #[arg(long, value_delimiter = ',', value_name = "X1,Y1,X2,Y2", allow_negative_numbers = true)]
    pub wells: Option<Vec<f64>>,

    /// Lane length in image pixels
    #[arg(long)]
    pub lane_length: Option<f64>,

    /// Lane start in image pixels
    #[arg(long)]
    pub lane_start: Option<f64>,

    /// Pan by a surface-pixel offset (replayed as a drag from the center)
    #[arg(long, value_delimiter = ',', value_name = "DX,DY", allow_negative_numbers = true)]
    pub pan: Option<Vec<f64>>,

    /// Zoom clicks (negative zooms out)
    #[arg(long, allow_negative_numbers = true)]
    pub zoom: Option<f64>,

    /// Surface point to zoom around (defaults to the center)
    #[arg(long, value_delimiter = ',', value_name = "X,Y", allow_negative_numbers = true)]
    pub at: Option<Vec<f64>>,

    /// Measure the lane length from a surface point after panning/zooming
    #[arg(long, value_delimiter = ',', value_name = "X,Y", allow_negative_numbers = true)]
    pub measure_length: Option<Vec<f64>>,

    /// Measure the lane start from a surface point after panning/zooming
    #[arg(long, value_delimiter = ',', value_name = "X,Y", allow_negative_numbers = true)]
    pub measure_start: Option<Vec<f64>>,
}

fn point(values: &[f64]) -> SurfacePoint {
    SurfacePoint::new(values[0], values[1])
}

fn check_len(name: &str, values: &Option<Vec<f64>>, expected: usize) -> anyhow::Result<()> {
    if let Some(values) = values {
        anyhow::ensure!(
            values.len() == expected,
            "--{} takes {} comma-separated numbers, got {}",
            name,
            expected,
            values.len()
        );
    }
    Ok(())
}

/// Lane form from the command line, defaults for anything not given
fn lane_form(args: &CliArgs) -> LaneForm {
    let mut form = LaneForm::default();
    if let Some(w) = &args.wells {
        form.well_x1 = w[0];
        form.well_y1 = w[1];
        form.well_x2 = w[2];
        form.well_y2 = w[3];
    }
    form.lane_length = args.lane_length.unwrap_or(form.lane_length);
    form.lane_start = args.lane_start.unwrap_or(form.lane_start);
    form
}

/// Replay pan, zoom and measurements through the session
///
/// The pan is a drag from the surface center; the zoom acts at `--at` or the
/// center.
fn replay<S: DrawingSurface>(session: &mut GelSession<S>, args: &CliArgs) -> anyhow::Result<()> {
    let surface = session.tracker().surface();
    let center = SurfacePoint::new(surface.width() as f64 / 2.0, surface.height() as f64 / 2.0);

    if let Some(d) = &args.pan {
        session.handle(Input::PointerDown(center));
        session.handle(Input::PointerMove(center + point(d)));
        session.handle(Input::PointerUp { shift: false });
    }
    if let Some(clicks) = args.zoom {
        let at = args.at.as_deref().map(point).unwrap_or(center);
        session.zoom_at(at, clicks)?;
    }

    let measurements = [
        (&args.measure_length, LaneCommand::MeasureLaneLength),
        (&args.measure_start, LaneCommand::MeasureLaneStart),
    ];
    for (at, command) in measurements {
        if let Some(at) = at {
            let feedback = session.handle(Input::PointerMove(point(at)));
            log::info!("Cursor at {:?} for {:?}", feedback.cursor, command);
            session.handle(Input::Lane(command));
        }
    }
    Ok(())
}

pub fn run(args: CliArgs) -> anyhow::Result<()> {
    check_len("wells", &args.wells, 4)?;
    check_len("pan", &args.pan, 2)?;
    check_len("at", &args.at, 2)?;
    check_len("measure-length", &args.measure_length, 2)?;
    check_len("measure-start", &args.measure_start, 2)?;

    let config = match &args.config {
        Some(path) => ViewConfig::load_from(path)?,
        None => ViewConfig::load(),
    };
    if args.save_config {
        match &args.config {
            Some(path) => config.save_to(path)?,
            None => config.save(),
        }
    }
    let (width, height) = config.viewport;

    let image = SourceImage::open(&args.image)?;
    let surface = PixmapSurface::new(width, height)?;
    let mut session = GelSession::new(surface, image, &config);
    session.form = lane_form(&args);
    replay(&mut session, &args)?;

    session.redraw()?;
    println!("{}", serde_json::to_string_pretty(&session.form)?);

    session
        .into_surface()
        .save_png(&args.output)
        .with_context(|| format!("Failed to render {}", args.image.display()))?;
    log::info!("Wrote {}", args.output.display());
    Ok(())
}
