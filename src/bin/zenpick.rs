//! Name the colors under clicks on an image, or of a bare RGB value.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rgb::RGB8;
use thiserror::Error;
use zenpick::{
    query_from_components, ColorPicker, DistanceMetric, ImgVec, Interpolation, Palette,
    PickError, PickerConfig,
};

#[derive(Parser)]
#[command(about = "Find the nearest named color for pixels in an image")]
struct Cli {
    /// Palette CSV with rows of name,hex,r,g,b
    #[arg(long, conflicts_with = "css", required_unless_present = "css")]
    palette: Option<PathBuf>,

    /// Use the built-in CSS3 named colors
    #[arg(long)]
    css: bool,

    /// euclidean or manhattan
    #[arg(long, default_value = "euclidean")]
    metric: DistanceMetric,

    /// Longest side of the display image that click coordinates refer to
    #[arg(long, default_value_t = zenpick::picker::DEFAULT_MAX_DISPLAY_DIMENSION)]
    max_dimension: u32,

    /// Display resampling: fast, balanced or high
    #[arg(long, default_value = "balanced")]
    quality: Interpolation,

    /// Resolve a single color instead of reading an image
    #[arg(long, value_name = "R,G,B", conflicts_with = "image")]
    rgb: Option<String>,

    /// How many candidates to print for --rgb
    #[arg(long, default_value_t = 1)]
    top: usize,

    /// Image to pick from (PNG, JPEG or BMP)
    #[arg(required_unless_present = "rgb")]
    image: Option<PathBuf>,

    /// Display-space click position; may be repeated
    #[arg(long = "at", value_name = "X,Y", requires = "image")]
    at: Vec<String>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Pick(#[from] PickError),
    #[error("cannot open image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{0}")]
    Usage(String),
}

fn parse_ints<const N: usize>(s: &str, what: &str) -> Result<[i64; N], CliError> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let bad = || CliError::Usage(format!("expected {what}, got {s:?}"));
    if parts.len() != N {
        return Err(bad());
    }
    let mut out = [0i64; N];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|_| bad())?;
    }
    Ok(out)
}

fn load_image(path: &Path) -> Result<ImgVec<RGB8>, CliError> {
    let decoded = image::open(path)
        .map_err(|source| CliError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();
    let (width, height) = decoded.dimensions();
    let pixels: Vec<RGB8> = decoded
        .pixels()
        .map(|p| RGB8::new(p[0], p[1], p[2]))
        .collect();
    log::info!("decoded {} ({width}x{height})", path.display());
    Ok(ImgVec::new(pixels, width as usize, height as usize))
}

fn run(cli: Cli) -> Result<(), CliError> {
    let palette = match &cli.palette {
        Some(path) => Palette::from_path(path)?,
        None => Palette::css3(),
    };

    if let Some(text) = &cli.rgb {
        let [r, g, b] = parse_ints::<3>(text, "R,G,B")?;
        let query = query_from_components(r, g, b)?;
        for entry in palette.k_nearest(query, cli.metric, cli.top.max(1)) {
            println!(
                "{}\t{}\t({}, {}, {})\t{:.2}",
                entry.name,
                entry.hex.as_deref().unwrap_or("-"),
                entry.rgb.r,
                entry.rgb.g,
                entry.rgb.b,
                cli.metric.distance(query, entry.rgb)
            );
        }
        return Ok(());
    }

    let Some(path) = &cli.image else {
        return Err(CliError::Usage("an image or --rgb is required".into()));
    };
    let config = PickerConfig::new()
        .max_display_dimension(cli.max_dimension)
        .metric(cli.metric)
        .interpolation(cli.quality);
    let mut picker = ColorPicker::new(palette, config);
    picker.load_image(load_image(path)?)?;

    if let Some(t) = picker.transform() {
        let (o, d) = (t.original(), t.display());
        println!(
            "image {}x{}, display {}x{}",
            o.width, o.height, d.width, d.height
        );
    }

    for at in &cli.at {
        let result = parse_ints::<2>(at, "X,Y").and_then(|[x, y]| Ok(picker.pick(x, y)?));
        match result {
            Ok(sel) => println!(
                "Color at ({at}) -> original ({}, {}): {} rgb({}, {}, {})",
                sel.original_point.0, sel.original_point.1, sel.name, sel.rgb.r, sel.rgb.g, sel.rgb.b
            ),
            // A bad click is skipped; the session carries on.
            Err(CliError::Pick(e)) if e.is_recoverable() => eprintln!("skipping {at}: {e}"),
            Err(e @ CliError::Usage(_)) => eprintln!("skipping {at}: {e}"),
            Err(e) => return Err(e),
        }
    }

    if picker.history().len() > 1 {
        println!("history (most recent first):");
        for record in picker.history().recent(usize::MAX) {
            let c = record.rgb;
            println!("  {} ({}, {}, {})", record.name, c.r, c.g, c.b);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
