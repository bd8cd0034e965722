use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use plantfit::CameraDevice as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "plantfit", version)]
struct Cli {
    /// Optional JSON config; every field falls back to its default.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a plant over a background and write the PNG snapshot.
    Capture(CaptureArgs),
    /// List plants from the catalog API and/or a local JSON file.
    Catalog(CatalogArgs),
    /// Apply a JSON gesture script to a fresh transform and print the result.
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false, id = "background")]
struct BackgroundArgs {
    /// Background treated as a camera frame (cover fit).
    #[arg(long)]
    camera: Option<PathBuf>,

    /// Background treated as a user photo (contain fit on black).
    #[arg(long)]
    photo: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CaptureArgs {
    #[command(flatten)]
    background: BackgroundArgs,

    /// Plant image (PNG/JPEG/...).
    #[arg(long)]
    overlay: PathBuf,

    /// Watermark logo (raster or SVG).
    #[arg(long)]
    logo: Option<PathBuf>,

    #[arg(long, default_value_t = 390.0)]
    stage_width: f64,

    #[arg(long, default_value_t = 844.0)]
    stage_height: f64,

    /// Canvas pixels per stage pixel.
    #[arg(long, default_value_t = 1.0)]
    pixel_ratio: f64,

    /// Overlay box width in stage pixels. Defaults to half the stage width.
    #[arg(long)]
    box_width: Option<f64>,

    /// Overlay box height in stage pixels. Defaults to the overlay's aspect ratio.
    #[arg(long)]
    box_height: Option<f64>,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    x: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    y: f64,

    /// Rotation in degrees.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rotation: f64,

    /// Gesture scale, clamped to [0.2, 4].
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Depth slider position in [0, 1].
    #[arg(long, default_value_t = 0.5)]
    depth: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct CatalogArgs {
    /// Local catalog JSON (`{"results": [...]}` or a bare array).
    #[arg(long)]
    file: Option<PathBuf>,

    /// Catalog API base URL; `/plants/` is appended.
    #[arg(long)]
    url: Option<String>,

    /// Size filter: ALL, B/M/S or a size label.
    #[arg(long, default_value = "ALL")]
    size: String,

    /// Print normalized plants as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// Gesture script JSON.
    #[arg(long)]
    script: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => plantfit::Config::from_path(path)?,
        None => plantfit::Config::default(),
    };
    match cli.cmd {
        Command::Capture(args) => cmd_capture(args, &config),
        Command::Catalog(args) => cmd_catalog(args, &config),
        Command::Replay(args) => cmd_replay(args, &config),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_image(path: &Path) -> anyhow::Result<plantfit::PreparedImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    Ok(plantfit::decode_image(&bytes)?)
}

fn cmd_capture(args: CaptureArgs, config: &plantfit::Config) -> anyhow::Result<()> {
    let stage = plantfit::StageSize::new(args.stage_width, args.stage_height)?;

    let mut camera;
    let still;
    let background = match (&args.background.camera, &args.background.photo) {
        (Some(path), _) => {
            camera = plantfit::StaticFrameCamera::new(read_image(path)?);
            camera.start()?;
            plantfit::Background::Camera(camera.latest_frame())
        }
        (None, Some(path)) => {
            still = read_image(path)?;
            plantfit::Background::Still(Some(&still))
        }
        (None, None) => anyhow::bail!("one of --camera or --photo is required"),
    };

    let overlay = read_image(&args.overlay)?;
    let watermark = match &args.logo {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("read logo '{}'", path.display()))?;
            Some(plantfit::Watermark::from_bytes(&bytes)?)
        }
        None => None,
    };

    let box_width = args.box_width.unwrap_or(stage.width / 2.0);
    let box_height = args.box_height.unwrap_or_else(|| {
        box_width * f64::from(overlay.height) / f64::from(overlay.width.max(1))
    });

    let mut transform = plantfit::TransformState::default();
    transform.set_translation(args.x, args.y);
    transform.set_rotation(args.rotation);
    transform.set_gesture_scale(args.scale);
    transform.set_depth_ratio(args.depth);

    let request = plantfit::CaptureRequest {
        transform: &transform,
        background,
        overlay: Some(&overlay),
        layout: plantfit::OverlayLayout::centered(
            stage,
            plantfit::Size::new(box_width, box_height),
        ),
        watermark: watermark.as_ref(),
        stage,
        pixel_ratio: args.pixel_ratio,
        settings: &config.compositor,
    };
    let result = plantfit::CaptureCompositor::new().capture(&request)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &result.png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{}, {:?})",
        args.out.display(),
        result.width,
        result.height,
        result.orientation
    );
    Ok(())
}

fn cmd_catalog(args: CatalogArgs, config: &plantfit::Config) -> anyhow::Result<()> {
    let source: Box<dyn plantfit::CatalogSource> = match (&args.url, &args.file) {
        (Some(url), Some(file)) => Box::new(plantfit::FallbackCatalog::new(
            plantfit::HttpCatalog::new(url),
            plantfit::FileCatalog::new(file),
        )),
        (Some(url), None) => Box::new(plantfit::HttpCatalog::new(url)),
        (None, Some(file)) => Box::new(plantfit::FileCatalog::new(file)),
        (None, None) => Box::new(plantfit::HttpCatalog::new(&config.api_base_url)),
    };

    let records = source.fetch()?;
    let plants = plantfit::normalize_records(
        &records,
        &config.storefront_url,
        &config.placeholder_thumbnail,
    );
    let filter = plantfit::SizeFilter::parse(&args.size);
    let visible = plantfit::filter_plants(&plants, &filter);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&visible).context("serialize plants")?
        );
        return Ok(());
    }
    if visible.is_empty() {
        println!("표시할 식물이 없습니다.");
        return Ok(());
    }
    for plant in visible {
        let price = plant.price_text().unwrap_or_default();
        let sold_out = if plant.sold_out { "\tsold out" } else { "" };
        println!(
            "{}\t{}\t{}\t{}{}",
            plant.id,
            plant.display_label(),
            price,
            plant.purchase_url,
            sold_out
        );
    }
    Ok(())
}

fn cmd_replay(args: ReplayArgs, config: &plantfit::Config) -> anyhow::Result<()> {
    let script = plantfit::ReplayScript::from_path(&args.script)?;
    let outcome = plantfit::run_replay(&script, config.gesture)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&outcome).context("serialize replay outcome")?
    );
    Ok(())
}
