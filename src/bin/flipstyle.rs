use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "flipstyle", version)]
struct Cli {
    /// Log absorbed failures and fallbacks to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a `#RRGGBB` color and print its RGB and HSV forms as JSON.
    Color(ColorArgs),
    /// Parse a gradient expression, print it as JSON, then re-serialize it.
    Gradient(GradientArgs),
    /// Word-wrap text to a width and print one line per row.
    Wrap(WrapArgs),
    /// Compose an element fixture and write its synthesized SVG or a PNG raster of it.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct ColorArgs {
    hex: String,
}

#[derive(Parser, Debug)]
struct GradientArgs {
    expr: String,
}

#[derive(Parser, Debug)]
struct WrapArgs {
    /// Font file used for measurement. Without one, a fixed-advance approximation is used.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Font size in pixels.
    #[arg(long, default_value_t = 16.0)]
    size: f32,

    /// Font weight.
    #[arg(long, default_value_t = 400.0)]
    weight: f32,

    /// Maximum line width in pixels.
    #[arg(long)]
    width: f32,

    text: String,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Element fixture JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Font files for measurement and rasterization (repeatable).
    #[arg(long)]
    font: Vec<PathBuf>,

    /// Output path; `.png` rasterizes, anything else writes the SVG markup.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Color(args) => cmd_color(args),
        Command::Gradient(args) => cmd_gradient(args),
        Command::Wrap(args) => cmd_wrap(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn cmd_color(args: ColorArgs) -> anyhow::Result<()> {
    let color = flipstyle::ColorValue::from_hex(&args.hex)
        .ok_or_else(|| flipstyle::StyleError::validation(format!("'{}' is not #RRGGBB", args.hex)))?;
    let out = serde_json::json!({
        "hex": color.hex(),
        "rgb": color.rgb(),
        "hsv": color.hsv(),
        "hsv_percent": color.hsv().to_percent(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_gradient(args: GradientArgs) -> anyhow::Result<()> {
    let gradient = flipstyle::Gradient::parse(&args.expr).ok_or_else(|| {
        flipstyle::StyleError::gradient("expected a linear/radial gradient with at least two stops")
    })?;
    println!("{}", serde_json::to_string_pretty(&gradient)?);
    println!("{}", gradient.serialize());
    Ok(())
}

fn load_measurer(fonts: &[PathBuf]) -> anyhow::Result<Option<(flipstyle::ParleyMeasurer, Vec<Vec<u8>>)>> {
    if fonts.is_empty() {
        return Ok(None);
    }
    let mut measurer = flipstyle::ParleyMeasurer::new();
    let mut blobs = Vec::with_capacity(fonts.len());
    for path in fonts {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        let family = measurer
            .register_font(bytes.clone())
            .with_context(|| format!("register font '{}'", path.display()))?;
        tracing::debug!(%family, path = %path.display(), "loaded font");
        blobs.push(bytes);
    }
    Ok(Some((measurer, blobs)))
}

fn cmd_wrap(args: WrapArgs) -> anyhow::Result<()> {
    let fonts: Vec<PathBuf> = args.font.into_iter().collect();
    let (mut measurer, family): (Box<dyn flipstyle::TextMeasurer>, String) =
        match load_measurer(&fonts)? {
            Some((m, _)) => {
                let family = m.families().first().cloned().unwrap_or_default();
                (Box::new(m), family)
            }
            None => (
                Box::new(flipstyle::MonospaceMeasurer::default()),
                "monospace".to_owned(),
            ),
        };
    let font = flipstyle::FontDescriptor::new(family, args.weight, args.size);
    let request = flipstyle::WrapRequest::new(&args.text, &font, args.width);
    for line in request.lines(measurer.as_mut()) {
        let line = line?;
        println!("{:>8}  {}", flipstyle::fmt_num(f64::from(line.width), 2), line.text);
    }
    Ok(())
}

fn read_element_json(path: &Path) -> anyhow::Result<flipstyle::Element> {
    let f = File::open(path).with_context(|| format!("open element '{}'", path.display()))?;
    let r = BufReader::new(f);
    let element: flipstyle::Element =
        serde_json::from_reader(r).with_context(|| "parse element JSON")?;
    Ok(element)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let element = read_element_json(&args.in_path)?;
    let state = flipstyle::StyleSnapshot::read(&element).resolve(&element.computed);
    let layout = flipstyle::LayoutSnapshot::from_element(&element);

    let (mut measurer, blobs): (Box<dyn flipstyle::TextMeasurer>, Vec<Vec<u8>>) =
        match load_measurer(&args.font)? {
            Some((m, blobs)) => (Box::new(m), blobs),
            None => (Box::new(flipstyle::MonospaceMeasurer::default()), Vec::new()),
        };

    let mut compositor = flipstyle::Compositor::new();
    let mode = flipstyle::choose_mode(&state);
    let svg = match compositor.synthesize(
        &state,
        &layout,
        Some(measurer.as_mut() as &mut dyn flipstyle::TextMeasurer),
    ) {
        flipstyle::Composition::Synthesized { svg, .. } => svg,
        flipstyle::Composition::Deferred => {
            anyhow::bail!("element has no size; set computed.size in the fixture")
        }
        flipstyle::Composition::Native(_) => anyhow::bail!("text measurement failed"),
    };
    eprintln!("mode: {mode:?}");

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let is_png = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if is_png {
        let raster = flipstyle::rasterize_svg(&svg, flipstyle::font_database(&blobs, true))?;
        raster
            .to_rgba_image()?
            .save(&args.out)
            .with_context(|| format!("write png '{}'", args.out.display()))?;
    } else {
        std::fs::write(&args.out, &svg)
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
