use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use framecut::{
    Controller, CpuSurface, CpuSurfaceOpts, FixedAdvanceMeasurer, FontBook, FontVariant,
    ImageCache, NudgeKey, Point, RenderOpts, Scene, TextEngine, TextMeasurer, UrlImageLoader,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "framecut", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene document to a PNG.
    Render(RenderArgs),
    /// Hit-test a canvas point and print the result as JSON.
    Hit(HitArgs),
    /// Print the proposal an arrow key would produce for the selected layer.
    Nudge(NudgeArgs),
    /// Print the CSS preview string of the scene background.
    GradientCss(GradientCssArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Register a font: `FAMILY[:bold|:italic|:bolditalic]=PATH` (repeatable).
    #[arg(long = "font", value_name = "FAMILY=PATH")]
    fonts: Vec<String>,

    /// Root for relative image paths (defaults to the scene file's directory).
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Background and cutouts only.
    #[arg(long, default_value_t = false)]
    thumbnail: bool,

    /// Skip the selection box and handles.
    #[arg(long, default_value_t = false)]
    no_selection: bool,

    /// Color the frame is cleared to before painting.
    #[arg(long)]
    clear: Option<String>,
}

#[derive(Parser, Debug)]
struct HitArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Canvas x.
    x: f64,

    /// Canvas y.
    y: f64,

    /// Register a font used to measure text (repeatable); without fonts text is measured at
    /// half an em per char.
    #[arg(long = "font", value_name = "FAMILY=PATH")]
    fonts: Vec<String>,
}

#[derive(Parser, Debug)]
struct NudgeArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Arrow key: `left`, `right`, `up`, `down` (or `ArrowLeft`, ...).
    key: String,

    /// Use the fast step.
    #[arg(long, default_value_t = false)]
    shift: bool,
}

#[derive(Parser, Debug)]
struct GradientCssArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Hit(args) => cmd_hit(args),
        Command::Nudge(args) => cmd_nudge(args),
        Command::GradientCss(args) => cmd_gradient_css(args),
    }
}

fn load_scene(path: &Path) -> anyhow::Result<Scene> {
    Scene::from_path(path).with_context(|| format!("load scene '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let fonts = font_book(&args.fonts)?;
    let assets_root = args.assets.clone().unwrap_or_else(|| {
        args.in_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let mut opts = RenderOpts::default().with_draw_selection(!args.no_selection);
    if let Some(clear) = &args.clear {
        let color = clear
            .parse()
            .with_context(|| format!("parse --clear '{clear}'"))?;
        opts = opts.with_clear_color(color);
    }

    let mut surface = CpuSurface::new(
        scene.screen_width,
        scene.screen_height,
        fonts,
        CpuSurfaceOpts::default(),
    )?;
    if args.thumbnail {
        framecut::render_thumbnail(&mut surface, &scene, &opts)?;
    } else {
        let mut cache = ImageCache::new();
        let loader = UrlImageLoader::with_assets_root(assets_root);
        framecut::render_blocking(&mut surface, &scene, &mut cache, &loader, &opts)?;
    }

    framecut::write_png(&args.out, &surface.into_frame())?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_hit(args: HitArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let pos = Point::new(args.x, args.y);
    let mut measurer: Box<dyn TextMeasurer> = if args.fonts.is_empty() {
        Box::new(FixedAdvanceMeasurer::default())
    } else {
        Box::new(TextEngine::new(font_book(&args.fonts)?))
    };

    let mut controller = Controller::default();
    let hit = controller.pointer_down(pos, &scene, measurer.as_mut());
    println!("{}", serde_json::to_string(&hit)?);
    Ok(())
}

fn cmd_nudge(args: NudgeArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let key: NudgeKey = args.key.parse()?;
    match Controller::default().key_nudge(key, args.shift, &scene) {
        Some(proposal) => println!("{}", serde_json::to_string(&proposal)?),
        None => println!("null"),
    }
    Ok(())
}

fn cmd_gradient_css(args: GradientCssArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    println!("{}", framecut::gradient_css(&scene.background));
    Ok(())
}

fn font_book(specs: &[String]) -> anyhow::Result<FontBook> {
    let mut book = FontBook::new();
    for spec in specs {
        let (family, variant, path) = parse_font_arg(spec)?;
        book.register_file(&family, variant, &path)
            .with_context(|| format!("register font '{spec}'"))?;
    }
    Ok(book)
}

fn parse_font_arg(spec: &str) -> anyhow::Result<(String, FontVariant, PathBuf)> {
    let (lhs, path) = spec
        .split_once('=')
        .with_context(|| format!("--font expects FAMILY=PATH, got '{spec}'"))?;
    let (family, style) = match lhs.rsplit_once(':') {
        Some((family, style)) => (family, Some(style)),
        None => (lhs, None),
    };
    let variant = match style.map(str::to_ascii_lowercase).as_deref() {
        None | Some("regular") => FontVariant::REGULAR,
        Some("bold") => FontVariant {
            bold: true,
            italic: false,
        },
        Some("italic") => FontVariant {
            bold: false,
            italic: true,
        },
        Some("bolditalic") => FontVariant {
            bold: true,
            italic: true,
        },
        Some(other) => anyhow::bail!("unknown font style '{other}' in '{spec}'"),
    };
    if family.trim().is_empty() || path.is_empty() {
        anyhow::bail!("--font expects FAMILY=PATH, got '{spec}'");
    }
    Ok((family.to_owned(), variant, PathBuf::from(path)))
}
