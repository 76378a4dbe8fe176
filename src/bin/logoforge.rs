use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "logoforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in templates.
    List,
    /// Print a template's parameter schema and defaults as JSON.
    Schema(SchemaArgs),
    /// Print the resolved parameters for a raw parameter bag.
    Resolve(ResolveArgs),
    /// Render a single frame as a PNG.
    Render(RenderArgs),
    /// Render a job's frame series as numbered PNGs.
    Frames(FramesArgs),
}

#[derive(Parser, Debug)]
struct SchemaArgs {
    /// Template id.
    id: String,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Template id.
    id: String,

    /// Raw parameter JSON file.
    #[arg(long)]
    params: Option<PathBuf>,

    #[arg(long, default_value_t = 512.0)]
    width: f64,

    #[arg(long, default_value_t = 512.0)]
    height: f64,

    #[arg(long, default_value_t = 0.0)]
    time: f64,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Render job JSON.
    #[arg(long, conflicts_with = "template")]
    job: Option<PathBuf>,

    /// Template id (when not using a job file).
    #[arg(long, required_unless_present = "job")]
    template: Option<String>,

    /// Raw parameter JSON file; overrides the job's params.
    #[arg(long)]
    params: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    #[arg(long)]
    time: Option<f64>,

    /// Seed for the imperfection pass.
    #[arg(long)]
    seed: Option<u64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Print the frame fingerprint (xxh3, hex) to stdout.
    #[arg(long)]
    fingerprint: bool,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Render job JSON with a `frames` section.
    #[arg(long)]
    job: PathBuf,

    /// Output directory for `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let registry = logoforge::TemplateRegistry::builtin();
    match cli.cmd {
        Command::List => cmd_list(&registry),
        Command::Schema(args) => cmd_schema(&registry, args),
        Command::Resolve(args) => cmd_resolve(&registry, args),
        Command::Render(args) => cmd_render(&registry, args),
        Command::Frames(args) => cmd_frames(&registry, args),
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("LOGOFORGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let f = File::open(path).with_context(|| format!("open params '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse params JSON '{}'", path.display()))
}

fn cmd_list(registry: &logoforge::TemplateRegistry) -> anyhow::Result<()> {
    for t in registry.iter() {
        let m = t.metadata();
        println!("{:<10} {:<18} {:<10} {}", m.id, m.name, m.category, m.description);
    }
    Ok(())
}

fn cmd_schema(registry: &logoforge::TemplateRegistry, args: SchemaArgs) -> anyhow::Result<()> {
    let template = registry.get(&args.id)?;
    let entry = logoforge::TemplateEntry {
        metadata: template.metadata(),
        parameters: template.schema(),
        default_params: template.default_params(),
    };
    println!("{}", serde_json::to_string_pretty(&entry)?);
    Ok(())
}

fn cmd_resolve(registry: &logoforge::TemplateRegistry, args: ResolveArgs) -> anyhow::Result<()> {
    let template = registry.get(&args.id)?;
    let raw = match &args.params {
        Some(p) => read_json(p)?,
        None => serde_json::Value::Null,
    };
    let resolved = logoforge::resolve(&raw, template.schema(), args.width, args.height, args.time);
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

fn cmd_render(registry: &logoforge::TemplateRegistry, args: RenderArgs) -> anyhow::Result<()> {
    let mut job = match (&args.job, &args.template) {
        (Some(path), _) => logoforge::RenderJob::from_path(path)?,
        (None, Some(id)) => logoforge::RenderJob::new(id.clone()),
        (None, None) => anyhow::bail!("either --job or --template is required"),
    };
    if let Some(p) = &args.params {
        job.params = read_json(p)?;
    }
    if let Some(w) = args.width {
        job.width = w;
    }
    if let Some(h) = args.height {
        job.height = h;
    }
    if let Some(t) = args.time {
        job.time = t;
    }
    if args.seed.is_some() {
        job.seed = args.seed;
    }

    let out = logoforge::render_job(registry, &job)?;
    write_png(&args.out, &out.frame)?;
    tracing::info!(passes = ?out.report.executed, "rendered");
    if args.fingerprint {
        println!("{:016x}", out.frame.fingerprint());
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(registry: &logoforge::TemplateRegistry, args: FramesArgs) -> anyhow::Result<()> {
    let job = logoforge::RenderJob::from_path(&args.job)?;
    let frames = logoforge::render_series(registry, &job)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for (i, f) in frames.iter().enumerate() {
        write_png(&args.out_dir.join(format!("frame_{i:05}.png")), &f.frame)?;
    }
    eprintln!("wrote {} frames to {}", frames.len(), args.out_dir.display());
    Ok(())
}

fn write_png(path: &Path, frame: &logoforge::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
