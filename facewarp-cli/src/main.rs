use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "facewarp", version)]
struct Cli {
    /// More log output (repeat for trace level).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bake a UV texture from a photo, a mesh asset and exported landmarks.
    Bake(BakeArgs),
    /// Export the mesh asset's triangle index and UV buffers.
    Buffers(BuffersArgs),
}

#[derive(Parser, Debug)]
struct BakeArgs {
    /// JSON bake config; flags given on the command line override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input photograph.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Mesh asset (Wavefront OBJ with `vt` records).
    #[arg(long)]
    mesh: Option<PathBuf>,

    /// Landmark JSON exported by a face-mesh detector.
    #[arg(long)]
    landmarks: PathBuf,

    /// Output texture path (PNG unless the extension says otherwise).
    #[arg(long)]
    out: PathBuf,

    /// Also write mesh buffers (.ts/.js/.mjs module or .json).
    #[arg(long)]
    buffers: Option<PathBuf>,

    /// Square output size in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Number of mesh vertices (and landmarks per face).
    #[arg(long)]
    vertex_count: Option<usize>,

    /// How vertices are paired with texture coordinates.
    #[arg(long, value_enum)]
    uv_mapping: Option<UvMappingArg>,

    /// Where the warped triangles come from.
    #[arg(long, value_enum)]
    triangles: Option<TrianglesArg>,

    /// Use the face at this detection index instead of the first.
    #[arg(long)]
    face: Option<usize>,

    /// Warp triangles on a single thread.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Triangles warped per batch.
    #[arg(long)]
    chunk_size: Option<usize>,
}

#[derive(Parser, Debug)]
struct BuffersArgs {
    /// Mesh asset (Wavefront OBJ).
    #[arg(long)]
    mesh: PathBuf,

    /// Output path (.ts/.js/.mjs module or .json).
    #[arg(long)]
    out: PathBuf,

    /// Number of mesh vertices.
    #[arg(long, default_value_t = facewarp::FACE_MESH_VERTEX_COUNT)]
    vertex_count: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UvMappingArg {
    FaceAssociation,
    Positional,
}

impl From<UvMappingArg> for facewarp::UvMapping {
    fn from(value: UvMappingArg) -> Self {
        match value {
            UvMappingArg::FaceAssociation => Self::FaceAssociation,
            UvMappingArg::Positional => Self::Positional,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TrianglesArg {
    Delaunay,
    MeshFaces,
    Auto,
}

impl From<TrianglesArg> for facewarp::TriangleSource {
    fn from(value: TrianglesArg) -> Self {
        match value {
            TrianglesArg::Delaunay => Self::Delaunay,
            TrianglesArg::MeshFaces => Self::MeshFaces,
            TrianglesArg::Auto => Self::Auto,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    match cli.cmd {
        Command::Bake(args) => cmd_bake(args),
        Command::Buffers(args) => cmd_buffers(args),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::WARN,
        (false, 0) => LevelFilter::INFO,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn load_config(path: &Path) -> anyhow::Result<facewarp::BakeConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read bake config '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse bake config '{}'", path.display()))
}

fn bake_config(args: &BakeArgs) -> anyhow::Result<facewarp::BakeConfig> {
    let mut cfg = match &args.config {
        Some(path) => load_config(path)?,
        None => facewarp::BakeConfig::default(),
    };

    if let Some(image) = &args.image {
        cfg.image_path = image.clone();
    }
    if let Some(mesh) = &args.mesh {
        cfg.mesh_path = mesh.clone();
    }
    if let Some(size) = args.size {
        cfg.output_size = facewarp::TextureSize::square(size)?;
    }
    if let Some(n) = args.vertex_count {
        cfg.vertex_count = n;
    }
    if let Some(mapping) = args.uv_mapping {
        cfg.uv_mapping = mapping.into();
    }
    if let Some(source) = args.triangles {
        cfg.triangles = source.into();
    }
    if let Some(index) = args.face {
        cfg.face_selection = facewarp::FaceSelection::Index(index);
    }
    if args.sequential {
        cfg.threading.parallel = false;
    }
    if let Some(threads) = args.threads {
        cfg.threading.threads = Some(threads);
    }
    if let Some(chunk_size) = args.chunk_size {
        cfg.threading.chunk_size = chunk_size;
    }

    if cfg.image_path.as_os_str().is_empty() {
        anyhow::bail!("no input photo: pass --image or set image_path in --config");
    }
    if cfg.mesh_path.as_os_str().is_empty() {
        anyhow::bail!("no mesh asset: pass --mesh or set mesh_path in --config");
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_bake(args: BakeArgs) -> anyhow::Result<()> {
    let cfg = bake_config(&args)?;
    tracing::debug!(?cfg, "bake config");
    let provider = facewarp::JsonLandmarkProvider::load(&args.landmarks)?;

    let stats = facewarp::bake_and_save(&cfg, &provider, &args.out, args.buffers.as_deref())?;

    eprintln!(
        "wrote {} ({} of {} triangles, {} skipped)",
        args.out.display(),
        stats.patches_composited,
        stats.triangles_total,
        stats.triangles_skipped
    );
    if let Some(buffers) = &args.buffers {
        eprintln!("wrote {}", buffers.display());
    }
    Ok(())
}

fn cmd_buffers(args: BuffersArgs) -> anyhow::Result<()> {
    let asset = facewarp::ObjAsset::load(&args.mesh)?;
    let buffers = facewarp::MeshBuffers::from_asset(&asset, args.vertex_count)?;
    buffers.save(&args.out)?;

    eprintln!(
        "wrote {} ({} triangles)",
        args.out.display(),
        buffers.triangle_count()
    );
    Ok(())
}
