use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use obj2gltf::json::ValidationError;
use obj2gltf::{convert_file, document, ConverterOptions};

#[derive(Parser)]
#[command(name = "obj2gltf")]
#[command(about = "Convert WaveFront OBJ models to glTF 2.0")]
#[command(version, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    convert: ConvertArgs,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a .gltf or .glb file and list its problems
    Validate {
        file: PathBuf,
    },
}

#[derive(Args)]
struct ConvertArgs {
    /// Input .obj file
    input: Option<PathBuf>,

    /// Output file (.gltf or .glb); defaults to the input name
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a binary .glb container
    #[arg(long)]
    glb: bool,

    /// Write the buffer to a .bin file beside the .gltf
    #[arg(long)]
    separate_binary: bool,

    /// Pack textures into the buffer instead of copying them
    #[arg(long)]
    embed_textures: bool,

    /// YAML file with converter options; flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match cli.command {
        Some(Commands::Validate { file }) => validate(&file),
        None => convert(cli.convert),
    }
}

fn is_glb_path(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("glb"))
}

fn convert(args: ConvertArgs) -> Result<()> {
    let input = args.input.context("no input file given")?;
    let mut options = match &args.config {
        Some(config) => ConverterOptions::load(config)?,
        None => ConverterOptions::default(),
    };
    options.glb |= args.glb || args.output.as_deref().map_or(false, is_glb_path);
    options.separate_binary |= args.separate_binary;
    if args.embed_textures {
        options.separate_textures = false;
    }

    let output = args
        .output
        .unwrap_or_else(|| input.with_extension(if options.glb { "glb" } else { "gltf" }));
    info!("converting {} -> {}", input.display(), output.display());

    let errors = convert_file(&input, &output, options)?;
    report(&errors);
    Ok(())
}

fn report(errors: &[ValidationError]) {
    for error in errors {
        warn!("{}", error);
    }
    if !errors.is_empty() {
        warn!("output has {} validation errors", errors.len());
    }
}

fn validate(file: &Path) -> Result<()> {
    let root = document::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let errors = root.validate();
    if errors.is_empty() {
        info!("{} is valid", file.display());
        return Ok(());
    }
    for error in &errors {
        println!("{}", error);
    }
    bail!("{} has {} validation errors", file.display(), errors.len())
}
