use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use trimap_brush::script::{parse_script, ScriptCommand};
use trimap_brush::{Editor, InitMode, Palette, SelectionRect, TrimapSnapshot};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source image. Without one a blank canvas of --width x --height is used
    image: Option<PathBuf>,

    /// Gesture script to replay (down/move/up X Y, brush MODE [RADIUS], reset)
    #[arg(short, long)]
    script: PathBuf,

    /// Directory for preview, maps and trimap.json
    #[arg(short, long, default_value = "trimap-out")]
    output_dir: PathBuf,

    /// Palette JSON file (colors, alpha codes, brush limits)
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Initial brush radius, overriding the palette default
    #[arg(long)]
    radius: Option<u32>,

    /// Blank canvas width
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Blank canvas height
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[derive(Serialize)]
struct TrimapInfo {
    width: u32,
    height: u32,
    rectangle: SelectionRect,
    init_mode: InitMode,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let palette = match &args.palette {
        Some(path) => Palette::from_json_file(path).context("Failed to load palette")?,
        None => Palette::default(),
    };

    let mut editor = match &args.image {
        Some(path) => {
            tracing::info!("Loading image from {}", path.display());
            let base = image::open(path)
                .with_context(|| format!("Failed to open image {}", path.display()))?
                .to_rgb8();
            Editor::start(base, palette)
        }
        None => {
            tracing::info!("Using blank {}x{} canvas", args.width, args.height);
            Editor::blank(args.width, args.height, palette)
        }
    }
    .context("Failed to start session")?;

    if let Some(radius) = args.radius {
        editor.set_radius(radius).context("Invalid --radius")?;
    }

    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let commands = parse_script(&text).context("Failed to parse script")?;

    replay(&mut editor, &commands)?;

    write_outputs(&args.output_dir, editor)?;

    Ok(())
}

fn replay(editor: &mut Editor, commands: &[ScriptCommand]) -> Result<()> {
    let start = Instant::now();
    let mut applied = 0u64;
    let mut ignored = 0u64;

    tracing::info!("Replaying {} commands", commands.len());

    for command in commands {
        match *command {
            ScriptCommand::Pointer(event) => {
                if editor.handle(event).is_ignored() {
                    ignored += 1;
                } else {
                    applied += 1;
                }
            }
            ScriptCommand::Brush { mode, radius } => {
                editor.select_mode(mode).context("Invalid brush mode")?;
                if let Some(radius) = radius {
                    editor.set_radius(radius).context("Invalid brush radius")?;
                }
            }
            ScriptCommand::Reset => editor.reset().context("Failed to reset session")?,
        }
    }

    tracing::info!(
        "Replay done: applied={}, ignored={}, elapsed={:.1}ms",
        applied,
        ignored,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

fn write_outputs(dir: &Path, editor: Editor) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let save = |name: &str, result: image::ImageResult<()>| -> Result<()> {
        result.with_context(|| format!("Failed to write {}", dir.join(name).display()))?;
        tracing::info!("Wrote {}", dir.join(name).display());
        Ok(())
    };

    save("preview.png", editor.preview().save(dir.join("preview.png")))?;

    let snapshot: TrimapSnapshot = editor
        .finish()
        .context("Script never finalized a selection rectangle")?;

    save("alpha.png", snapshot.alpha_visualization().save(dir.join("alpha.png")))?;
    save(
        "classification.png",
        snapshot
            .classification_visualization()
            .save(dir.join("classification.png")),
    )?;
    save("foreground.png", snapshot.foreground_mask().save(dir.join("foreground.png")))?;

    let (width, height) = snapshot.dimensions();
    let info = TrimapInfo {
        width,
        height,
        rectangle: snapshot.rectangle,
        init_mode: snapshot.init_mode,
    };
    let json = serde_json::to_string_pretty(&info)?;
    std::fs::write(dir.join("trimap.json"), json).context("Failed to write trimap.json")?;

    Ok(())
}
