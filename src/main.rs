//! Curved-Mirror Renderer.
//!
//! Rendert ein Bild (oder ein Testbild) über einen aus Ankern gestalteten
//! Spiegel und schreibt das Ergebnis als PNG.

use anyhow::{Context, Result};
use clap::Parser;
use curved_mirror::{render_frame, MirrorDesigner, MirrorOptions, RenderScene, SourceFrame};
use glam::DVec2;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "curved-mirror-render",
    version,
    about = "Spiegelung eines Bildes an einem gekrümmten Spiegel"
)]
struct Cli {
    /// Quellbild (PNG, JPEG); ohne Angabe wird ein Testbild verwendet
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Ausgabe-PNG
    #[arg(short, long, default_value = "mirror.png")]
    output: PathBuf,

    /// Ausgabebreite in Pixeln
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Ausgabehöhe in Pixeln
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Optionen-Datei (TOML), Standard: neben der Binary
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Anker als "tiefe,höhe" (mehrfach angebbar, z.B. -a=-0.5,0)
    #[arg(short, long = "anchor", value_parser = parse_anchor, allow_hyphen_values = true)]
    anchors: Vec<DVec2>,

    /// Schreibt die verwendeten Optionen zurück in die Optionen-Datei
    #[arg(long)]
    save_config: bool,
}

fn parse_anchor(text: &str) -> Result<DVec2, String> {
    let (depth, height) = text
        .split_once(',')
        .ok_or_else(|| format!("Anker '{}' erwartet Format tiefe,höhe", text))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("Anker '{}': {}", text, e))
    };
    Ok(DVec2::new(parse(depth)?, parse(height)?))
}

fn main() -> Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "Curved-Mirror Renderer v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(MirrorOptions::config_path);
    let options = MirrorOptions::load_from_file(&config_path);

    let mut designer = MirrorDesigner::new(options);
    for anchor in &cli.anchors {
        designer
            .add_anchor(*anchor)
            .with_context(|| format!("Anker ({:.3}, {:.3}) abgelehnt", anchor.x, anchor.y))?;
    }
    log::info!(
        "Profil: {} Anker, {} Segmente, Toleranz {:.4}",
        designer.anchors().len(),
        designer.profile().len(),
        designer.effective_tolerance()
    );

    let frame = match &cli.input {
        Some(path) => SourceFrame::load(path)?,
        None => {
            log::info!("Kein Quellbild angegeben, verwende Testbild");
            SourceFrame::test_pattern(cli.width, cli.height)
        }
    };

    let scene = RenderScene::from_channel(&designer.channel(), designer.options());
    let image = render_frame(&scene, &frame, cli.width, cli.height);
    image
        .save(&cli.output)
        .with_context(|| format!("Fehler beim Schreiben von {}", cli.output.display()))?;
    log::info!(
        "Ausgabe geschrieben: {} ({}x{})",
        cli.output.display(),
        cli.width,
        cli.height
    );

    if cli.save_config {
        designer.options().save_to_file(&config_path)?;
    }
    Ok(())
}
