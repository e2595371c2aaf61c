//! Command-line front end: render a docked structure headlessly and export a snapshot.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use biodockviz::renderer::OffscreenRenderer;
use biodockviz::snapshot::{DirectorySink, ExportEvent};
use biodockviz::viewer::ViewerStatus;
use biodockviz::{Options, StructureData, Viewer, VisualizationState, VizError};
use clap::Parser;

#[derive(Parser)]
#[command(name = "biodockviz")]
#[command(about = "Render a docked structure headlessly and export a snapshot", long_about = None)]
struct Cli {
    /// Parsed structure document (JSON)
    structure: PathBuf,

    /// Visualization state (JSON); defaults apply when omitted
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Options TOML file
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Directory receiving the image and its metadata
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Override the render width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Override the render height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Write the options JSON schema to FILE and exit
    #[arg(long, value_name = "FILE")]
    dump_schema: Option<PathBuf>,
}

fn load_state(path: &Path) -> Result<VisualizationState, VizError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn run(cli: Cli) -> Result<(), VizError> {
    if let Some(path) = &cli.dump_schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())?;
        std::fs::write(path, schema)?;
        log::info!("wrote options schema to {}", path.display());
        return Ok(());
    }

    let mut options = match &cli.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if let Some(width) = cli.width {
        options.render.width = width;
    }
    if let Some(height) = cli.height {
        options.render.height = height;
    }
    let state = match &cli.state {
        Some(path) => load_state(path)?,
        None => VisualizationState::default(),
    };
    let structure = StructureData::load(&cli.structure)?;
    log::info!(
        "loaded {} ({} atoms)",
        structure.id,
        structure.atoms.len()
    );

    let target = OffscreenRenderer::headless(options.render.clone())?;
    let mut viewer = Viewer::builder()
        .with_options(options)
        .with_state(state)
        .with_sink(Arc::new(DirectorySink::new(&cli.out_dir)))
        .on_state_change(|patch| log::debug!("state patch: {patch:?}"))
        .build(target);

    viewer.set_structure(Some(Arc::new(structure)));
    let _ = viewer.frame(web_time::Instant::now());
    match viewer.status() {
        ViewerStatus::Ready => {}
        ViewerStatus::Error(msg) => return Err(VizError::Render(msg.clone())),
        other => {
            return Err(VizError::Capture(format!(
                "nothing to export ({other:?})"
            )))
        }
    }

    viewer.export_snapshot(chrono::Utc::now())?;
    match viewer.exporter_mut().wait() {
        Some(ExportEvent::Completed(outcome)) => {
            log::info!(
                "exported {} and {} to {}",
                outcome.image_name,
                outcome.metadata_name,
                cli.out_dir.display()
            );
            Ok(())
        }
        Some(ExportEvent::Failed(msg)) => Err(VizError::Encode(msg)),
        None => Err(VizError::Capture("export did not start".into())),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
