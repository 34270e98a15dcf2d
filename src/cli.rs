//! `whiteboard` replay tool.
//!
//! Replays a recorded list of input events onto a picture kept in a
//! directory of JSON files, saves it, and prints the resulting path
//! descriptors:
//!
//!   whiteboard --store pictures/ --events strokes.json
//!   whiteboard --store pictures/ --picture 0123..cdef --events more.json --title "Plan"

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use futures::executor::block_on;
use serde::Deserialize;

use whiteboard::{
    DrawingSurface, FileGateway, InputEvent, PictureId, PictureStore, SurfaceConfig,
    SurfaceGeometry, ToolKind,
};

#[derive(Parser, Debug)]
#[command(name = "whiteboard", about = "Replay recorded input onto a whiteboard picture")]
pub struct CliArgs {
    /// Directory holding one `<id>.json` per picture
    #[arg(short, long, value_name = "DIR")]
    pub store: PathBuf,

    /// Picture to draw on. A new picture is created when omitted.
    #[arg(short, long, value_name = "ID")]
    pub picture: Option<PictureId>,

    /// JSON array of input events and tool changes to replay
    #[arg(short, long, value_name = "FILE")]
    pub events: PathBuf,

    /// Surface settings (JSON); defaults apply when omitted
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Rename the picture before saving
    #[arg(short, long)]
    pub title: Option<String>,

    /// Accept only stylus touches, overriding the config file
    #[arg(long)]
    pub palm_rejection: bool,
}

/// One entry of a replay script
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReplayStep {
    Input(InputEvent),
    Tool { tool: ToolKind },
    Bind { geometry: SurfaceGeometry },
}

pub fn run(args: CliArgs) -> ExitCode {
    match replay(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn replay(args: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => SurfaceConfig::load(path)?,
        None => SurfaceConfig::default(),
    };
    if args.palm_rejection {
        config.palm_rejection = true;
    }

    let script: Vec<ReplayStep> = serde_json::from_str(&fs::read_to_string(&args.events)?)?;

    let store = PictureStore::new(Arc::new(FileGateway::new(&args.store)));
    let mut surface = DrawingSurface::new(store, config);
    block_on(surface.open(args.picture.clone()))?;

    let mut suppressed = 0;
    for step in &script {
        match step {
            ReplayStep::Input(event) => {
                if surface.handle_event(event).suppress_default() {
                    suppressed += 1;
                }
            }
            ReplayStep::Tool { tool } => surface.select_tool(*tool),
            ReplayStep::Bind { geometry } => surface.bind(*geometry),
        }
    }
    log::info!("Replayed {} steps ({} consumed touches)", script.len(), suppressed);

    if let Some(title) = &args.title {
        surface.set_title(title.clone());
    }

    if let Some(id) = block_on(surface.save())? {
        println!("{}", id);
    }
    for descriptor in surface.path_descriptors() {
        println!("{}", descriptor);
    }
    Ok(())
}
