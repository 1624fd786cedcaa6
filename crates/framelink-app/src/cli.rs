use std::path::PathBuf;

use clap::Parser;

use crate::rect_selector::{Action, CanvasRect};

/// Framelink host simulator: plays the host page over stdin/stdout and
/// drives the rect selector component through the bridge.
#[derive(Parser, Debug)]
#[command(name = "framelink", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter directive override (e.g. `framelink=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// What the simulated user does after each render.
    #[arg(long, value_enum, default_value_t = Action::Confirm)]
    pub action: Action,

    /// Canvas-space selection `x,y,w,h` made before acting.
    #[arg(long)]
    pub select: Option<CanvasRect>,

    /// Content height before the first render, overriding the config.
    #[arg(long)]
    pub fallback_height: Option<u32>,
}

pub fn parse() -> Args {
    Args::parse()
}
