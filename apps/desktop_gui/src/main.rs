mod controller;
mod ui;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use game_core::{Game, InputEvent};
use shared::config::PuzzleConfig;
use tracing::{info, warn};

use crate::ui::app::{ConvGameApp, PersistedDesktopSettings, SETTINGS_STORAGE_KEY};

#[derive(Parser, Debug)]
struct Args {
    /// Path to the puzzle definition file.
    #[arg(long, default_value = "puzzle.toml")]
    puzzle: PathBuf,
}

fn resolve_puzzle_path(cli_path: PathBuf) -> PathBuf {
    if let Ok(value) = std::env::var("APP__PUZZLE_PATH") {
        if !value.trim().is_empty() {
            return PathBuf::from(value);
        }
    }
    cli_path
}

fn load_reveal_image(config: &PuzzleConfig) -> Option<egui::ColorImage> {
    let path = config.reveal_image.as_ref()?;
    match image::open(path) {
        Ok(decoded) => {
            let rgba = decoded.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            Some(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
        }
        Err(error) => {
            warn!(
                path = %path.display(),
                %error,
                "reveal image could not be loaded; continuing without it"
            );
            None
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let puzzle_path = resolve_puzzle_path(args.puzzle);
    let config = PuzzleConfig::load_from_path(&puzzle_path)
        .with_context(|| format!("failed to load puzzle '{}'", puzzle_path.display()))?;
    info!(
        title = config.title.as_str(),
        features = config.features.len(),
        "loaded puzzle"
    );

    let reveal_image = load_reveal_image(&config);
    let game = Game::new(&config, reveal_image.is_some())?;

    let (cmd_tx, cmd_rx) = bounded::<InputEvent>(256);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size([1460.0, 820.0])
            .with_min_inner_size([1100.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Convolution Teaching Game",
        options,
        Box::new(move |cc| {
            let persisted_settings = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedDesktopSettings>(&text).ok())
            });
            Ok(Box::new(ConvGameApp::new(
                config,
                game,
                reveal_image,
                cmd_tx,
                cmd_rx,
                persisted_settings,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to run desktop shell: {err}"))
}
