use std::{
    io::{self, BufRead},
    path::PathBuf,
};

use anyhow::{Context as _, Result};
use clap::Parser;
use game_core::{Game, InputEvent};
use shared::{
    config::PuzzleConfig,
    domain::{Cell, Direction, RevealState},
};

/// Headless harness for the game core: reads one command per line from
/// stdin and prints the resulting render instructions as JSON.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "puzzle.toml")]
    puzzle: PathBuf,
}

enum Command {
    Event(InputEvent),
    ShowMap,
    Quit,
}

fn parse_command(config: &PuzzleConfig, line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(keyword) = parts.next() else {
        return Ok(None);
    };

    let command = match keyword {
        "select" => {
            let label = parts.next().ok_or("usage: select <label>")?;
            let feature = config.feature_id(label).map_err(|err| err.to_string())?;
            Command::Event(InputEvent::SelectFeature(feature))
        }
        "click" => {
            let x_px = parts
                .next()
                .and_then(|value| value.parse::<f32>().ok())
                .ok_or("usage: click <x> <y>")?;
            let y_px = parts
                .next()
                .and_then(|value| value.parse::<f32>().ok())
                .ok_or("usage: click <x> <y>")?;
            Command::Event(InputEvent::PointerDown { x_px, y_px })
        }
        "move" => {
            let direction = match parts.next() {
                Some("left") => Direction::Left,
                Some("right") => Direction::Right,
                Some("up") => Direction::Up,
                Some("down") => Direction::Down,
                _ => return Err("usage: move <left|right|up|down>".to_string()),
            };
            Command::Event(InputEvent::DirectionalKey(direction))
        }
        "guess" => {
            let text = parts.collect::<Vec<_>>().join(" ");
            Command::Event(InputEvent::SubmitGuess(text))
        }
        "map" => Command::ShowMap,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(Some(command))
}

fn print_map(game: &Game) {
    let feature = game.selected_feature();
    let snapshot = game.snapshot(feature);
    let side = snapshot.side();
    println!("{} map:", game.model().label(feature));
    for row in 0..side {
        let line: String = (0..side)
            .map(|col| match snapshot.at(Cell::new(row, col)) {
                RevealState::Unrevealed => '.',
                RevealState::RevealedTrue => '#',
                RevealState::RevealedFalse => 'o',
            })
            .collect();
        println!("{line}");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let config = PuzzleConfig::load_from_path(&args.puzzle)
        .with_context(|| format!("failed to load puzzle '{}'", args.puzzle.display()))?;
    let mut game = Game::new(&config, false)?;

    let side = config.geometry.feature_map_size();
    println!(
        "{} ({} features, {side}x{side} feature map)",
        config.title,
        config.features.len()
    );
    println!("commands: select <label> | click <x> <y> | move <dir> | guess <text> | map | quit");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match parse_command(&config, line.trim()) {
            Ok(Some(Command::Event(event))) => {
                for instruction in game.apply(event) {
                    println!("{}", serde_json::to_string(&instruction)?);
                }
            }
            Ok(Some(Command::ShowMap)) => print_map(&game),
            Ok(Some(Command::Quit)) => break,
            Ok(None) => {}
            Err(message) => println!("error: {message}"),
        }
    }

    Ok(())
}
