use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use game_core::FeatureModel;
use shared::{config::PuzzleConfig, domain::Cell};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "puzzle.toml")]
    puzzle: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the puzzle file is well formed.
    Validate,
    /// List configured features and their activation counts.
    Features,
    /// Print one feature's ground-truth activation map.
    Show { label: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = PuzzleConfig::load_from_path(&cli.puzzle)?;
    let model = FeatureModel::from_config(&config)?;
    let side = model.feature_map_size();

    match cli.command {
        Command::Validate => {
            println!(
                "puzzle '{}' is valid: {} features, {}x{} image, {side}x{side} feature map",
                config.title,
                model.feature_count(),
                config.geometry.image_size,
                config.geometry.image_size,
            );
        }
        Command::Features => {
            for feature in model.feature_ids() {
                let active = (0..side)
                    .flat_map(|row| (0..side).map(move |col| Cell::new(row, col)))
                    .filter(|&cell| model.activation_at(feature, cell))
                    .count();
                println!("{:<12} {active} active cells", model.label(feature));
            }
        }
        Command::Show { label } => {
            let feature = config.feature_id(&label)?;
            for row in 0..side {
                let line: String = (0..side)
                    .map(|col| {
                        if model.activation_at(feature, Cell::new(row, col)) {
                            '#'
                        } else {
                            '.'
                        }
                    })
                    .collect();
                println!("{line}");
            }
        }
    }

    Ok(())
}
