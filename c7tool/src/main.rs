use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use c7data::save::{self, ArchiveCompression, SaveConfig};

#[derive(Parser)]
#[command(name = "c7tool")]
#[command(version, about = "Convert and inspect C7 save files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a save and write it back out; the container follows each extension
    Convert {
        /// Save to read (.json or .zip)
        input: PathBuf,

        /// Save to write (.json or .zip)
        output: PathBuf,

        /// Write the JSON payload without indentation
        #[arg(long)]
        compact: bool,

        /// Store the archive entry uncompressed
        #[arg(long)]
        stored: bool,
    },

    /// Show a summary of a save
    Info {
        /// Save to read (.json or .zip)
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            compact,
            stored,
        } => {
            log::info!("Converting {} to {}", input.display(), output.display());
            let game = save::load_game(&input)
                .with_context(|| format!("Failed to load {}", input.display()))?;
            let config = SaveConfig {
                pretty: !compact,
                compression: if stored {
                    ArchiveCompression::Stored
                } else {
                    ArchiveCompression::Deflated
                },
            };
            log::debug!(
                "Writing with pretty={} compression={:?}",
                config.pretty,
                config.compression
            );
            save::save_game_with_config(&game, &output, &config)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Wrote {}", output.display());
        }
        Commands::Info { path } => {
            log::info!("Reading save file: {}", path.display());
            let raw = save::read_save_format(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let version = raw.version.clone();
            log::debug!("Save version {}", version);
            let game = raw
                .resolve()
                .with_context(|| format!("Save {} is corrupt", path.display()))?;

            println!("Version:          {}", version);
            println!(
                "Map:              {}x{} ({} tiles)",
                game.map.num_tiles_wide,
                game.map.num_tiles_tall,
                game.map.tiles().len()
            );
            println!("Terrain types:    {}", game.terrain_types.len());
            println!("Resources:        {}", game.resources.len());
            println!("Unit prototypes:  {}", game.unit_prototypes.len());
            println!("Units:            {}", game.map_units.len());
            if let Some(level) = &game.default_experience_level {
                println!("Default level:    {}", level.key);
            }
            let barbarians = &game.barbarian_info;
            let names = [
                &barbarians.basic_barbarian,
                &barbarians.advanced_barbarian,
                &barbarians.barbarian_sea_unit,
            ]
            .iter()
            .map(|p| p.as_ref().map_or("-", |p| p.name.as_str()))
            .collect::<Vec<_>>();
            println!("Barbarians:       {}", names.join(" / "));
        }
    }

    Ok(())
}
