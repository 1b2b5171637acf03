//! Print terrain occupancy masks for a TMX map
//!
//! Run with: cargo run --bin terrain-mask -- map.tmx water sand

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde_json::json;

use tiled_terrain::{load_map, TerrainMask};

#[derive(Parser)]
#[command(name = "terrain-mask")]
#[command(about = "Compute which map cells are covered by a terrain")]
struct Cli {
    /// Path to the .tmx map
    map: PathBuf,
    /// Terrain names to query (defaults to every terrain in the map)
    terrains: Vec<String>,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let map = load_map(&cli.map)?;
    let terrains: Vec<String> = if cli.terrains.is_empty() {
        map.terrain_names().into_iter().map(String::from).collect()
    } else {
        cli.terrains
    };

    match cli.format {
        Format::Text => {
            for name in &terrains {
                let mask = map.terrain_mask(name);
                println!("{} ({} of {} cells):", name, mask.count(), mask.len());
                print_grid(&mask);
            }
        }
        Format::Json => {
            let masks: Vec<_> = terrains
                .iter()
                .map(|name| json!({ "terrain": name, "mask": map.terrain_mask(name) }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&masks)?);
        }
    }

    Ok(())
}

fn print_grid(mask: &TerrainMask) {
    for y in 0..mask.height {
        let row: String = (0..mask.width)
            .map(|x| if mask.get_at(x, y) { '#' } else { '.' })
            .collect();
        println!("  {}", row);
    }
}
