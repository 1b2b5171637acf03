//! Dump the decoded tile grids of a TMX map
//!
//! Run with: cargo run --bin layer-dump -- map.tmx [--layer ground]

use std::path::PathBuf;

use clap::Parser;

use tiled_terrain::load_map;

#[derive(Parser)]
#[command(name = "layer-dump")]
#[command(about = "Print the tile identifiers of each layer")]
struct Cli {
    map: PathBuf,
    /// Only dump the layer with this name
    #[arg(long)]
    layer: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let map = load_map(&cli.map)?;
    println!("Map: {}x{} tiles, {} tilesets", map.width, map.height, map.tilesets.len());
    for tileset in &map.tilesets {
        println!(
            "  tileset '{}': gids {}..{} ({} terrains)",
            tileset.name,
            tileset.first_gid,
            tileset.end_gid(),
            tileset.terrain_types.len()
        );
    }

    let layers = map
        .layers
        .iter()
        .filter(|l| cli.layer.as_deref().map_or(true, |name| l.name == name));
    for layer in layers {
        println!("\nLayer '{}' ({}x{}):", layer.name, layer.width, layer.height);
        if layer.width == 0 {
            continue;
        }
        for row in layer.cells().chunks(layer.width as usize) {
            let line: Vec<String> = row.iter().map(|gid| format!("{:4}", gid)).collect();
            println!("{}", line.join(""));
        }
    }

    Ok(())
}
