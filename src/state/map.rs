use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::markup;
use super::layer::Layer;
use super::terrain::{resolve_mask, TerrainMask};
use super::tileset::TileSet;

/// A loaded map: tile sets plus fully decoded tile layers
#[derive(Debug, Clone, Default)]
pub struct MapDocument {
    pub version: String,
    pub orientation: String,
    pub render_order: String,
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tilesets: Vec<TileSet>,
    pub layers: Vec<Layer>,
}

impl MapDocument {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Occupancy of terrain `name` across all layers
    pub fn terrain_mask(&self, name: &str) -> TerrainMask {
        resolve_mask(self, name)
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Tile set owning `gid`: the one with the greatest first gid not above it
    pub fn tileset_for(&self, gid: u32) -> Option<&TileSet> {
        if gid == 0 {
            return None;
        }
        self.tilesets
            .iter()
            .filter(|t| t.first_gid <= gid)
            .max_by_key(|t| t.first_gid)
            .filter(|t| t.contains(gid))
    }

    /// Distinct terrain names across all tile sets, in first-seen order
    pub fn terrain_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for terrain in self.tilesets.iter().flat_map(|t| &t.terrain_types) {
            if !names.contains(&terrain.name.as_str()) {
                names.push(&terrain.name);
            }
        }
        names
    }
}

impl FromStr for MapDocument {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        markup::parse_map(text)
    }
}

/// Read and fully decode a map file. Any malformed layer fails the whole load.
pub fn load_map(path: impl AsRef<Path>) -> Result<MapDocument> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let map: MapDocument = text.parse()?;
    tracing::debug!(
        path = %path.display(),
        tilesets = map.tilesets.len(),
        layers = map.layers.len(),
        "loaded map"
    );
    Ok(map)
}
