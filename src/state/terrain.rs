use std::collections::HashSet;

use serde::Serialize;

use super::map::MapDocument;

/// Row-major occupancy mask of one terrain over the map grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerrainMask {
    pub width: u32,
    pub height: u32,
    cells: Vec<bool>,
}

impl TerrainMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> bool {
        self.cells.get(index).copied().unwrap_or(false)
    }

    pub fn get_at(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.get(y as usize * self.width as usize + x as usize)
    }

    pub fn set(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = true;
        }
    }

    /// Number of covered cells
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Indices of covered cells, ascending
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().enumerate().filter(|(_, c)| **c).map(|(i, _)| i)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

}

/// Mark every map cell covered, on any layer, by a tile whose terrain
/// assignment references `terrain`. Unknown names yield an all-false mask.
pub fn resolve_mask(map: &MapDocument, terrain: &str) -> TerrainMask {
    let mut mask = TerrainMask::new(map.width, map.height);

    for tileset in &map.tilesets {
        let index = tileset.terrain_index(terrain);
        if index == tileset.terrain_types.len() {
            continue;
        }
        let gids: HashSet<u32> = tileset
            .entries_with_terrain(index)
            .filter_map(|entry| tileset.global_id(entry.local_id))
            .collect();
        if gids.is_empty() {
            continue;
        }

        for layer in &map.layers {
            for (pos, gid) in layer.cells().iter().enumerate().take(mask.len()) {
                if gids.contains(gid) {
                    mask.set(pos);
                }
            }
        }
    }

    tracing::debug!(terrain, covered = mask.count(), "resolved terrain mask");
    mask
}
