use indexmap::IndexMap;

use crate::codec::gid::GID_MASK;

/// Source image backing a tile set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileImage {
    pub source: String,
    pub width: u32,
    pub height: u32,
}

/// A named terrain. Its identity is its position in the owning tile set's
/// terrain list, not a stored field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainType {
    pub name: String,
    /// Local id of the tile representing this terrain
    pub tile: Option<u32>,
}

/// Per-tile metadata inside a tile set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSetEntry {
    pub local_id: u32,
    /// Comma-joined terrain indices, one per tile corner (empty = no terrain)
    pub terrain: String,
}

impl TileSetEntry {
    pub fn new(local_id: u32, terrain: impl Into<String>) -> Self {
        Self {
            local_id,
            terrain: terrain.into(),
        }
    }

    /// Terrain indices referenced by the corners, skipping empty corners.
    pub fn terrain_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.terrain
            .split(',')
            .filter_map(|token| token.trim().parse::<usize>().ok())
    }

    /// Whether any corner references terrain `index`.
    pub fn references(&self, index: usize) -> bool {
        self.terrain_indices().any(|i| i == index)
    }
}

/// A tile set owning the contiguous global id range starting at `first_gid`
#[derive(Debug, Clone, Default)]
pub struct TileSet {
    pub first_gid: u32,
    pub name: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub spacing: u32,
    pub margin: u32,
    pub tile_count: u32,
    pub columns: u32,
    pub image: Option<TileImage>,
    /// Entries keyed by local id, in document order
    pub tiles: IndexMap<u32, TileSetEntry>,
    pub terrain_types: Vec<TerrainType>,
}

impl TileSet {
    pub fn new(first_gid: u32, tile_count: u32, columns: u32) -> Self {
        Self {
            first_gid,
            tile_count,
            columns,
            ..Default::default()
        }
    }

    pub fn add_entry(&mut self, entry: TileSetEntry) {
        self.tiles.insert(entry.local_id, entry);
    }

    pub fn add_terrain(&mut self, name: impl Into<String>, tile: Option<u32>) {
        self.terrain_types.push(TerrainType { name: name.into(), tile });
    }

    /// Position of the first terrain named `name`. When absent this is the
    /// terrain count, an index no corner can validly reference.
    pub fn terrain_index(&self, name: &str) -> usize {
        self.terrain_types
            .iter()
            .position(|t| t.name == name)
            .unwrap_or(self.terrain_types.len())
    }

    /// Global id of `local_id`, or `None` when it would not fit in the 28
    /// identifier bits.
    pub fn global_id(&self, local_id: u32) -> Option<u32> {
        self.first_gid
            .checked_add(local_id)
            .filter(|&gid| gid <= GID_MASK)
    }

    /// One past the last gid of this set, saturating at the identifier range
    pub fn end_gid(&self) -> u32 {
        self.first_gid.saturating_add(self.tile_count).min(GID_MASK + 1)
    }

    /// Whether `gid` lies in this set's range. A set without a declared tile
    /// count is treated as open-ended.
    pub fn contains(&self, gid: u32) -> bool {
        if gid < self.first_gid {
            return false;
        }
        self.tile_count == 0 || gid - self.first_gid < self.tile_count
    }

    pub fn local_id(&self, gid: u32) -> Option<u32> {
        self.contains(gid).then(|| gid - self.first_gid)
    }

    pub fn entry_for_gid(&self, gid: u32) -> Option<&TileSetEntry> {
        self.local_id(gid).and_then(|id| self.tiles.get(&id))
    }

    /// Entries with at least one corner of terrain `index`.
    pub fn entries_with_terrain(&self, index: usize) -> impl Iterator<Item = &TileSetEntry> + '_ {
        self.tiles.values().filter(move |e| e.references(index))
    }

    pub fn rows(&self) -> u32 {
        if self.columns == 0 {
            0
        } else {
            self.tile_count.div_ceil(self.columns)
        }
    }
}
