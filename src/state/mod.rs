pub mod layer;
pub mod map;
pub mod terrain;
pub mod tileset;

pub use layer::{build_grid, Layer};
pub use map::{load_map, MapDocument};
pub use terrain::{resolve_mask, TerrainMask};
pub use tileset::{TerrainType, TileImage, TileSet, TileSetEntry};
