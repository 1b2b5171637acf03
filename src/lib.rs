//! Tiled Map Loader
//!
//! Reads TMX tile maps, decodes every tile layer's payload into a grid of
//! bare tile identifiers and answers terrain occupancy queries over the grid.

pub mod codec;
pub mod error;
pub mod markup;
pub mod state;

pub use codec::{Compression, Encoding, Payload, TileFlags};
pub use error::{DecodeError, Error, Result};
pub use state::{
    load_map, Layer, MapDocument, TerrainMask, TerrainType, TileImage, TileSet, TileSetEntry,
};
