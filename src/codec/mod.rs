pub mod gid;
pub mod payload;
pub mod reader;

pub use gid::TileFlags;
pub use payload::{decode, decode_at_most, Compression, Encoding, Payload};
pub use reader::{BinaryReader, UnexpectedEof};
