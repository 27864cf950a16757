//! Data model shared by the parser, the writer and the converter.

mod key_map;
mod ply_data_structure;
mod vertex;

pub use self::key_map::*;
pub use self::ply_data_structure::*;
pub use self::vertex::*;
