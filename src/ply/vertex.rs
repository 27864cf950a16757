//! The per-vertex output record.

/// Input columns holding the position.
pub const POSITION_ATTRIBUTES: [&str; 3] = ["x", "y", "z"];

/// Input columns holding linear color channels in `[0, 1]`.
pub const COLOR_ATTRIBUTES: [&str; 3] = ["col_r", "col_g", "col_b"];

/// Property names of the color channels in the output.
pub const OUTPUT_COLOR_NAMES: [&str; 3] = ["red", "green", "blue"];

/// Bytes per binary record holding only a position.
pub const POSITION_RECORD_SIZE: usize = 3 * 4;

/// Bytes per binary record holding a position and a color.
pub const COLOR_RECORD_SIZE: usize = POSITION_RECORD_SIZE + 3;

/// One decoded vertex, ready to be written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position as stored in the output.
    pub position: [f32; 3],
    /// Gamma-encoded color, only present when colors are kept.
    pub color: Option<[u8; 3]>,
}

impl Vertex {
    /// A vertex without color.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Vertex { position: [x, y, z], color: None }
    }

    /// A vertex carrying an already encoded color.
    pub fn with_color(x: f32, y: f32, z: f32, rgb: [u8; 3]) -> Self {
        Vertex { position: [x, y, z], color: Some(rgb) }
    }
}

/// Size of one binary record, depending on whether colors are written.
pub fn record_size(keep_color: bool) -> usize {
    if keep_color { COLOR_RECORD_SIZE } else { POSITION_RECORD_SIZE }
}
