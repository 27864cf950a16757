//! Header-level types of the PLY files read and written by this crate.
//!
//! Only the `vertex` element of the input is interpreted. [`VertexHeader`] keeps
//! what the converter needs from the input header, [`Encoding`] and [`Version`]
//! describe the `format` line of the output.

use std::fmt::{ Display, Formatter };
use std::fmt;

/// What the converter retains from an input header.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct VertexHeader {
    /// Count declared by the `element vertex <N>` line, 0 if absent.
    pub vertex_count: usize,
    /// Names of all `property` lines, in declaration order.
    ///
    /// The name is the last token of the line, type tokens in front of it are ignored.
    pub attribute_names: Vec<String>,
    /// 0-based index of the first line after `end_header`.
    pub body_start: usize,
}

impl VertexHeader {
    /// Creates an empty header with no attributes and a vertex count of 0.
    pub fn new() -> Self {
        VertexHeader::default()
    }
}

/// Models a version number.
///
/// The only existing version for a PLY file is "1.0", which is what the writer emits.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Version {
    /// Major version number.
    pub major: u16,
    /// Minor version number.
    pub minor: u8,
}

impl Default for Version {
    fn default() -> Self {
        Version { major: 1, minor: 0 }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Encodings supported for the output payload.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Encoding {
    /// Numbers in their text representation, one vertex per line.
    Ascii,
    /// Packed little endian records with no padding.
    #[default]
    BinaryLittleEndian,
}

impl Encoding {
    /// Human-readable label used in status messages.
    pub fn label(&self) -> &'static str {
        match *self {
            Encoding::Ascii => "ASCII",
            Encoding::BinaryLittleEndian => "binary",
        }
    }
}

impl Display for Encoding {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        f.write_str(
            match *self {
                Encoding::Ascii => "ascii",
                Encoding::BinaryLittleEndian => "binary_little_endian",
            }
        )
    }
}
