//! Writes the cleaned vertex data as an ASCII or little endian binary PLY file.

use std::io::Write;

use byteorder::{ LittleEndian, WriteBytesExt };

use crate::errors::{ ConvertError, ConvertResult };
use crate::ply::{ record_size, Encoding, Version, Vertex, OUTPUT_COLOR_NAMES, POSITION_ATTRIBUTES };

type Result<T> = ConvertResult<T>;

/// Serializes vertices in one fixed output layout.
///
/// The layout is always `x`, `y`, `z` as `float`, followed by `red`, `green`, `blue`
/// as `uchar` when colors are kept.
///
/// # Examples
///
/// ```rust
/// # use ply_clean::ply::{ Encoding, Vertex };
/// # use ply_clean::writer::Writer;
/// let w = Writer::new(Encoding::Ascii, false);
/// let mut buf = Vec::<u8>::new();
/// w.write_ply(&mut buf, &[Vertex::new(1.0, 2.5, -3.0)]).unwrap();
/// let txt = String::from_utf8(buf).unwrap();
/// assert!(txt.ends_with("end_header\n1.0 2.5 -3.0\n"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Writer {
    encoding: Encoding,
    keep_color: bool,
}

impl Writer {
    /// Creates a writer for the given payload encoding.
    pub fn new(encoding: Encoding, keep_color: bool) -> Self {
        Writer { encoding, keep_color }
    }

    /// Writes the header followed by all vertices.
    ///
    /// Returns the number of bytes written.
    pub fn write_ply<T: Write>(&self, out: &mut T, vertices: &[Vertex]) -> Result<usize> {
        let mut written = self.write_header(out, vertices.len())?;
        for v in vertices {
            written += self.write_vertex(out, v)?;
        }
        Ok(written)
    }

    /// Writes the header, declaring `vertex_count` vertices.
    pub fn write_header<T: Write>(&self, out: &mut T, vertex_count: usize) -> Result<usize> {
        let txt = self.header_text(vertex_count);
        out.write_all(txt.as_bytes())?;
        Ok(txt.len())
    }

    /// Writes a single vertex record.
    ///
    /// Fails if a color is expected but the vertex has none.
    pub fn write_vertex<T: Write>(&self, out: &mut T, vertex: &Vertex) -> Result<usize> {
        let color = match (self.keep_color, vertex.color) {
            (true, None) => return Err(ConvertError::Inconsistent(
                format!("vertex {:?} has no color, but the output declares one", vertex.position)
            )),
            (true, Some(rgb)) => Some(rgb),
            (false, _) => None,
        };
        match self.encoding {
            Encoding::Ascii => self.__write_ascii_vertex(out, vertex.position, color),
            Encoding::BinaryLittleEndian => self.__write_binary_vertex(out, vertex.position, color),
        }
    }

    fn header_text(&self, vertex_count: usize) -> String {
        let mut lines = vec![
            "ply".to_string(),
            format!("format {} {}", self.encoding, Version::default()),
            format!("element vertex {}", vertex_count),
        ];
        for name in POSITION_ATTRIBUTES {
            lines.push(format!("property float {}", name));
        }
        if self.keep_color {
            for name in OUTPUT_COLOR_NAMES {
                lines.push(format!("property uchar {}", name));
            }
        }
        lines.push("end_header\n".to_string());
        lines.join("\n")
    }

    fn __write_ascii_vertex<T: Write>(&self, out: &mut T, [x, y, z]: [f32; 3], color: Option<[u8; 3]>) -> Result<usize> {
        let line = match color {
            Some([r, g, b]) => format!("{:?} {:?} {:?} {} {} {}\n", x, y, z, r, g, b),
            None => format!("{:?} {:?} {:?}\n", x, y, z),
        };
        out.write_all(line.as_bytes())?;
        Ok(line.len())
    }

    fn __write_binary_vertex<T: Write>(&self, out: &mut T, position: [f32; 3], color: Option<[u8; 3]>) -> Result<usize> {
        for v in position {
            out.write_f32::<LittleEndian>(v)?;
        }
        if let Some(rgb) = color {
            for c in rgb {
                out.write_u8(c)?;
            }
        }
        Ok(record_size(color.is_some()))
    }
}
