//! Reads the ASCII PLY input: header scan and per-line vertex decoding.

use std::fmt::Debug;
use std::result;

use crate::color::encode_rgb;
use crate::errors::{ConvertError, ConvertResult};
use crate::ply::{ AttributeIndex, Vertex, VertexHeader, COLOR_ATTRIBUTES, POSITION_ATTRIBUTES };
use crate::util::LocationTracker;

type Result<T> = ConvertResult<T>;

mod ply_grammar;

use self::ply_grammar::grammar;
pub use self::ply_grammar::Line;

fn parse_ascii_rethrow<T, E: Debug>(location: &LocationTracker, line_str: &str, e: E, message: &str) -> Result<T> {
    Err(ConvertError::Format(
        format!("Line {}: {}\n\tString: '{}'\n\tError: {:?}", location.line_index, message, line_str, e)
    ))
}

/// Splits text into lines, treating `\n`, `\r\n` and a lone `\r` as line ends.
///
/// A trailing line end does not produce an empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(i) = rest.find(|c: char| c == '\r' || c == '\n') {
        lines.push(&rest[..i]);
        let skip = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[i + skip..];
    }
    if !rest.is_empty() {
        lines.push(rest);
    }
    lines
}

/// Scans the header of an ASCII PLY file.
///
/// The parser only looks at `element vertex`, `property` and `end_header` lines,
/// everything else before `end_header` is skipped.
///
/// # Examples
///
/// ```rust
/// # use ply_clean::parser::{ split_lines, Parser };
/// let txt = "ply\nformat ascii 1.0\nelement vertex 1\nproperty float x\nend_header\n0.5\n";
/// let lines = split_lines(txt);
/// let header = Parser::new().read_header(&lines).unwrap();
/// assert_eq!(header.vertex_count, 1);
/// assert_eq!(header.attribute_names, vec!["x"]);
/// assert_eq!(lines[header.body_start], "0.5");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    /// Creates a new `Parser`.
    pub fn new() -> Self {
        Parser
    }

    /// Reads header lines until and including `end_header`.
    ///
    /// Fails with a format error if the terminator is never found or the vertex count
    /// is not a non-negative integer.
    pub fn read_header<S: AsRef<str>>(&self, lines: &[S]) -> Result<VertexHeader> {
        let mut location = LocationTracker::new();
        let mut header = VertexHeader::new();
        for (i, line_str) in lines.iter().enumerate() {
            let line_str = line_str.as_ref();
            location.next_line();
            match self.read_header_line(line_str)? {
                Line::ElementVertex(count) => {
                    header.vertex_count = match count.parse::<usize>() {
                        Ok(n) => n,
                        Err(e) => return parse_ascii_rethrow(&location, line_str, e, "Invalid vertex count."),
                    };
                }
                Line::Property(name) => header.attribute_names.push(name.to_string()),
                Line::EndHeader => {
                    header.body_start = i + 1;
                    return Ok(header);
                }
                Line::Other => (),
            }
        }
        Err(ConvertError::Format("missing 'end_header'".to_string()))
    }

    /// Classifies a single header line.
    pub fn read_header_line<'a>(&self, line: &'a str) -> Result<Line<'a>> {
        match self.__read_header_line(line) {
            Ok(l) => Ok(l),
            Err(e) => Err(ConvertError::Format(
                format!("Couldn't parse line.\n\tString: {}\n\tError: {:?}", line, e)
            )),
        }
    }

    // private
    fn __read_header_line<'a>(&self, line_str: &'a str) -> result::Result<Line<'a>, peg::error::ParseError<peg::str::LineCol>> {
        grammar::line(line_str)
    }
}

/// Resolved input columns of the fields a conversion reads from each vertex line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    position: [usize; 3],
    color: Option<[usize; 3]>,
}

impl VertexLayout {
    /// Looks up the required columns.
    ///
    /// Requires `x`, `y`, `z`, and with `keep_color` also `col_r`, `col_g`, `col_b`,
    /// failing on the first one missing in that order.
    pub fn resolve(index: &AttributeIndex, keep_color: bool) -> Result<Self> {
        let position = index.columns_of(&POSITION_ATTRIBUTES)?;
        let color = if keep_color {
            Some(index.columns_of(&COLOR_ATTRIBUTES)?)
        } else {
            None
        };
        Ok(VertexLayout { position, color })
    }

    /// Decodes one data line.
    ///
    /// `location` must point at the line, it is only used for the error.
    pub fn read_vertex_line(&self, line: &str, location: &LocationTracker) -> Result<Vertex> {
        self.__read_vertex_line(line).map_err(|message| ConvertError::LineParse {
            line: location.line_index,
            content: line.trim().to_string(),
            message,
        })
    }

    fn __read_vertex_line(&self, line: &str) -> result::Result<Vertex, String> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let mut position = [0f32; 3];
        for ((slot, &column), name) in position.iter_mut().zip(&self.position).zip(POSITION_ATTRIBUTES) {
            *slot = parse_float(field(&fields, column, name)?, name)?;
        }
        let color = match self.color {
            Some(columns) => {
                let mut linear = [0f64; 3];
                for ((slot, &column), name) in linear.iter_mut().zip(&columns).zip(COLOR_ATTRIBUTES) {
                    *slot = parse_double(field(&fields, column, name)?, name)?;
                }
                Some(encode_rgb(linear))
            }
            None => None,
        };
        Ok(Vertex { position, color })
    }
}

fn field<'a>(fields: &[&'a str], column: usize, name: &str) -> result::Result<&'a str, String> {
    fields.get(column).copied().ok_or_else(|| {
        format!("no value for '{}' in column {}, line has {} fields", name, column, fields.len())
    })
}

fn parse_double(s: &str, name: &str) -> result::Result<f64, String> {
    s.parse::<f64>()
        .map_err(|e| format!("could not convert '{}' to float for '{}': {}", s, name, e))
}

fn parse_float(s: &str, name: &str) -> result::Result<f32, String> {
    let v = parse_double(s, name)?;
    let narrowed = v as f32;
    if v.is_finite() && narrowed.is_infinite() {
        return Err(format!("value '{}' for '{}' is out of range for a 32-bit float", s, name));
    }
    Ok(narrowed)
}
