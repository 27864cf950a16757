//! Cleans ASCII PLY point clouds for web renderers.
//!
//! The input header is scanned for its vertex count and property names, the
//! `x`, `y`, `z` columns (and optionally the linear `col_r`, `col_g`, `col_b`
//! channels) of every vertex line are extracted, colors are gamma encoded to
//! 8-bit sRGB, and a new PLY file is written as ASCII or packed little endian
//! binary.
//!
//! ```rust
//! use ply_clean::convert::{ convert_str, ConvertOptions };
//! use ply_clean::ply::Encoding;
//!
//! let txt = "ply\n\
//!            format ascii 1.0\n\
//!            element vertex 1\n\
//!            property float x\n\
//!            property float y\n\
//!            property float z\n\
//!            property float col_r\n\
//!            property float col_g\n\
//!            property float col_b\n\
//!            end_header\n\
//!            1.0 2.0 3.0 1.0 0.5 0.0\n";
//! let (bytes, report) = convert_str(txt, ConvertOptions::with_color(Encoding::BinaryLittleEndian)).unwrap();
//! assert_eq!(report.written, 1);
//! assert_eq!(&bytes[bytes.len() - 3..], &[255, 188, 0]);
//! ```

pub mod color;
pub mod convert;
pub mod errors;
pub mod parser;
pub mod ply;
pub mod util;
pub mod writer;

pub use crate::convert::{ convert_file, convert_str, ConversionReport, ConvertOptions, Converter };
pub use crate::errors::{ ConvertError, ConvertResult };
