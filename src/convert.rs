//! The single-pass converter tying header scan, vertex decoding and writing together.

use std::fs;
use std::io::{ BufWriter, Write };
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{ debug, info, warn };

use crate::errors::{ ConvertError, ConvertResult };
use crate::parser::{ split_lines, Parser, VertexLayout };
use crate::ply::{ AttributeIndex, Encoding, Vertex };
use crate::util::LocationTracker;
use crate::writer::Writer;

/// Selects what a conversion keeps and how it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertOptions {
    /// Keep `col_r`, `col_g`, `col_b`, gamma encoded to `red`, `green`, `blue`.
    pub keep_color: bool,
    /// Payload encoding of the output.
    pub encoding: Encoding,
}

impl ConvertOptions {
    /// Positions only, in the given encoding.
    pub fn positions_only(encoding: Encoding) -> Self {
        ConvertOptions { keep_color: false, encoding }
    }

    /// Positions and sRGB colors, in the given encoding.
    pub fn with_color(encoding: Encoding) -> Self {
        ConvertOptions { keep_color: true, encoding }
    }

    /// Short description of the output, e.g. "clean binary PLY".
    pub fn describe(&self) -> String {
        format!("clean {} PLY", self.encoding.label())
    }
}

/// Outcome of a successful conversion.
#[derive(Debug)]
pub struct ConversionReport {
    /// Vertex count declared by the input header.
    pub declared: usize,
    /// Records written to the output.
    pub written: usize,
    /// One [`ConvertError::LineParse`] per data line that was skipped.
    pub skipped: Vec<ConvertError>,
}

impl ConversionReport {
    /// Number of skipped data lines.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Declared vertices for which no data line existed.
    pub fn missing_count(&self) -> usize {
        self.declared.saturating_sub(self.written + self.skipped.len())
    }
}

/// Vertices decoded from an input file, before writing.
#[derive(Debug)]
pub struct Decoded {
    /// Successfully decoded vertices, in input order.
    pub vertices: Vec<Vertex>,
    /// Vertex count declared by the input header.
    pub declared: usize,
    /// Lines that could not be decoded.
    pub skipped: Vec<ConvertError>,
}

/// Converts ASCII PLY text according to a fixed set of [`ConvertOptions`].
///
/// # Examples
///
/// ```rust
/// # use ply_clean::convert::{ ConvertOptions, Converter };
/// # use ply_clean::ply::Encoding;
/// let txt = "ply\nformat ascii 1.0\nelement vertex 1\n\
///            property float x\nproperty float y\nproperty float z\nend_header\n1 2.5 -3\n";
/// let c = Converter::new(ConvertOptions::positions_only(Encoding::Ascii));
/// let mut out = Vec::<u8>::new();
/// let report = c.convert(txt, &mut out).unwrap();
/// assert_eq!(report.written, 1);
/// assert!(String::from_utf8(out).unwrap().ends_with("end_header\n1.0 2.5 -3.0\n"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    options: ConvertOptions,
    parser: Parser,
}

impl Converter {
    /// Creates a converter for the given options.
    pub fn new(options: ConvertOptions) -> Self {
        Converter { options, parser: Parser::new() }
    }

    /// Parses the header, checks required attributes and decodes every vertex line.
    ///
    /// At most the declared number of lines is read after `end_header`. Lines that fail
    /// to decode are logged and collected, they never abort the run.
    pub fn decode(&self, input: &str) -> ConvertResult<Decoded> {
        let lines = split_lines(input);
        let header = self.parser.read_header(&lines)?;
        debug!(
            vertex_count = header.vertex_count,
            attributes = ?header.attribute_names,
            "parsed header"
        );

        let index = AttributeIndex::from_names(&header.attribute_names);
        let layout = VertexLayout::resolve(&index, self.options.keep_color)?;

        let body = lines.get(header.body_start..).unwrap_or_default();
        let mut vertices = Vec::with_capacity(header.vertex_count.min(body.len()));
        let mut skipped = Vec::new();
        let mut location = LocationTracker::at_offset(header.body_start);
        for line in body.iter().take(header.vertex_count) {
            location.next_line();
            match layout.read_vertex_line(line, &location) {
                Ok(v) => vertices.push(v),
                Err(e) => {
                    warn!("{}", e);
                    skipped.push(e);
                }
            }
        }
        if body.len() < header.vertex_count {
            debug!(declared = header.vertex_count, available = body.len(), "fewer data lines than declared");
        }

        Ok(Decoded { vertices, declared: header.vertex_count, skipped })
    }

    /// Converts `input` and writes the complete output PLY to `out`.
    ///
    /// Nothing is written when the header is rejected.
    pub fn convert<W: Write>(&self, input: &str, out: &mut W) -> ConvertResult<ConversionReport> {
        let decoded = self.decode(input)?;
        self.write(decoded, out)
    }

    /// Converts the file at `input` into a new file at `output`.
    ///
    /// The output is staged in a temporary file next to `output` and only moved into
    /// place once fully written, so a failed run never leaves a partial file behind.
    #[tracing::instrument(skip_all, fields(input = %input.as_ref().display(), output = %output.as_ref().display()))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output: Q) -> ConvertResult<ConversionReport> {
        let output = output.as_ref();
        let text = fs::read_to_string(input.as_ref())?;
        let decoded = self.decode(&text)?;

        let dir = match output.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir)?;
        let report = {
            let mut out = BufWriter::new(staged.as_file_mut());
            let report = self.write(decoded, &mut out)?;
            out.flush()?;
            report
        };
        set_readable(&staged)?;
        staged.persist(output).map_err(|e| e.error)?;

        info!(
            written = report.written,
            skipped = report.skipped_count(),
            "Saved {} to: {}",
            self.options.describe(),
            output.display()
        );
        Ok(report)
    }

    fn write<W: Write>(&self, decoded: Decoded, out: &mut W) -> ConvertResult<ConversionReport> {
        let writer = Writer::new(self.options.encoding, self.options.keep_color);
        writer.write_ply(out, &decoded.vertices)?;
        Ok(ConversionReport {
            declared: decoded.declared,
            written: decoded.vertices.len(),
            skipped: decoded.skipped,
        })
    }
}

#[cfg(unix)]
fn set_readable(file: &NamedTempFile) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.as_file().set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_readable(_file: &NamedTempFile) -> std::io::Result<()> {
    Ok(())
}

/// Converts in-memory ASCII PLY text, returning the output bytes.
pub fn convert_str(input: &str, options: ConvertOptions) -> ConvertResult<(Vec<u8>, ConversionReport)> {
    let mut out = Vec::new();
    let report = Converter::new(options).convert(input, &mut out)?;
    Ok((out, report))
}

/// Converts the file at `input` into `output`, see [`Converter::convert_file`].
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q, options: ConvertOptions) -> ConvertResult<ConversionReport> {
    Converter::new(options).convert_file(input, output)
}
