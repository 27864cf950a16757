use ply_clean::*;
use ply_clean::color::encode_channel;
use ply_clean::ply::Encoding;
use byteorder::{ LittleEndian, ReadBytesExt };
use std::io::{ Cursor, Read };

const COLOR_CLOUD: &str = "ply\n\
format ascii 1.0\n\
comment exported with linear colors\n\
element vertex 4\n\
property float x\n\
property float y\n\
property float z\n\
property float nx\n\
property float col_r\n\
property float col_g\n\
property float col_b\n\
end_header\n\
0.0 0.0 0.0 1 0.0 0.0 0.0\n\
1.5 -2.25 3.125 1 1.0 0.5 0.0031308\n\
-0.1 0.2 0.3 1 0.2 0.1 0.25\n\
1e3 2e-3 -7 1 0.75 0.01 1.0\n";

/// Splits a converted file into header text and payload bytes.
fn split_output(bytes: &[u8]) -> (String, &[u8]) {
    let marker = b"end_header\n";
    let pos = bytes
        .windows(marker.len())
        .position(|w| w == marker)
        .expect("output has no end_header");
    let end = pos + marker.len();
    (String::from_utf8(bytes[..end].to_vec()).unwrap(), &bytes[end..])
}

fn read_color_records(payload: &[u8]) -> Vec<([f32; 3], [u8; 3])> {
    assert_eq!(payload.len() % 15, 0);
    let mut cursor = Cursor::new(payload);
    let mut out = Vec::new();
    while (cursor.position() as usize) < payload.len() {
        let x = cursor.read_f32::<LittleEndian>().unwrap();
        let y = cursor.read_f32::<LittleEndian>().unwrap();
        let z = cursor.read_f32::<LittleEndian>().unwrap();
        let mut rgb = [0u8; 3];
        cursor.read_exact(&mut rgb).unwrap();
        out.push(([x, y, z], rgb));
    }
    out
}

fn read_position_records(payload: &[u8]) -> Vec<[f32; 3]> {
    assert_eq!(payload.len() % 12, 0);
    payload
        .chunks_exact(12)
        .map(|mut c| {
            let x = c.read_f32::<LittleEndian>().unwrap();
            let y = c.read_f32::<LittleEndian>().unwrap();
            let z = c.read_f32::<LittleEndian>().unwrap();
            [x, y, z]
        })
        .collect()
}

#[test]
fn binary_color_round_trip() {
    let (bytes, report) = convert_str(COLOR_CLOUD, ConvertOptions::with_color(Encoding::BinaryLittleEndian)).unwrap();
    assert_eq!(report.declared, 4);
    assert_eq!(report.written, 4);
    assert_eq!(report.skipped_count(), 0);

    let (header, payload) = split_output(&bytes);
    assert!(header.starts_with("ply\nformat binary_little_endian 1.0\nelement vertex 4\n"));
    assert!(header.ends_with("property uchar red\nproperty uchar green\nproperty uchar blue\nend_header\n"));

    let records = read_color_records(payload);
    assert_eq!(records.len(), 4);
    assert_eq!(records[0], ([0.0, 0.0, 0.0], [0, 0, 0]));
    assert_eq!(records[1].0, [1.5, -2.25, 3.125]);
    assert_eq!(records[1].1, [255, 188, encode_channel(0.0031308)]);
    assert_eq!(records[2].0, [-0.1f64 as f32, 0.2f64 as f32, 0.3f64 as f32]);
    assert_eq!(records[2].1, [encode_channel(0.2), encode_channel(0.1), encode_channel(0.25)]);
    assert_eq!(records[3].0, [1000.0, 2e-3f64 as f32, -7.0]);
    assert_eq!(records[3].1[2], 255);
}

#[test]
fn binary_positions_only() {
    let (bytes, report) = convert_str(COLOR_CLOUD, ConvertOptions::positions_only(Encoding::BinaryLittleEndian)).unwrap();
    assert_eq!(report.written, 4);
    let (header, payload) = split_output(&bytes);
    assert!(!header.contains("red"));
    assert_eq!(payload.len(), 4 * 12);
    let positions = read_position_records(payload);
    assert_eq!(positions[1], [1.5, -2.25, 3.125]);
    assert_eq!(positions[3], [1000.0, 2e-3f64 as f32, -7.0]);
}

#[test]
fn ascii_positions_exact_text() {
    let txt = "ply\n\
format ascii 1.0\n\
element vertex 3\n\
property float x\n\
property float y\n\
property float z\n\
end_header\n\
1.0 2.5 -3.0\n\
0.125   4\t7\n\
1e20 0.1 5\n";
    let (bytes, _) = convert_str(txt, ConvertOptions::positions_only(Encoding::Ascii)).unwrap();
    let expected = "ply\n\
format ascii 1.0\n\
element vertex 3\n\
property float x\n\
property float y\n\
property float z\n\
end_header\n\
1.0 2.5 -3.0\n\
0.125 4.0 7.0\n\
1e20 0.1 5.0\n";
    assert_eq!(String::from_utf8(bytes).unwrap(), expected);
}

#[test]
fn ascii_with_color() {
    let (bytes, _) = convert_str(COLOR_CLOUD, ConvertOptions::with_color(Encoding::Ascii)).unwrap();
    let txt = String::from_utf8(bytes).unwrap();
    let body: Vec<&str> = txt.split("end_header\n").nth(1).unwrap().lines().collect();
    assert_eq!(body.len(), 4);
    assert_eq!(body[0], "0.0 0.0 0.0 0 0 0");
    assert_eq!(body[1], format!("1.5 -2.25 3.125 255 188 {}", encode_channel(0.0031308)));
    assert_eq!(body[3], "1000.0 0.002 -7.0 225 25 255");
}

#[test]
fn invalid_lines_are_skipped() {
    let txt = "ply\n\
format ascii 1.0\n\
element vertex 5\n\
property float x\n\
property float y\n\
property float z\n\
end_header\n\
1 1 1\n\
2 two 2\n\
3 3\n\
\n\
5 5 5\n";
    let (bytes, report) = convert_str(txt, ConvertOptions::positions_only(Encoding::BinaryLittleEndian)).unwrap();
    assert_eq!(report.declared, 5);
    assert_eq!(report.written, 2);
    assert_eq!(report.skipped_count(), 3);
    let lines: Vec<usize> = report
        .skipped
        .iter()
        .map(|e| match e {
            ConvertError::LineParse { line, .. } => *line,
            e => panic!("unexpected error: {}", e),
        })
        .collect();
    assert_eq!(lines, vec![9, 10, 11]);

    let (header, payload) = split_output(&bytes);
    assert!(header.contains("element vertex 2\n"));
    assert_eq!(read_position_records(payload), vec![[1.0, 1.0, 1.0], [5.0, 5.0, 5.0]]);
}

#[test]
fn short_body_is_tolerated() {
    let txt = "ply\nelement vertex 10\nproperty float x\nproperty float y\nproperty float z\nend_header\n1 2 3\n";
    let (_, report) = convert_str(txt, ConvertOptions::default()).unwrap();
    assert_eq!(report.written, 1);
    assert_eq!(report.missing_count(), 9);
}

#[test]
fn bare_carriage_return_in_header_comment() {
    let txt = "ply\n\
format ascii 1.0\n\
comment exported\rby tool\n\
element vertex 1\n\
property float x\n\
property float y\n\
property float z\n\
end_header\r\n\
1 2 3\r\n";
    let (bytes, report) = convert_str(txt, ConvertOptions::positions_only(Encoding::BinaryLittleEndian)).unwrap();
    assert_eq!(report.written, 1);
    assert_eq!(report.skipped_count(), 0);
    let (_, payload) = split_output(&bytes);
    assert_eq!(read_position_records(payload), vec![[1.0, 2.0, 3.0]]);
}

#[test]
fn indented_property_is_not_declared() {
    let txt = "ply\nelement vertex 1\nproperty float x\nproperty float y\n  property float z\nend_header\n1 2 3\n";
    let err = convert_str(txt, ConvertOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "Invalid PLY file: missing required attribute: z");
}

#[test]
fn missing_end_header_is_format_error() {
    let txt = "ply\nformat ascii 1.0\nelement vertex 1\nproperty float x\nproperty float y\nproperty float z\n1 2 3\n";
    let err = convert_str(txt, ConvertOptions::default()).unwrap_err();
    assert!(err.is_format());
    assert_eq!(err.to_string(), "Invalid PLY file: missing 'end_header'");
}

#[test]
fn missing_attribute_is_format_error() {
    let txt = "ply\nelement vertex 1\nproperty float x\nproperty float y\nend_header\n1 2\n";
    let err = convert_str(txt, ConvertOptions::positions_only(Encoding::Ascii)).unwrap_err();
    assert!(err.is_format());
    assert_eq!(err.to_string(), "Invalid PLY file: missing required attribute: z");
}

#[test]
fn convert_file_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cloud.ply");
    let output = dir.path().join("cloud_clean.ply");
    std::fs::write(&input, COLOR_CLOUD).unwrap();

    let report = convert_file(&input, &output, ConvertOptions::with_color(Encoding::BinaryLittleEndian)).unwrap();
    assert_eq!(report.written, 4);

    let bytes = std::fs::read(&output).unwrap();
    let (_, payload) = split_output(&bytes);
    assert_eq!(read_color_records(payload).len(), 4);
    // only the input and the output, no staging file left behind
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn convert_file_failure_keeps_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.ply");
    let output = dir.path().join("out.ply");
    std::fs::write(&input, "ply\nelement vertex 1\nproperty float x\n").unwrap();
    std::fs::write(&output, b"previous").unwrap();

    let err = convert_file(&input, &output, ConvertOptions::default()).unwrap_err();
    assert!(err.is_format());
    assert_eq!(std::fs::read(&output).unwrap(), b"previous");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn convert_file_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.ply");
    let err = convert_file(dir.path().join("nope.ply"), &output, ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::Io(_)));
    assert!(!output.exists());
}
