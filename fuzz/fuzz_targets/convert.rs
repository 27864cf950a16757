#![no_main]

use libfuzzer_sys::fuzz_target;
use ply_clean::ply::Encoding;
use ply_clean::{ convert_str, ConvertOptions };

fuzz_target!(|data: (&str, bool, bool)| {
    let (text, keep_color, ascii) = data;
    let encoding = if ascii { Encoding::Ascii } else { Encoding::BinaryLittleEndian };
    let _ = convert_str(text, ConvertOptions { keep_color, encoding });
});
