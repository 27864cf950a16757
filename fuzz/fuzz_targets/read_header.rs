#![no_main]

use libfuzzer_sys::fuzz_target;
use ply_clean::parser::{ split_lines, Parser };

fuzz_target!(|data: &str| {
    let lines = split_lines(data);
    let _ = Parser::new().read_header(&lines);
});
