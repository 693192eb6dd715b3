#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use platerate::interval::IntervalEditor;
use platerate::io::read_archive;

fuzz_target!(|data: &[u8]| {
    // Corrupt archives must be rejected with an error
    let _ = read_archive(Cursor::new(data), &IntervalEditor::default());
});
