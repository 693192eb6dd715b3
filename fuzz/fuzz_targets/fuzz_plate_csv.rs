#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use platerate::interval::IntervalEditor;
use platerate::io::{read_layout, read_plate_data, PlateImporter};

fuzz_target!(|data: &[u8]| {
    // Parsing must either succeed or return an error, never panic
    let _ = read_layout(Cursor::new(data));

    if let Ok(raw) = read_plate_data(Cursor::new(data)) {
        // Anything that parses must also survive fitting every well
        let importer = PlateImporter::new(IntervalEditor::default());
        if let Ok(plate) = importer.build("fuzz", "fuzz.csv", raw, None) {
            let _ = platerate::plate::heatmap(&plate);
            let _ = platerate::plate::reference_stats(&plate);
        }
    }
});
