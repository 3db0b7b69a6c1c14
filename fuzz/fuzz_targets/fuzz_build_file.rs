#![no_main]

use std::path::Path;

use gardener::domain::ports::BuildFormat;
use gardener::infrastructure::StarlarkFormat;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let format = StarlarkFormat::new();
        // Parsing must never panic; whatever parses must print to a fixed point
        if let Ok(file) = format.parse(Path::new("BUILD"), content) {
            let once = format.format(&file);
            let reparsed = format
                .parse(Path::new("BUILD"), &once)
                .expect("printed output must parse");
            assert_eq!(format.format(&reparsed), once);
        }
    }
});
