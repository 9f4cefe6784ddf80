#![no_main]
use magic_output_core::{Classifier, LineStream};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Build output is not always valid UTF-8; lossy conversion keeps the bytes
    // that are.
    let s = String::from_utf8_lossy(data);
    let classifier = Classifier::default();
    for line in s.lines() {
        let category = classifier.classify(line);
        let detailed = classifier.classify_line(line);
        assert_eq!(category, detailed.map(|c| c.category));
        if let Some(c) = detailed {
            // Triggers must slice the line on char boundaries.
            let _ = &line[c.trigger.start..c.trigger.end];
        }
    }
    let _ = LineStream::new(classifier).classify_text(&s);
});
