use magic_output_core::{Category, LineStream};
use std::fs;
use std::path::Path;

fn label(category: Option<Category>) -> &'static str {
    category.map_or("-", Category::name)
}

#[test]
fn run_golden_tests() {
    let fixtures_dir = Path::new("tests/fixtures");
    if !fixtures_dir.exists() {
        // Skip if no fixtures
        return;
    }

    for entry in fs::read_dir(fixtures_dir).unwrap() {
        let path = entry.unwrap().path();

        if path.extension().is_some_and(|ext| ext == "log") {
            let output = fs::read_to_string(&path).expect("Failed to read fixture");
            let events = LineStream::default().classify_text(&output);

            let mut labels = String::new();
            for event in &events {
                labels.push_str(label(event.category));
                labels.push('\n');
            }

            let golden_path = path.with_extension("expected");

            if std::env::var("UPDATE_GOLDEN").is_ok() {
                fs::write(&golden_path, &labels).expect("Failed to update golden file");
            } else {
                let expected = fs::read_to_string(&golden_path)
                    .expect("Failed to read golden file (run with UPDATE_GOLDEN=1 to create)");
                assert_eq!(
                    labels,
                    expected.replace("\r\n", "\n"),
                    "Golden test failed for {:?}",
                    path
                );
            }
        }
    }
}
