//! Decoding of the label samples in `testing/fixtures/scans.yaml`

use gs1_core::FNC1;
use gs1_decode::decode;
use gs1_registry::AiRegistry;
use serde::Deserialize;
use std::path::Path;

/// Path to the fixtures relative to the workspace root
const FIXTURES_PATH: &str = "testing/fixtures/scans.yaml";

#[derive(Debug, Deserialize)]
struct FixtureFile {
    samples: Vec<Sample>,
}

#[derive(Debug, Deserialize)]
struct Sample {
    name: String,
    raw: String,
    #[serde(default)]
    symbology: Option<String>,
    fields: Vec<(String, String)>,
    warnings: usize,
}

fn load_samples() -> Vec<Sample> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    let content = std::fs::read_to_string(workspace_root.join(FIXTURES_PATH)).unwrap();
    serde_yaml::from_str::<FixtureFile>(&content).unwrap().samples
}

fn expand(raw: &str) -> String {
    raw.replace("{GS}", &FNC1.to_string()).replace("{RS}", "\u{1e}")
}

#[test]
fn test_fixture_samples_decode() {
    let registry = AiRegistry::builtin();
    let samples = load_samples();
    assert!(!samples.is_empty());

    for sample in samples {
        let decoded = decode(&expand(&sample.raw), &registry);

        let got: Vec<(String, String)> = decoded
            .fields
            .iter()
            .map(|(c, v)| (c.to_string(), v.to_string()))
            .collect();
        assert_eq!(got, sample.fields, "fields of '{}'", sample.name);
        assert_eq!(
            decoded.warnings.len(),
            sample.warnings,
            "warnings of '{}': {:?}",
            sample.name,
            decoded.warnings
        );
        assert_eq!(decoded.symbology, sample.symbology, "symbology of '{}'", sample.name);
    }
}
