//! Validates the sample data shipped under `demo/data`.

use std::path::{Path, PathBuf};

use adapter_manifest::ManifestLoader;
use sampler_core::select_ballots_to_audit;

/// Get the demo data directory path
fn demo_data_dir() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    Path::new(&manifest_dir).join("../../demo/data")
}

#[test]
fn test_sample_manifest_reproduces_fixture() {
    let path = demo_data_dir().join("manifest.csv");
    assert!(path.exists(), "manifest.csv should exist at {:?}", path);

    let manifest = ManifestLoader::from_path(&path).unwrap();
    assert_eq!(manifest.population().unwrap(), 100);

    let ids = select_ballots_to_audit(
        "01234567890123456789",
        manifest.batches().iter().cloned(),
        4,
    )
    .unwrap();
    assert_eq!(
        ids,
        vec!["Adams-1-1-35", "Adams-1-1-9", "Adams-1-1-33", "Boulder-1-1-6"]
    );
}

#[test]
fn test_sample_manifest_has_locations() {
    let manifest = ManifestLoader::from_path(demo_data_dir().join("manifest.csv")).unwrap();
    assert!(manifest.batches().iter().all(|b| !b.location.is_empty()));
}
