//! Check-index command implementation
//!
//! Builds the cumulative index for a manifest and compares it with the
//! linear walk at every batch boundary.

use adapter_manifest::ManifestLoader;
use sampler_core::manifest::CumulativeIndex;
use tracing::info;

use crate::config::SamplerConfig;
use crate::Result;

/// Run the check-index command
pub fn run(config: &SamplerConfig) -> Result<()> {
    println!("{}", check(config)?);
    Ok(())
}

/// Verify the index and summarise the manifest
pub fn check(config: &SamplerConfig) -> Result<String> {
    let path = config.require_manifest()?;
    let manifest = ManifestLoader::from_path(path)?;

    let index = CumulativeIndex::build(&manifest)?;
    let probes = index.verify()?;
    info!(probes, "Cumulative index agrees with linear walk");

    let empty = manifest.batches().iter().filter(|b| b.cardcount == 0).count();
    Ok(format!(
        "{}: {} batches ({} empty), {} ballots; index verified at {} positions",
        path.display(),
        manifest.len(),
        empty,
        index.population(),
        probes
    ))
}
