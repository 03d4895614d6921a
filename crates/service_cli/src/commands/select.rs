//! Select command implementation
//!
//! Loads the manifest, draws the sample and prints the ballots to pull.

use std::io::Write;

use adapter_manifest::ManifestLoader;
use sampler_core::sink::TracingSink;
use sampler_core::BallotSelector;
use tracing::info;

use crate::config::SamplerConfig;
use crate::output;
use crate::Result;

/// Run the select command
pub fn run(config: &SamplerConfig) -> Result<()> {
    let rendered = render_selection(config)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Perform the selection and render it without writing anything
pub fn render_selection(config: &SamplerConfig) -> Result<String> {
    let seed = config.require_seed()?;
    let sample_size = config.require_sample_size()?;
    let manifest_path = config.require_manifest()?;

    info!("Loading manifest from {}", manifest_path.display());
    let manifest = ManifestLoader::from_path(manifest_path)?;

    let mut selector = BallotSelector::new()
        .with_replacement(config.with_replacement)
        .skip(config.skip)
        .resolver(config.resolver);
    if let Some(population) = config.population {
        selector = selector.declared_population(population);
    }

    let selection = selector.select(seed, &manifest, sample_size, &mut TracingSink)?;
    if selection.distinct_positions() < selection.len() {
        info!(
            "{} draws hit an already selected ballot",
            selection.len() - selection.distinct_positions()
        );
    }

    output::render(&selection, config.order, config.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, OutputFormat, SortOrder};
    use crate::CliError;
    use adapter_manifest::ManifestError;
    use sampler_core::{Resolver, SelectionError};
    use tempfile::NamedTempFile;

    fn manifest_file(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "county_name,scanner_id,batch_id,num_ballots,storage_location\n{body}"
        )
        .unwrap();
        file
    }

    fn config(file: &NamedTempFile) -> SamplerConfig {
        SamplerConfig {
            seed: Some("01234567890123456789".to_string()),
            sample_size: Some(4),
            manifest: Some(file.path().to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_fixture_selection() {
        let file = manifest_file("Adams,1,1,90,\nBoulder,1,1,10,\n");
        let text = render_selection(&config(&file)).unwrap();
        assert_eq!(
            text,
            "Adams-1-1-35\nAdams-1-1-9\nAdams-1-1-33\nBoulder-1-1-6\n"
        );
    }

    #[test]
    fn test_linear_resolver_and_location_order() {
        let file = manifest_file("Adams,1,1,90,\nBoulder,1,1,10,\n");
        let cfg = SamplerConfig {
            resolver: Resolver::Linear,
            order: SortOrder::Location,
            format: OutputFormat::Text,
            ..config(&file)
        };
        let text = render_selection(&cfg).unwrap();
        assert!(text.starts_with("Adams-1-1-9\n"));
    }

    #[test]
    fn test_declared_population_mismatch() {
        let file = manifest_file("Adams,1,1,90,\nBoulder,1,1,10,\n");
        let cfg = SamplerConfig {
            population: Some(101),
            ..config(&file)
        };
        let err = render_selection(&cfg).unwrap_err();
        assert!(matches!(
            err,
            CliError::Selection(SelectionError::PopulationMismatch {
                declared: 101,
                manifest: 100
            })
        ));
    }

    #[test]
    fn test_bad_manifest_row() {
        let file = manifest_file("Adams,1,1,ninety,\n");
        let err = render_selection(&config(&file)).unwrap_err();
        assert!(matches!(
            err,
            CliError::Manifest(ManifestError::InvalidRow { line: 2, .. })
        ));
    }

    #[test]
    fn test_missing_seed() {
        let file = manifest_file("Adams,1,1,90,\n");
        let cfg = SamplerConfig {
            seed: None,
            ..config(&file)
        };
        assert!(matches!(
            render_selection(&cfg),
            Err(CliError::Config(ConfigError::Missing(_)))
        ));
    }

    #[test]
    fn test_without_replacement_too_large() {
        let file = manifest_file("Adams,1,1,3,\n");
        let cfg = SamplerConfig {
            with_replacement: false,
            ..config(&file)
        };
        assert!(matches!(
            render_selection(&cfg),
            Err(CliError::Selection(SelectionError::InvalidInput(_)))
        ));
    }
}
