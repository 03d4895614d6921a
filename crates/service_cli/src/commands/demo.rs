//! Demo command implementation
//!
//! Prints the step-by-step derivation of the first draws so anyone can
//! re-check them with a stock SHA-256 tool.

use adapter_manifest::ManifestLoader;
use sampler_core::SelectionError;
use tracing::info;

use crate::config::{ConfigError, SamplerConfig};
use crate::Result;

/// Run the demo command
pub fn run(config: &SamplerConfig, derivations: u64) -> Result<()> {
    print!("{}", transcript(config, derivations)?);
    Ok(())
}

/// Build the transcript text
///
/// The population comes from `--population`, or from the manifest when only
/// a manifest is given. When both are given they must agree.
pub fn transcript(config: &SamplerConfig, derivations: u64) -> Result<String> {
    let seed = config.require_seed()?;
    let sample_size = config.require_sample_size()?;

    let population = match (config.population, config.manifest.as_deref()) {
        (Some(declared), Some(path)) => {
            let total = ManifestLoader::from_path(path)?.population()?;
            if declared != total {
                return Err(SelectionError::PopulationMismatch {
                    declared,
                    manifest: total,
                }
                .into());
            }
            declared
        }
        (Some(declared), None) => declared,
        (None, Some(path)) => {
            info!("Taking population from {}", path.display());
            ManifestLoader::from_path(path)?.population()?
        }
        (None, None) => {
            return Err(ConfigError::Missing(
                "population (--population, RLA_POPULATION or a manifest)",
            )
            .into())
        }
    };

    Ok(sampler_core::transcript::render_transcript(
        seed,
        population,
        sample_size,
        derivations,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    fn config() -> SamplerConfig {
        SamplerConfig {
            seed: Some("01234567890123456789".to_string()),
            sample_size: Some(4),
            population: Some(100),
            ..Default::default()
        }
    }

    #[test]
    fn test_transcript_values() {
        let text = transcript(&config(), 1).unwrap();
        assert!(text.contains("sha256('01234567890123456789,1')"));
        assert!(text.contains(
            "37556880678699079925426374644111266755182988359753230726516503867550539396834"
        ));
        assert!(text.contains("Positions in selection order: [35, 9, 33, 96]"));
    }

    #[test]
    fn test_population_from_manifest() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "h\nAdams,1,1,90\nBoulder,1,1,10\n").unwrap();
        let cfg = SamplerConfig {
            population: None,
            manifest: Some(file.path().to_path_buf()),
            ..config()
        };
        assert!(transcript(&cfg, 0).unwrap().contains("N=100, n=4"));
    }

    #[test]
    fn test_declared_population_checked_against_manifest() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "h\nAdams,1,1,90\nBoulder,1,1,10\n").unwrap();
        let mismatched = SamplerConfig {
            population: Some(101),
            manifest: Some(file.path().to_path_buf()),
            ..config()
        };
        assert!(matches!(
            transcript(&mismatched, 1),
            Err(CliError::Selection(SelectionError::PopulationMismatch {
                declared: 101,
                manifest: 100
            }))
        ));

        let matching = SamplerConfig {
            population: Some(100),
            ..mismatched
        };
        assert!(transcript(&matching, 0).unwrap().contains("N=100, n=4"));
    }

    #[test]
    fn test_population_required() {
        let cfg = SamplerConfig {
            population: None,
            ..config()
        };
        assert!(matches!(transcript(&cfg, 1), Err(CliError::Config(_))));
    }
}
