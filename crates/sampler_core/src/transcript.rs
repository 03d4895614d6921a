//! Human-readable derivation transcript.
//!
//! Lets an auditor re-derive the first few positions by hand with any
//! SHA-256 tool: each entry shows the hash input, the digest in base 16 and
//! base 10, and the reduction to a position. The text has no parseable
//! contract beyond containing those literal values.

use crate::hash_chain::HashChain;
use crate::sequence::{file_order, HashChainSampler, SequenceProducer};
use crate::types::SelectionError;

/// Renders the transcript for `seed` over a population of `population`.
///
/// Shows full derivations for the first `demo_count` draws, then the first
/// `sample_size` positions in selection order and in file order.
///
/// # Errors
///
/// `InvalidInput` for an empty seed or a zero population.
///
/// # Examples
///
/// ```rust
/// use sampler_core::transcript::render_transcript;
///
/// let text = render_transcript("01234567890123456789", 100, 4, 1).unwrap();
/// assert!(text.contains("sha256('01234567890123456789,1')"));
/// assert!(text.contains("530870f024011deba22c614b0cc90544a0709db410b5fdb8a72af1bda90f36e2"));
/// assert!(text.contains("[35, 9, 33, 96]"));
/// ```
pub fn render_transcript(
    seed: &str,
    population: u64,
    sample_size: usize,
    demo_count: u64,
) -> Result<String, SelectionError> {
    let chain = HashChain::new(seed)?;
    let mut out = String::new();

    out.push_str(&format!(
        "Each draw hashes the seed {:?} joined by ',' to the draw number.\n\
         Derivations for the first {demo_count} draws:\n\n",
        chain.seed()
    ));

    for index in 1..=demo_count {
        let d = chain.derive(index, population)?;
        out.push_str(&format!(
            "sha256('{}')\n = {} base 16\n = {} base 10\n 1 + ({} mod {}) = {}, so draw {} selects position {}.\n\n",
            d.hash_input,
            d.digest_hex(),
            d.digest_decimal(),
            d.digest_decimal(),
            population,
            d.position,
            index,
            d.position,
        ));
    }

    let (_, selection_order) =
        HashChainSampler.generate(sample_size, true, 1, population, chain.seed(), 0)?;
    out.push_str(&format!("N={population}, n={sample_size}\n"));
    out.push_str(&format!(
        "Positions in selection order: {selection_order:?}\n"
    ));
    out.push_str(&format!(
        "Positions in file order: {:?}\n",
        file_order(&selection_order)
    ));
    out.push_str("Resolve positions against the manifest to obtain ballot identifiers.\n");
    Ok(out)
}
