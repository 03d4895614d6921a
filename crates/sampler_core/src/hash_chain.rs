//! Hash-chain position generator.
//!
//! The i-th position of a sample is derived from the public seed alone:
//!
//! ```text
//! H = SHA-256(utf8(seed + "," + decimal(i)))   read as a big-endian integer
//! position = 1 + (H mod N)
//! ```
//!
//! The full 256-bit digest is reduced; nothing is truncated before the
//! modulo. The small modulo bias is accepted and not corrected here.
//!
//! Any third party holding the seed can re-derive every position with an
//! independent SHA-256 implementation, which is what [`Derivation`] exposes.

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

use crate::types::SelectionError;

/// Separator between seed and draw index in the hash input.
pub const DELIMITER: char = ',';

/// The exact string hashed for draw `index`.
///
/// # Examples
///
/// ```rust
/// use sampler_core::hash_chain::hash_input;
///
/// assert_eq!(hash_input("01234567890123456789", 1), "01234567890123456789,1");
/// ```
pub fn hash_input(seed: &str, index: u64) -> String {
    format!("{seed}{DELIMITER}{index}")
}

/// SHA-256 digest of the hash input for draw `index`.
pub fn digest(seed: &str, index: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(hash_input(seed, index).as_bytes()));
    out
}

/// Reduces a digest into `[low, low + width - 1]`. `width` must be non-zero.
pub(crate) fn reduce(digest: &[u8; 32], low: u64, width: u64) -> u64 {
    let remainder = BigUint::from_bytes_be(digest) % BigUint::from(width);
    // Zero has no digits; anything else fits in one u64 because it is < width.
    low + remainder.iter_u64_digits().next().unwrap_or(0)
}

fn check_seed(seed: &str) -> Result<(), SelectionError> {
    if seed.is_empty() {
        return Err(SelectionError::invalid_input("seed must not be empty"));
    }
    Ok(())
}

fn check_draw(index: u64, population: u64) -> Result<(), SelectionError> {
    if population == 0 {
        return Err(SelectionError::invalid_input(
            "population size must be positive, got 0",
        ));
    }
    if index == 0 {
        return Err(SelectionError::invalid_input(
            "draw index is 1-based, got 0",
        ));
    }
    Ok(())
}

/// The `index`-th pseudorandom position in `[1, population]`.
///
/// # Errors
///
/// `InvalidInput` when `population` is 0, `index` is 0 or `seed` is empty.
///
/// # Examples
///
/// ```rust
/// use sampler_core::hash_chain::position;
///
/// let seed = "01234567890123456789";
/// assert_eq!(position(seed, 1, 100).unwrap(), 35);
/// assert_eq!(position(seed, 2, 100).unwrap(), 9);
/// ```
pub fn position(seed: &str, index: u64, population: u64) -> Result<u64, SelectionError> {
    check_seed(seed)?;
    check_draw(index, population)?;
    Ok(reduce(&digest(seed, index), 1, population))
}

/// Every intermediate value behind one position, for manual re-derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    /// 1-based draw index
    pub index: u64,
    /// String fed to SHA-256
    pub hash_input: String,
    /// Raw digest
    pub digest: [u8; 32],
    /// Population size N used for the reduction
    pub population: u64,
    /// Resulting position in `[1, N]`
    pub position: u64,
}

impl Derivation {
    /// Digest as lowercase hexadecimal.
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }

    /// Digest as a base-10 integer.
    pub fn digest_decimal(&self) -> String {
        BigUint::from_bytes_be(&self.digest).to_str_radix(10)
    }
}

/// Seeded generator of positions.
///
/// Holds the seed for the lifetime of an audit round; the seed is never
/// mutated and each call is independent of every other call.
///
/// # Examples
///
/// ```rust
/// use sampler_core::hash_chain::HashChain;
///
/// let chain = HashChain::new("01234567890123456789").unwrap();
/// let first: Vec<u64> = chain.positions(100).unwrap().take(4).collect();
/// assert_eq!(first, vec![35, 9, 33, 96]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashChain {
    seed: String,
}

impl HashChain {
    /// Creates a chain over a non-empty seed.
    pub fn new(seed: impl Into<String>) -> Result<Self, SelectionError> {
        let seed = seed.into();
        check_seed(&seed)?;
        Ok(Self { seed })
    }

    /// Returns the seed.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// See [`position`].
    pub fn position(&self, index: u64, population: u64) -> Result<u64, SelectionError> {
        check_draw(index, population)?;
        Ok(reduce(&digest(&self.seed, index), 1, population))
    }

    /// Position for `index` together with the values that produced it.
    pub fn derive(&self, index: u64, population: u64) -> Result<Derivation, SelectionError> {
        check_draw(index, population)?;
        let digest = digest(&self.seed, index);
        Ok(Derivation {
            index,
            hash_input: hash_input(&self.seed, index),
            digest,
            population,
            position: reduce(&digest, 1, population),
        })
    }

    /// Endless iterator over positions for draws 1, 2, 3, ...
    pub fn positions(
        &self,
        population: u64,
    ) -> Result<impl Iterator<Item = u64> + '_, SelectionError> {
        check_draw(1, population)?;
        Ok((1u64..).map(move |index| reduce(&digest(&self.seed, index), 1, population)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "01234567890123456789";

    #[test]
    fn test_reference_digest() {
        let chain = HashChain::new(SEED).unwrap();
        let derivation = chain.derive(1, 100).unwrap();

        assert_eq!(derivation.hash_input, "01234567890123456789,1");
        assert_eq!(
            derivation.digest_hex(),
            "530870f024011deba22c614b0cc90544a0709db410b5fdb8a72af1bda90f36e2"
        );
        assert_eq!(
            derivation.digest_decimal(),
            "37556880678699079925426374644111266755182988359753230726516503867550539396834"
        );
        assert_eq!(derivation.position, 35);
    }

    #[test]
    fn test_reference_positions() {
        let expected = [35, 9, 33, 96, 69, 39, 88, 13, 61, 54];
        for (i, &want) in expected.iter().enumerate() {
            assert_eq!(position(SEED, i as u64 + 1, 100).unwrap(), want);
        }
    }

    #[test]
    fn test_population_of_one() {
        for i in 1..=20 {
            assert_eq!(position(SEED, i, 1).unwrap(), 1);
        }
    }

    #[test]
    fn test_zero_population_rejected() {
        assert!(matches!(
            position(SEED, 1, 0),
            Err(SelectionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_index_rejected() {
        assert!(matches!(
            position(SEED, 0, 10),
            Err(SelectionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_seed_rejected() {
        assert!(HashChain::new("").is_err());
        assert!(position("", 1, 10).is_err());
    }

    #[test]
    fn test_large_population_uses_full_digest() {
        // The reduction must see all 256 bits: a population above u32::MAX
        // still matches the big-integer value computed independently.
        let derivation = HashChain::new(SEED).unwrap().derive(1, 1 << 40).unwrap();
        let h = BigUint::from_bytes_be(&derivation.digest);
        let expected = h % BigUint::from(1u64 << 40);
        assert_eq!(
            BigUint::from(derivation.position - 1),
            expected,
        );
    }

    #[test]
    fn test_reduce_range() {
        let d = digest(SEED, 7);
        let picked = reduce(&d, 50, 11);
        assert!((50..=60).contains(&picked));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_position_in_range(
                seed in "[a-z0-9]{1,24}",
                index in 1u64..10_000,
                population in 1u64..u64::MAX,
            ) {
                let p = position(&seed, index, population).unwrap();
                prop_assert!(p >= 1 && p <= population);
            }

            #[test]
            fn test_position_deterministic(
                seed in "[a-z0-9]{1,24}",
                index in 1u64..10_000,
                population in 1u64..1_000_000,
            ) {
                prop_assert_eq!(
                    position(&seed, index, population).unwrap(),
                    position(&seed, index, population).unwrap()
                );
            }
        }
    }
}
