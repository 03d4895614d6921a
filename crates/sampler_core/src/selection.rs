//! Selection pipeline: draw positions, resolve them, report them.
//!
//! ```text
//! SequenceProducer ──positions──▶ resolver ──BallotId──▶ Selection
//!                                     │
//!                                 AuditSink (draw order)
//! ```
//!
//! A run either returns every requested ballot or fails; a partial sample is
//! never produced.

use std::collections::{BTreeMap, HashSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::manifest::{locate, BatchSlot, CumulativeIndex};
use crate::natural::{sort_natural_by_key, NaturalKey};
use crate::sequence::{file_order, HashChainSampler, SampleMetadata, SequenceProducer};
use crate::sink::{AuditSink, NullSink};
use crate::types::{BallotId, Batch, Manifest, SelectionError};

/// Position-to-batch lookup strategy. Both give identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Resolver {
    /// Walk the manifest for every position
    Linear,
    /// Prefix sums with binary search, verified against the walk first
    #[default]
    Indexed,
}

/// One drawn ballot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectedBallot {
    /// 1-based draw number in selection order
    pub draw: usize,
    /// Population position in `[1, N]`
    pub position: u64,
    /// Resolved identifier
    pub ballot: BallotId,
    /// Storage location of the ballot's batch
    pub location: String,
}

/// Result of a selection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Seed the sample was drawn from
    pub seed: String,
    /// Population size N
    pub population: u64,
    /// Producer metadata
    pub metadata: SampleMetadata,
    /// Ballots in selection order
    pub ballots: Vec<SelectedBallot>,
}

impl Selection {
    /// Number of draws.
    pub fn len(&self) -> usize {
        self.ballots.len()
    }

    /// Returns `true` if nothing was drawn.
    pub fn is_empty(&self) -> bool {
        self.ballots.is_empty()
    }

    /// Positions in selection order.
    pub fn positions(&self) -> Vec<u64> {
        self.ballots.iter().map(|b| b.position).collect()
    }

    /// Positions in file order.
    pub fn file_order(&self) -> Vec<u64> {
        file_order(&self.positions())
    }

    /// Number of distinct positions drawn.
    pub fn distinct_positions(&self) -> usize {
        self.ballots
            .iter()
            .map(|b| b.position)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Identifiers in selection order.
    pub fn ids(&self) -> Vec<String> {
        self.ballots.iter().map(|b| b.ballot.to_string()).collect()
    }

    /// Ballots ordered naturally by identifier, for pulling by location.
    pub fn by_location(&self) -> Vec<&SelectedBallot> {
        let mut keyed: Vec<(String, &SelectedBallot)> = self
            .ballots
            .iter()
            .map(|b| (b.ballot.to_string(), b))
            .collect();
        sort_natural_by_key(&mut keyed, |entry| entry.0.as_str());
        keyed.into_iter().map(|(_, b)| b).collect()
    }

    /// Ballots grouped by county, counties and ballots in natural order.
    ///
    /// Grouping is by exact county name: `"County 07"` and `"County 7"` are
    /// separate groups even though they sort together.
    pub fn by_county(&self) -> BTreeMap<NaturalKey<'_>, Vec<&SelectedBallot>> {
        let mut groups: BTreeMap<NaturalKey<'_>, Vec<&SelectedBallot>> = BTreeMap::new();
        for ballot in self.by_location() {
            groups
                .entry(NaturalKey(ballot.ballot.county.as_str()))
                .or_default()
                .push(ballot);
        }
        groups
    }
}

/// Configurable selection run over any [`SequenceProducer`].
///
/// # Examples
///
/// ```rust
/// use sampler_core::selection::BallotSelector;
/// use sampler_core::sink::NullSink;
/// use sampler_core::types::{Batch, Manifest};
///
/// let manifest = Manifest::new(vec![
///     Batch::new("Adams", 1, 1, 90, ""),
///     Batch::new("Boulder", 1, 1, 10, ""),
/// ]);
/// let selection = BallotSelector::new()
///     .select("01234567890123456789", &manifest, 4, &mut NullSink)
///     .unwrap();
/// assert_eq!(
///     selection.ids(),
///     vec!["Adams-1-1-35", "Adams-1-1-9", "Adams-1-1-33", "Boulder-1-1-6"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct BallotSelector<P = HashChainSampler> {
    producer: P,
    with_replacement: bool,
    skip: usize,
    resolver: Resolver,
    declared_population: Option<u64>,
}

impl BallotSelector<HashChainSampler> {
    /// Selector backed by the hash-chain reference producer, sampling with
    /// replacement.
    pub fn new() -> Self {
        Self::with_producer(HashChainSampler)
    }
}

impl Default for BallotSelector<HashChainSampler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SequenceProducer> BallotSelector<P> {
    /// Selector backed by a custom producer.
    pub fn with_producer(producer: P) -> Self {
        Self {
            producer,
            with_replacement: true,
            skip: 0,
            resolver: Resolver::default(),
            declared_population: None,
        }
    }

    /// Sets the replacement discipline.
    pub fn with_replacement(mut self, with_replacement: bool) -> Self {
        self.with_replacement = with_replacement;
        self
    }

    /// Discards the first `skip` producer values.
    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Sets the lookup strategy.
    pub fn resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Population size the caller expects; the run fails if the manifest
    /// disagrees.
    pub fn declared_population(mut self, population: u64) -> Self {
        self.declared_population = Some(population);
        self
    }

    /// Draws `sample_size` ballots from `manifest`.
    ///
    /// # Errors
    ///
    /// - `InvalidInput`: empty seed, empty manifest with a non-zero sample,
    ///   or a producer that rejects its arguments
    /// - `PopulationMismatch`: declared population differs from the manifest
    /// - `OutOfRange`: a drawn position is outside the manifest
    /// - `IndexMismatch`: the cumulative index failed verification
    pub fn select(
        &self,
        seed: &str,
        manifest: &Manifest,
        sample_size: usize,
        sink: &mut dyn AuditSink,
    ) -> Result<Selection, SelectionError> {
        if seed.is_empty() {
            return Err(SelectionError::invalid_input("seed must not be empty"));
        }
        let population = manifest.population()?;
        if let Some(declared) = self.declared_population {
            if declared != population {
                return Err(SelectionError::PopulationMismatch {
                    declared,
                    manifest: population,
                });
            }
        }
        if sample_size > 0 && population == 0 {
            return Err(SelectionError::invalid_input(format!(
                "manifest holds no ballots but {sample_size} were requested"
            )));
        }

        sink.run_started(seed, population, sample_size);

        let (metadata, positions) = if sample_size == 0 {
            (
                SampleMetadata {
                    with_replacement: self.with_replacement,
                    skipped: self.skip,
                    ..SampleMetadata::default()
                },
                Vec::new(),
            )
        } else {
            self.producer.generate(
                sample_size,
                self.with_replacement,
                1,
                population,
                seed,
                self.skip,
            )?
        };
        if positions.len() != sample_size {
            return Err(SelectionError::invalid_input(format!(
                "producer returned {} positions, expected {}",
                positions.len(),
                sample_size
            )));
        }

        let slots = resolve_all(manifest, &positions, self.resolver)?;
        let batches = manifest.batches();
        let ballots: Vec<SelectedBallot> = positions
            .iter()
            .zip(slots)
            .enumerate()
            .map(|(i, (&position, slot))| {
                let batch = &batches[slot.batch_index];
                SelectedBallot {
                    draw: i + 1,
                    position,
                    ballot: BallotId::within(batch, slot.within_batch),
                    location: batch.location.clone(),
                }
            })
            .collect();

        for ballot in &ballots {
            sink.ballot_selected(ballot);
        }

        let selection = Selection {
            seed: seed.to_string(),
            population,
            metadata,
            ballots,
        };
        sink.run_finished(&selection);
        Ok(selection)
    }
}

/// Locates every position against one manifest snapshot.
///
/// Output order matches input order. With the `parallel` feature the lookups
/// run on the rayon pool; the manifest is only read. On failure the error of
/// the earliest failing position is returned.
pub fn resolve_all(
    manifest: &Manifest,
    positions: &[u64],
    resolver: Resolver,
) -> Result<Vec<BatchSlot>, SelectionError> {
    let batches = manifest.batches();
    match resolver {
        Resolver::Linear => locate_each(positions, |p| locate(batches, p)),
        Resolver::Indexed => {
            let index = CumulativeIndex::build(manifest)?;
            index.verify()?;
            locate_each(positions, |p| index.locate(p))
        }
    }
}

fn locate_each<F>(positions: &[u64], lookup: F) -> Result<Vec<BatchSlot>, SelectionError>
where
    F: Fn(u64) -> Result<BatchSlot, SelectionError> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    let outcomes: Vec<Result<BatchSlot, SelectionError>> =
        positions.par_iter().map(|&p| lookup(p)).collect();
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<Result<BatchSlot, SelectionError>> =
        positions.iter().map(|&p| lookup(p)).collect();

    outcomes.into_iter().collect()
}

/// Draws `n` ballots with replacement and returns their identifiers in
/// selection order.
///
/// `batches` is consumed once and must be in manifest order.
///
/// # Examples
///
/// ```rust
/// use sampler_core::selection::select_ballots_to_audit;
/// use sampler_core::types::Batch;
///
/// let batches = vec![Batch::new("Adams", 1, 1, 90, ""), Batch::new("Boulder", 1, 1, 10, "")];
/// let ids = select_ballots_to_audit("01234567890123456789", batches, 4).unwrap();
/// assert_eq!(ids, vec!["Adams-1-1-35", "Adams-1-1-9", "Adams-1-1-33", "Boulder-1-1-6"]);
/// ```
pub fn select_ballots_to_audit<I>(
    seed: &str,
    batches: I,
    n: usize,
) -> Result<Vec<String>, SelectionError>
where
    I: IntoIterator<Item = Batch>,
{
    let manifest: Manifest = batches.into_iter().collect();
    let selection = BallotSelector::new()
        .resolver(Resolver::Linear)
        .select(seed, &manifest, n, &mut NullSink)?;
    Ok(selection.ids())
}
