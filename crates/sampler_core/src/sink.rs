//! Audit event sinks.
//!
//! The selection pipeline never touches global logging state. Callers pass
//! an [`AuditSink`] that receives the run header, one event per draw in draw
//! order, and the finished selection.

use crate::selection::{SelectedBallot, Selection};

/// Receiver for selection-run events. Every method defaults to a no-op.
pub trait AuditSink {
    /// Called once, after the population is known and before any draw.
    fn run_started(&mut self, _seed: &str, _population: u64, _sample_size: usize) {}

    /// Called for each draw in selection order, duplicates included.
    fn ballot_selected(&mut self, _ballot: &SelectedBallot) {}

    /// Called once with the complete selection.
    fn run_finished(&mut self, _selection: &Selection) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AuditSink for NullSink {}

/// Forwards events to `tracing`.
///
/// Run start and finish are emitted at `info`, each draw at `debug`. The
/// subscriber is whatever the host process installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn run_started(&mut self, seed: &str, population: u64, sample_size: usize) {
        tracing::info!(seed, population, sample_size, "Drawing ballot sample");
    }

    fn ballot_selected(&mut self, ballot: &SelectedBallot) {
        tracing::debug!(
            draw = ballot.draw,
            position = ballot.position,
            ballot = %ballot.ballot,
            location = %ballot.location,
            "Selected ballot"
        );
    }

    fn run_finished(&mut self, selection: &Selection) {
        tracing::info!(
            selected = selection.len(),
            distinct = selection.distinct_positions(),
            hash_evaluations = selection.metadata.draws,
            "Ballot sample complete"
        );
    }
}

impl AuditSink for Vec<SelectedBallot> {
    fn ballot_selected(&mut self, ballot: &SelectedBallot) {
        self.push(ballot.clone());
    }
}
