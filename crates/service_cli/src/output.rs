//! Selection rendering
//!
//! Output is rendered in full before anything is written, so a failed run
//! never leaves a partial listing on stdout.

use sampler_core::{SelectedBallot, Selection};
use serde::Serialize;

use crate::config::{OutputFormat, SortOrder};
use crate::{CliError, Result};

/// One row of JSON or CSV output
#[derive(Debug, Serialize)]
struct BallotRecord<'a> {
    draw: usize,
    position: u64,
    ballot: String,
    county: &'a str,
    location: &'a str,
}

impl<'a> From<&'a SelectedBallot> for BallotRecord<'a> {
    fn from(selected: &'a SelectedBallot) -> Self {
        Self {
            draw: selected.draw,
            position: selected.position,
            ballot: selected.ballot.to_string(),
            county: &selected.ballot.county,
            location: &selected.location,
        }
    }
}

/// Render a selection in the requested order and format
pub fn render(selection: &Selection, order: SortOrder, format: OutputFormat) -> Result<String> {
    let ballots: Vec<&SelectedBallot> = match order {
        SortOrder::Selection => selection.ballots.iter().collect(),
        SortOrder::Location => selection.by_location(),
    };

    match format {
        OutputFormat::Text => Ok(ballots
            .iter()
            .map(|b| format!("{}\n", b.ballot))
            .collect()),
        OutputFormat::Json => {
            let records: Vec<BallotRecord<'_>> = ballots.into_iter().map(Into::into).collect();
            let mut json = serde_json::to_string_pretty(&records)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for ballot in ballots {
                writer.serialize(BallotRecord::from(ballot))?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| CliError::Output(e.to_string()))?;
            String::from_utf8(bytes).map_err(|e| CliError::Output(e.to_string()))
        }
    }
}
