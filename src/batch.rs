//! Parallel batches of independent headless matches
//!
//! Each match runs single-threaded on its own rayon worker. Match `i` uses
//! `seed + i`, so a batch is reproducible from its request.

use hashbrown::HashMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::config::SimConfig;
use crate::game::match_result::{MatchResult, Outcome};
use crate::game::request::{MatchError, MatchRequest};
use crate::session::run_headless;

/// Aggregate of a batch run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub matches: usize,
    /// Wins keyed by banner text
    pub wins: HashMap<String, usize>,
    pub draws: usize,
    /// Matches cut off by the tick limit
    pub timeouts: usize,
    pub average_ticks: f64,
}

impl BatchReport {
    fn record(&mut self, result: &MatchResult) {
        self.matches += 1;
        match &result.outcome {
            None => self.timeouts += 1,
            Some(Outcome::Draw) => self.draws += 1,
            Some(_) => *self.wins.entry(result.banner.clone()).or_insert(0) += 1,
        }
    }
}

pub fn run_batch(
    request: &MatchRequest,
    config: &SimConfig,
    matches: usize,
    max_ticks: u64,
) -> Result<BatchReport, MatchError> {
    request.validate()?;

    let results = (0..matches)
        .into_par_iter()
        .map(|i| {
            let mut seeded = request.clone();
            seeded.seed = request.seed.wrapping_add(i as u64);
            run_headless(&seeded, config.clone(), max_ticks)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = BatchReport::default();
    let mut total_ticks = 0u64;
    for result in &results {
        report.record(result);
        total_ticks += result.ticks;
    }
    if report.matches > 0 {
        report.average_ticks = total_ticks as f64 / report.matches as f64;
    }

    info!(
        "Batch of {} {} matches done: {} timeouts, {} draws",
        report.matches, request.mode, report.timeouts, report.draws
    );
    Ok(report)
}
