use log::{debug, info};
use crate::candidates::CandidateMatrix;
use crate::config::Config;
use crate::core::{Error, Value};
use crate::debug::{StatsObserver, Tee, TraceObserver};
use crate::project::departure_product;
use crate::puzzle::Puzzle;
use crate::ranker::AmbiguityRanker;
use crate::scan::{scanning_error_rate, valid_tickets};
use crate::solver::{Assignment, FindFirstAssignment};

/// Both results for a puzzle, plus the assignment that produced the second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub error_rate: Value,
    pub departure_product: Value,
    pub assignment: Assignment,
}

/// Runs the whole pipeline: scan, filter, build candidates, search, project.
pub fn solve(puzzle: &Puzzle, config: &Config) -> Result<Answer, Error> {
    let error_rate = scanning_error_rate(puzzle)?;
    info!("scanning error rate: {}", error_rate);

    let matrix = CandidateMatrix::build(puzzle.fields(), valid_tickets(puzzle))?;
    debug!("candidates:\n{}", matrix);

    let mut stats = StatsObserver::new();
    let mut trace = TraceObserver;
    let assignment = {
        let mut observer = Tee(&mut stats, &mut trace);
        FindFirstAssignment::new(&matrix, &AmbiguityRanker, Some(&mut observer)).solve()?
    };
    match stats.stats().to_json() {
        Ok(json) => debug!("search stats: {}", json),
        Err(e) => debug!("search stats unavailable: {}", e),
    }
    debug!("assignment: {:?}", assignment.names(puzzle.fields()));

    let departure_product = departure_product(puzzle, &assignment, &config.marker)?;
    info!("product of '{}' fields: {}", config.marker, departure_product);
    Ok(Answer { error_rate, departure_product, assignment })
}
