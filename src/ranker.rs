use crate::candidates::CandidateMatrix;

/// A ranker decides the order in which the solver commits columns. It is
/// consulted once, before the search starts; the order is fixed for the
/// whole search.
pub trait Ranker {
    /// Every column exactly once.
    fn order(&self, matrix: &CandidateMatrix) -> Vec<usize>;

    /// Describe a contradiction that is visible without searching (e.g., a
    /// column that no field can fill). The solver checks this before asking
    /// for an order.
    fn to_contradiction(&self, matrix: &CandidateMatrix) -> Option<String> {
        matrix.first_empty_column().map(|c| format!("no field can go in column {}", c))
    }
}

/// Most constrained column first: ascending ambiguity, ties broken by
/// ascending column index so the search is reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmbiguityRanker;

impl Ranker for AmbiguityRanker {
    fn order(&self, matrix: &CandidateMatrix) -> Vec<usize> {
        let mut columns = (0..matrix.columns()).collect::<Vec<_>>();
        // sort_by_key is stable, so equal ambiguity keeps column order.
        columns.sort_by_key(|c| matrix.ambiguity(*c));
        columns
    }
}

/// Columns in their natural order. Much more backtracking on real inputs, but
/// handy for checking that the heuristic doesn't change the answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnOrderRanker;

impl Ranker for ColumnOrderRanker {
    fn order(&self, matrix: &CandidateMatrix) -> Vec<usize> {
        (0..matrix.columns()).collect()
    }
}
