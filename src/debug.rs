use log::trace;
use serde_derive::Serialize;
use crate::solver::{AssignmentSolverState, AssignmentSolverView, StepObserver};

/// Does nothing. For callers that want to pass an observer unconditionally.
pub struct NullObserver;

impl StepObserver for NullObserver {
    fn after_step(&mut self, _solver: &dyn AssignmentSolverView) {}
}

/// Summary of a finished (or in-progress) search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SolveStats {
    pub steps: usize,
    pub backtracks: usize,
    pub longest_backtrack: usize,
    pub max_depth: usize,
}

impl SolveStats {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Collects SolveStats as the solver runs.
#[derive(Debug, Default)]
pub struct StatsObserver {
    stats: SolveStats,
}

impl StatsObserver {
    pub fn new() -> Self { Self::default() }

    pub fn stats(&self) -> SolveStats { self.stats }
}

impl StepObserver for StatsObserver {
    fn after_step(&mut self, solver: &dyn AssignmentSolverView) {
        self.stats.steps = solver.step_count();
        self.stats.max_depth = std::cmp::max(self.stats.max_depth, solver.depth());
        if solver.solver_state() == AssignmentSolverState::Backtracking {
            self.stats.backtracks += 1;
        }
        if let Some(n) = solver.backtracked_steps() {
            self.stats.longest_backtrack = std::cmp::max(self.stats.longest_backtrack, n);
        }
    }
}

/// Logs every step at trace level.
pub struct TraceObserver;

impl StepObserver for TraceObserver {
    fn after_step(&mut self, solver: &dyn AssignmentSolverView) {
        match solver.most_recent_action() {
            Some((column, field)) => trace!(
                "step {} {:?} depth {}: column {} -> field {}",
                solver.step_count(), solver.solver_state(), solver.depth(), column, field,
            ),
            None => trace!(
                "step {} {:?} depth {}",
                solver.step_count(), solver.solver_state(), solver.depth(),
            ),
        }
    }
}

/// Forwards each step to two observers.
pub struct Tee<'a, A: StepObserver, B: StepObserver>(pub &'a mut A, pub &'a mut B);

impl <'a, A: StepObserver, B: StepObserver> StepObserver for Tee<'a, A, B> {
    fn after_step(&mut self, solver: &dyn AssignmentSolverView) {
        self.0.after_step(solver);
        self.1.after_step(solver);
    }
}
