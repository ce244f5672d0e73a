use std::fmt::Debug;
use log::debug;
use crate::candidates::CandidateMatrix;
use crate::core::{Error, FieldSet};
use crate::field::Field;
use crate::ranker::Ranker;

/// Which field (by index) belongs to each column. Total over the columns and
/// injective over the fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment(Vec<usize>);

impl Assignment {
    pub fn new(fields: Vec<usize>) -> Self { Assignment(fields) }

    /// (column, field) pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().copied().enumerate()
    }

    /// Every column appears once and every one of n_fields fields is used
    /// exactly once.
    pub fn is_bijection(&self, n_fields: usize) -> bool {
        if self.0.len() != n_fields {
            return false;
        }
        let mut seen = FieldSet::empty(n_fields);
        self.0.iter().all(|f| *f < n_fields && seen.insert(*f))
    }

    /// Field names in column order.
    pub fn names<'a>(&self, fields: &'a [Field]) -> Vec<&'a str> {
        self.0.iter().map(|f| fields[*f].name()).collect()
    }
}

/// A decision point in the search: the column being filled, the fields that
/// were still unused candidates for it when the branch was opened, and which
/// of them is currently chosen.
#[derive(Debug, Clone)]
pub struct BranchPoint {
    pub branch_step: usize,
    pub column: usize,
    choices: Vec<usize>,
    index: usize,
}

impl BranchPoint {
    fn new(step: usize, column: usize, choices: Vec<usize>) -> Option<Self> {
        if choices.is_empty() {
            None
        } else {
            Some(BranchPoint { branch_step: step, column, choices, index: 0 })
        }
    }

    /// (column, field) currently chosen.
    pub fn chosen(&self) -> (usize, usize) {
        (self.column, self.choices[self.index])
    }

    fn advance(&mut self) -> Option<(usize, usize)> {
        if self.index + 1 < self.choices.len() {
            self.index += 1;
            Some(self.chosen())
        } else {
            None
        }
    }
}

/// The state of the search. At any point in time, the solver is either
/// checking the matrix (initializing), advancing (ready to commit another
/// column), backtracking (undoing commitments), solved (every column has a
/// field), or exhausted (no alternatives are left).
#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum AssignmentSolverState {
    Initializing,
    InitializationFailed,
    Advancing,
    Backtracking,
    Solved,
    Exhausted,
}

/// A read-only view of the solver, handed to StepObservers.
pub trait AssignmentSolverView {
    fn step_count(&self) -> usize;
    fn solver_state(&self) -> AssignmentSolverState;
    fn is_done(&self) -> bool;
    fn depth(&self) -> usize;
    fn most_recent_action(&self) -> Option<(usize, usize)>;
    fn backtracked_steps(&self) -> Option<usize>;
    fn partial_assignment(&self) -> &[Option<usize>];
    fn matrix(&self) -> &CandidateMatrix;
}

/// Lets the caller inspect the solver after every step without taking over
/// the solve loop.
pub trait StepObserver {
    fn after_step(&mut self, solver: &dyn AssignmentSolverView);
}

const PUZZLE_ALREADY_DONE: Error = Error::solver_const("Search already finished");
const FIELD_ALREADY_USED: Error = Error::solver_const("Field is already assigned to another column");
const UNDO_MISMATCH: Error = Error::solver_const("Undo does not match the current assignment");
const BAD_ORDER: Error = Error::solver_const("Ranker order is not a permutation of the columns");
const NO_ASSIGNMENT: Error = Error::unsatisfiable_const("no assignment of fields to columns exists");

/// Depth-first search for a column -> field bijection consistent with a
/// CandidateMatrix. Columns are committed in the ranker's order; at each one
/// the candidate fields not yet used are tried in ascending index order.
/// Every commitment is undone before the next alternative is applied.
///
/// Most users should prefer FindFirstAssignment; this lower-level API is
/// stepped one action at a time.
pub struct AssignmentSolver<'a, R: Ranker> {
    step: usize,
    matrix: &'a CandidateMatrix,
    ranker: &'a R,
    order: Vec<usize>,
    used: FieldSet,
    assignment: Vec<Option<usize>>,
    stack: Vec<BranchPoint>,
    backtracked_steps: Option<usize>,
    contradiction: Option<String>,
    state: AssignmentSolverState,
}

impl <'a, R: Ranker> Debug for AssignmentSolver<'a, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "State: {:?}\nOrder: {:?}\nAssignment: {:?}\nMatrix:\n{}",
               self.state, self.order, self.assignment, self.matrix)
    }
}

impl <'a, R: Ranker> AssignmentSolverView for AssignmentSolver<'a, R> {
    fn step_count(&self) -> usize {
        self.step
    }

    fn solver_state(&self) -> AssignmentSolverState {
        self.state
    }

    fn is_done(&self) -> bool {
        matches!(
            self.state,
            AssignmentSolverState::InitializationFailed
                | AssignmentSolverState::Solved
                | AssignmentSolverState::Exhausted
        )
    }

    fn depth(&self) -> usize {
        self.stack.len()
    }

    fn most_recent_action(&self) -> Option<(usize, usize)> {
        self.stack.last().map(|b| b.chosen())
    }

    fn backtracked_steps(&self) -> Option<usize> { self.backtracked_steps }

    fn partial_assignment(&self) -> &[Option<usize>] {
        &self.assignment
    }

    fn matrix(&self) -> &CandidateMatrix {
        self.matrix
    }
}

impl <'a, R: Ranker> AssignmentSolver<'a, R> {
    pub fn new(matrix: &'a CandidateMatrix, ranker: &'a R) -> Self {
        AssignmentSolver {
            step: 0,
            matrix,
            ranker,
            order: Vec::new(),
            used: FieldSet::empty(matrix.fields()),
            assignment: vec![None; matrix.columns()],
            stack: Vec::new(),
            backtracked_steps: None,
            contradiction: None,
            state: AssignmentSolverState::Initializing,
        }
    }

    /// The order columns are committed in (empty until the first step).
    pub fn order(&self) -> &[usize] { &self.order }

    /// Why initialization failed, if it did.
    pub fn contradiction(&self) -> Option<&str> { self.contradiction.as_deref() }

    /// The complete assignment, once solved.
    pub fn assignment(&self) -> Option<Assignment> {
        if self.state != AssignmentSolverState::Solved {
            return None;
        }
        self.assignment.iter().copied().collect::<Option<Vec<_>>>().map(Assignment)
    }

    fn is_permutation(order: &[usize], columns: usize) -> bool {
        let mut seen = FieldSet::empty(columns);
        order.len() == columns && order.iter().all(|c| *c < columns && seen.insert(*c))
    }

    fn apply(&mut self, decision: BranchPoint) -> Result<(), Error> {
        let (column, field) = decision.chosen();
        if self.used.contains(field) || self.assignment[column].is_some() {
            return Err(FIELD_ALREADY_USED);
        }
        self.used.insert(field);
        self.assignment[column] = Some(field);
        self.stack.push(decision);
        self.state = AssignmentSolverState::Advancing;
        Ok(())
    }

    fn unapply(&mut self, decision: &BranchPoint) -> Result<(), Error> {
        let (column, field) = decision.chosen();
        if self.assignment[column] != Some(field) {
            return Err(UNDO_MISMATCH);
        }
        self.used.remove(field);
        self.assignment[column] = None;
        Ok(())
    }

    // Candidates for the next column in the order that no committed column
    // has taken yet. None if there are none.
    fn open_branch(&self) -> Option<BranchPoint> {
        let column = self.order[self.stack.len()];
        let choices = self.matrix.candidates(column).difference(&self.used).iter().collect();
        BranchPoint::new(self.step, column, choices)
    }

    pub fn step(&mut self) -> Result<(), Error> {
        self.step += 1;
        match self.state {
            AssignmentSolverState::Initializing => {
                if let Some(reason) = self.ranker.to_contradiction(self.matrix) {
                    self.contradiction = Some(reason);
                    self.state = AssignmentSolverState::InitializationFailed;
                    return Ok(());
                }
                let order = self.ranker.order(self.matrix);
                if !Self::is_permutation(&order, self.matrix.columns()) {
                    return Err(BAD_ORDER);
                }
                debug!("column order: {:?}", order);
                self.order = order;
                self.state = AssignmentSolverState::Advancing;
                Ok(())
            }
            AssignmentSolverState::InitializationFailed
            | AssignmentSolverState::Solved
            | AssignmentSolverState::Exhausted => Err(PUZZLE_ALREADY_DONE),
            AssignmentSolverState::Advancing => {
                self.backtracked_steps = None;
                if self.stack.len() == self.order.len() {
                    self.state = AssignmentSolverState::Solved;
                    return Ok(());
                }
                match self.open_branch() {
                    Some(decision) => self.apply(decision),
                    None => {
                        self.state = AssignmentSolverState::Backtracking;
                        Ok(())
                    }
                }
            }
            AssignmentSolverState::Backtracking => {
                // Backtrack, attempting to advance the most recent branch.
                let Some(mut decision) = self.stack.pop() else {
                    self.state = AssignmentSolverState::Exhausted;
                    self.backtracked_steps = Some(self.step);
                    return Ok(());
                };
                self.backtracked_steps = Some(self.step - decision.branch_step);
                self.unapply(&decision)?;
                match decision.advance() {
                    Some(_) => self.apply(decision),
                    None => Ok(()),
                }
            }
        }
    }

    /// Force the solver into the backtracking state. (Useful for exhaustively
    /// listing all assignments.)
    pub fn force_backtrack(&mut self) -> bool {
        if self.state != AssignmentSolverState::Solved {
            return false;
        }
        self.state = AssignmentSolverState::Backtracking;
        true
    }

    /// Undo every commitment on the stack, leaving the state unchanged.
    pub fn unwind(&mut self) -> Result<(), Error> {
        while let Some(decision) = self.stack.pop() {
            self.unapply(&decision)?;
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.step = 0;
        self.order.clear();
        self.used.clear();
        self.assignment.iter_mut().for_each(|a| *a = None);
        self.stack.clear();
        self.backtracked_steps = None;
        self.contradiction = None;
        self.state = AssignmentSolverState::Initializing;
    }
}

/// Finds the first assignment in search order and stops. It does not check
/// that the assignment is the only one.
pub struct FindFirstAssignment<'a, R: Ranker> {
    solver: AssignmentSolver<'a, R>,
    observer: Option<&'a mut dyn StepObserver>,
}

impl <'a, R: Ranker> FindFirstAssignment<'a, R> {
    pub fn new(
        matrix: &'a CandidateMatrix,
        ranker: &'a R,
        observer: Option<&'a mut dyn StepObserver>,
    ) -> Self {
        FindFirstAssignment { solver: AssignmentSolver::new(matrix, ranker), observer }
    }

    pub fn view(&self) -> &dyn AssignmentSolverView {
        &self.solver
    }

    pub fn solve(&mut self) -> Result<Assignment, Error> {
        while !self.solver.is_done() {
            self.solver.step()?;
            if let Some(observer) = &mut self.observer {
                observer.after_step(&self.solver);
            }
        }
        match self.solver.solver_state() {
            AssignmentSolverState::Solved => {
                let assignment = self.solver.assignment().ok_or(NO_ASSIGNMENT)?;
                self.solver.unwind()?;
                Ok(assignment)
            },
            AssignmentSolverState::InitializationFailed => {
                Err(Error::unsatisfiable(self.solver.contradiction().unwrap_or_default()))
            },
            _ => Err(NO_ASSIGNMENT),
        }
    }
}

/// Counts every assignment. Exhaustive, so only for diagnostics and tests
/// that want to confirm a puzzle has exactly one answer.
pub struct FindAllAssignments<'a, R: Ranker> {
    solver: AssignmentSolver<'a, R>,
    observer: Option<&'a mut dyn StepObserver>,
}

impl <'a, R: Ranker> FindAllAssignments<'a, R> {
    pub fn new(
        matrix: &'a CandidateMatrix,
        ranker: &'a R,
        observer: Option<&'a mut dyn StepObserver>,
    ) -> Self {
        FindAllAssignments { solver: AssignmentSolver::new(matrix, ranker), observer }
    }

    fn is_done(&self) -> bool {
        matches!(
            self.solver.solver_state(),
            AssignmentSolverState::InitializationFailed | AssignmentSolverState::Exhausted
        )
    }

    // Returns the number of steps taken and the number of assignments found.
    pub fn solve_all(&mut self) -> Result<(usize, usize), Error> {
        let mut steps = 0;
        let mut count = 0;
        while !self.is_done() {
            self.solver.force_backtrack();
            self.solver.step()?;
            steps += 1;
            if self.solver.solver_state() == AssignmentSolverState::Solved {
                count += 1;
            }
            if let Some(observer) = &mut self.observer {
                observer.after_step(&self.solver);
            }
        }
        Ok((steps, count))
    }
}

/// Runs FindFirstAssignment to completion.
pub fn find_assignment<R: Ranker>(matrix: &CandidateMatrix, ranker: &R) -> Result<Assignment, Error> {
    FindFirstAssignment::new(matrix, ranker, None).solve()
}
