use std::borrow::Cow;
use bit_set::BitSet;

/// Ticket values and interval bounds. The puzzle only ever uses non-negative
/// integers.
pub type Value = u64;

/// Error type. Everything here is fatal for a run: malformed input, failure
/// to read it, and puzzles whose constraints cannot be satisfied. Running out
/// of alternatives at one branch of the search is not an error; only
/// exhausting the whole search is.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed input on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: ParseError,
    },
    #[error("could not read puzzle: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsatisfiable constraints: {0}")]
    Unsatisfiable(Cow<'static, str>),
    #[error("inconsistent puzzle: {0}")]
    Inconsistent(ParseError),
    #[error("result does not fit in 64 bits")]
    Overflow,
    #[error("solver misuse: {0}")]
    Solver(Cow<'static, str>),
}

impl Error {
    pub fn malformed(line: usize, source: ParseError) -> Self {
        Error::Malformed { line, source }
    }

    pub const fn unsatisfiable_const(s: &'static str) -> Self {
        Error::Unsatisfiable(Cow::Borrowed(s))
    }

    pub fn unsatisfiable<S: Into<String>>(s: S) -> Self {
        Error::Unsatisfiable(Cow::Owned(s.into()))
    }

    pub const fn solver_const(s: &'static str) -> Self {
        Error::Solver(Cow::Borrowed(s))
    }

    pub fn is_unsatisfiable(&self) -> bool {
        matches!(self, Error::Unsatisfiable(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::Malformed { .. })
    }
}

/// The headed parts of the puzzle text, in the order they must appear.
/// Displays as the header line that introduces the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumIter)]
pub enum Section {
    #[strum(serialize = "your ticket:")]
    YourTicket,
    #[strum(serialize = "nearby tickets:")]
    NearbyTickets,
}

/// What went wrong on a single line. Wrapped in Error::Malformed along with
/// the line number, or in Error::Inconsistent when a puzzle is assembled
/// directly rather than parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected '<start>-<end>', got '{0}'")]
    BadInterval(String),
    #[error("interval start exceeds its end: {0}-{1}")]
    ReversedInterval(Value, Value),
    #[error("expected '<name>: <start>-<end> or ...', got '{0}'")]
    BadField(String),
    #[error("field name is empty")]
    EmptyName,
    #[error("field '{0}' is defined more than once")]
    DuplicateField(String),
    #[error("'{0}' is not a non-negative integer")]
    BadValue(String),
    #[error("ticket has {found} values but there are {expected} fields")]
    Arity { expected: usize, found: usize },
    #[error("expected '{expected}', got '{found}'")]
    MissingHeader { expected: Section, found: String },
    #[error("expected a blank line before '{0}', got '{1}'")]
    MissingSeparator(Section, String),
    #[error("input ended before {0} was complete")]
    UnexpectedEnd(Section),
    #[error("at least one field definition is required")]
    NoFields,
    #[error("unexpected content after the last ticket: '{0}'")]
    TrailingContent(String),
}

/// This a set of field indices (e.g., the fields still possible for a column,
/// or the fields already used by the search). Represented as a bitset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSet {
    s: BitSet,
}

impl FieldSet {
    pub fn empty(capacity: usize) -> Self {
        FieldSet { s: BitSet::with_capacity(capacity) }
    }

    pub fn full(n: usize) -> Self {
        FieldSet { s: (0..n).collect() }
    }

    pub fn insert(&mut self, field: usize) -> bool {
        self.s.insert(field)
    }

    pub fn remove(&mut self, field: usize) -> bool {
        self.s.remove(field)
    }

    pub fn contains(&self, field: usize) -> bool {
        self.s.contains(field)
    }

    pub fn is_empty(&self) -> bool {
        self.s.is_empty()
    }

    pub fn len(&self) -> usize {
        self.s.len()
    }

    pub fn clear(&mut self) {
        self.s.clear();
    }

    /// Ascending field index order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.s.iter()
    }

    pub fn difference(&self, other: &FieldSet) -> FieldSet {
        let mut d = self.clone();
        d.s.difference_with(&other.s);
        d
    }
}

impl FromIterator<usize> for FieldSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        FieldSet { s: iter.into_iter().collect() }
    }
}
