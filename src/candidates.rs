use std::fmt::Display;
use crate::core::{Error, FieldSet};
use crate::field::Field;
use crate::puzzle::Ticket;

/// A columns x fields table of the fields not yet ruled out for each column.
/// It starts out full and is only ever narrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMatrix {
    fields: usize,
    rows: Box<[FieldSet]>,
}

impl CandidateMatrix {
    pub fn full(columns: usize, fields: usize) -> Self {
        Self {
            fields,
            rows: vec![FieldSet::full(fields); columns].into_boxed_slice(),
        }
    }

    /// Narrows a full matrix by every value of every ticket: a field stays
    /// possible for a column only if it accepts that column's value on all of
    /// the tickets. The result does not depend on the order of the tickets.
    pub fn build<'a, I>(fields: &[Field], tickets: I) -> Result<Self, Error>
    where I: IntoIterator<Item = &'a Ticket> {
        let mut matrix = Self::full(fields.len(), fields.len());
        for ticket in tickets {
            matrix.observe(fields, ticket)?;
        }
        Ok(matrix)
    }

    /// Narrows by a single ticket, which must have one value per column.
    /// A ticket of any other length leaves the matrix untouched.
    pub fn observe(&mut self, fields: &[Field], ticket: &Ticket) -> Result<(), Error> {
        ticket.check_arity(self.columns()).map_err(Error::Inconsistent)?;
        for (column, value) in ticket.values().iter().enumerate() {
            for (f, field) in fields.iter().enumerate() {
                if !field.accepts(*value) {
                    self.narrow(column, f);
                }
            }
        }
        Ok(())
    }

    pub fn columns(&self) -> usize {
        self.rows.len()
    }

    pub fn fields(&self) -> usize {
        self.fields
    }

    pub fn get(&self, column: usize, field: usize) -> bool {
        self.rows[column].contains(field)
    }

    /// Rules out a field for a column. There is no way to widen.
    pub fn narrow(&mut self, column: usize, field: usize) {
        self.rows[column].remove(field);
    }

    pub fn candidates(&self, column: usize) -> &FieldSet {
        &self.rows[column]
    }

    /// How many fields are still possible for the column.
    pub fn ambiguity(&self, column: usize) -> usize {
        self.rows[column].len()
    }

    /// The first column with no possible field at all, if any.
    pub fn first_empty_column(&self) -> Option<usize> {
        self.rows.iter().position(|r| r.is_empty())
    }
}

impl Display for CandidateMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows.iter() {
            for field in 0..self.fields {
                write!(f, "{}", if row.contains(field) { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "test-util"))]
pub mod test_util {
    use super::CandidateMatrix;

    /// Column i (except the last) may hold field i or i+1; the last column
    /// may only hold field 0. The unique answer shifts every field by one,
    /// which natural column order only finds after a lot of backtracking.
    pub fn shifted_matrix(n: usize) -> CandidateMatrix {
        let mut m = CandidateMatrix::full(n, n);
        for c in 0..n {
            for f in 0..n {
                let allowed = if c + 1 == n { f == 0 } else { f == c || f == c + 1 };
                if !allowed {
                    m.narrow(c, f);
                }
            }
        }
        m
    }
}
