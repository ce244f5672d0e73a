use crate::core::{Error, Value};
use crate::field::Field;
use crate::puzzle::{Puzzle, Ticket};
use crate::solver::Assignment;

/// Product of your ticket's values over the columns whose assigned field
/// name satisfies the predicate. 1 if no column does.
pub fn project_product<P>(
    assignment: &Assignment,
    fields: &[Field],
    own_ticket: &Ticket,
    predicate: P,
) -> Result<Value, Error>
where P: Fn(&str) -> bool {
    assignment.iter()
        .filter(|(_, f)| predicate(fields[*f].name()))
        .try_fold(1 as Value, |product, (column, _)| {
            product.checked_mul(own_ticket.values()[column]).ok_or(Error::Overflow)
        })
}

/// Product over the fields whose name starts with the marker.
pub fn departure_product(puzzle: &Puzzle, assignment: &Assignment, marker: &str) -> Result<Value, Error> {
    project_product(assignment, puzzle.fields(), puzzle.own_ticket(), |name| name.starts_with(marker))
}

#[cfg(test)]
mod test {
    use crate::candidates::CandidateMatrix;
    use crate::puzzle::test_util::{DEDUCTION_EXAMPLE, DEPARTURE_EXAMPLE};
    use crate::ranker::AmbiguityRanker;
    use crate::scan::valid_tickets;
    use crate::solver::find_assignment;
    use super::*;

    fn solved(text: &str) -> (Puzzle, Assignment) {
        let puzzle = Puzzle::parse(text).unwrap();
        let matrix = CandidateMatrix::build(puzzle.fields(), valid_tickets(&puzzle)).unwrap();
        let assignment = find_assignment(&matrix, &AmbiguityRanker).unwrap();
        (puzzle, assignment)
    }

    #[test]
    fn test_deduction_product() {
        let (puzzle, assignment) = solved(DEDUCTION_EXAMPLE);
        assert_eq!(departure_product(&puzzle, &assignment, "class").unwrap(), 12);
        assert_eq!(departure_product(&puzzle, &assignment, "row").unwrap(), 11);
        assert_eq!(departure_product(&puzzle, &assignment, "").unwrap(), 11 * 12 * 13);
    }

    #[test]
    fn test_departure_example() {
        let (puzzle, assignment) = solved(DEPARTURE_EXAMPLE);
        assert_eq!(departure_product(&puzzle, &assignment, "departure ").unwrap(), 132);
    }

    #[test]
    fn test_no_matching_field() {
        let (puzzle, assignment) = solved(DEDUCTION_EXAMPLE);
        assert_eq!(departure_product(&puzzle, &assignment, "departure ").unwrap(), 1);
    }

    #[test]
    fn test_explicit_assignment() {
        let puzzle = Puzzle::parse(DEDUCTION_EXAMPLE).unwrap();
        // Column 0 is seat, column 1 is class, column 2 is row.
        let assignment = Assignment::new(vec![2, 0, 1]);
        assert_eq!(departure_product(&puzzle, &assignment, "class").unwrap(), 12);
        assert_eq!(
            project_product(&assignment, puzzle.fields(), puzzle.own_ticket(), |n| n != "class").unwrap(),
            11 * 13,
        );
    }

    #[test]
    fn test_overflow() {
        let puzzle = Puzzle::parse(DEDUCTION_EXAMPLE).unwrap();
        let ticket = Ticket::new(vec![u64::MAX, 2, 1]);
        let assignment = Assignment::new(vec![0, 1, 2]);
        let result = project_product(&assignment, puzzle.fields(), &ticket, |_| true);
        assert!(matches!(result, Err(Error::Overflow)));
        assert_eq!(
            project_product(&assignment, puzzle.fields(), &ticket, |n| n != "row").unwrap(),
            u64::MAX,
        );
    }
}
