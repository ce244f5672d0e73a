use log::debug;
use crate::core::{Error, Value};
use crate::field::Field;
use crate::puzzle::{Puzzle, Ticket};

/// Sum of every nearby-ticket value that no field accepts. Your own ticket is
/// not scanned. A sum past u64::MAX is Error::Overflow.
pub fn scanning_error_rate(puzzle: &Puzzle) -> Result<Value, Error> {
    puzzle.nearby_tickets()
        .iter()
        .flat_map(|t| t.invalid_values(puzzle.fields()))
        .try_fold(0 as Value, |total, v| total.checked_add(v).ok_or(Error::Overflow))
}

/// Keeps only the tickets where every value is accepted by some field,
/// preserving order.
pub fn filter_valid<'a, I>(tickets: I, fields: &[Field]) -> Vec<&'a Ticket>
where I: IntoIterator<Item = &'a Ticket> {
    tickets.into_iter().filter(|t| t.is_valid(fields)).collect()
}

/// The valid nearby tickets followed by your own ticket. Your ticket is
/// always included; it is valid by construction of the puzzle and it narrows
/// the candidates like any other observation.
pub fn valid_tickets(puzzle: &Puzzle) -> Vec<&Ticket> {
    let mut valid = filter_valid(puzzle.nearby_tickets(), puzzle.fields());
    debug!(
        "discarded {} of {} nearby tickets",
        puzzle.nearby_tickets().len() - valid.len(),
        puzzle.nearby_tickets().len(),
    );
    valid.push(puzzle.own_ticket());
    valid
}

#[cfg(test)]
mod test {
    use crate::puzzle::test_util::{DEDUCTION_EXAMPLE, DEPARTURE_EXAMPLE, SCANNING_EXAMPLE};
    use super::*;

    #[test]
    fn test_scanning_error_rate() {
        let puzzle = Puzzle::parse(SCANNING_EXAMPLE).unwrap();
        assert_eq!(scanning_error_rate(&puzzle).unwrap(), 4 + 55 + 12);
        assert_eq!(scanning_error_rate(&Puzzle::parse(DEDUCTION_EXAMPLE).unwrap()).unwrap(), 0);
    }

    #[test]
    fn test_error_rate_ignores_own_ticket() {
        let puzzle = Puzzle::parse(SCANNING_EXAMPLE).unwrap();
        let bad_own = Puzzle::new(
            puzzle.fields().to_vec(),
            Ticket::new(vec![1000, 2000, 3000]),
            puzzle.nearby_tickets().to_vec(),
        ).unwrap();
        assert_eq!(scanning_error_rate(&bad_own).unwrap(), 71);
    }

    #[test]
    fn test_error_rate_counts_repeats() {
        let puzzle = Puzzle::parse(SCANNING_EXAMPLE).unwrap();
        let repeated = Puzzle::new(
            puzzle.fields().to_vec(),
            puzzle.own_ticket().clone(),
            vec![Ticket::new(vec![4, 4, 0]), Ticket::new(vec![4, 1, 2])],
        ).unwrap();
        assert_eq!(scanning_error_rate(&repeated).unwrap(), 4 + 4 + 0 + 4);
    }

    #[test]
    fn test_error_rate_overflow() {
        let puzzle = Puzzle::parse("a: 0-1\n\
                                    \n\
                                    your ticket:\n\
                                    1\n\
                                    \n\
                                    nearby tickets:\n\
                                    18446744073709551615\n\
                                    18446744073709551615\n").unwrap();
        assert!(matches!(scanning_error_rate(&puzzle), Err(Error::Overflow)));

        let at_limit = Puzzle::new(
            puzzle.fields().to_vec(),
            puzzle.own_ticket().clone(),
            vec![Ticket::new(vec![u64::MAX - 2]), Ticket::new(vec![2])],
        ).unwrap();
        assert_eq!(scanning_error_rate(&at_limit).unwrap(), u64::MAX);
    }

    #[test]
    fn test_valid_tickets() {
        let puzzle = Puzzle::parse(SCANNING_EXAMPLE).unwrap();
        let valid = valid_tickets(&puzzle);
        assert_eq!(valid, vec![&puzzle.nearby_tickets()[0], puzzle.own_ticket()]);

        let puzzle = Puzzle::parse(DEPARTURE_EXAMPLE).unwrap();
        let valid = valid_tickets(&puzzle);
        assert_eq!(valid.len(), 4);
        assert_eq!(valid.last(), Some(&puzzle.own_ticket()));
        assert!(!valid.contains(&&puzzle.nearby_tickets()[2]));
    }

    #[test]
    fn test_filter_is_idempotent() {
        for text in [SCANNING_EXAMPLE, DEDUCTION_EXAMPLE, DEPARTURE_EXAMPLE] {
            let puzzle = Puzzle::parse(text).unwrap();
            let once = filter_valid(puzzle.nearby_tickets(), puzzle.fields());
            let twice = filter_valid(once.iter().copied(), puzzle.fields());
            assert_eq!(once, twice);
        }
    }
}
