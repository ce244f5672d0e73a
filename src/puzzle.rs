use std::collections::HashSet;
use std::fmt::Display;
use std::path::Path;
use log::debug;
use crate::core::{Error, ParseError, Section, Value};
use crate::field::{any_field_accepts, Field};
use crate::interval::parse_value;

/// Ordered values, one per column. Every ticket in a Puzzle has one column
/// per field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ticket(Vec<Value>);

impl Ticket {
    pub fn new(values: Vec<Value>) -> Self { Ticket(values) }

    pub fn values(&self) -> &[Value] { &self.0 }

    /// The values on this ticket that no field accepts.
    pub fn invalid_values<'a>(&'a self, fields: &'a [Field]) -> impl Iterator<Item = Value> + 'a {
        self.0.iter().copied().filter(move |v| !any_field_accepts(*v, fields))
    }

    /// Every value is accepted by some field. Stops at the first rejection.
    pub fn is_valid(&self, fields: &[Field]) -> bool {
        self.0.iter().all(|v| any_field_accepts(*v, fields))
    }

    /// One value per field.
    pub fn check_arity(&self, arity: usize) -> Result<(), ParseError> {
        if self.0.len() != arity {
            return Err(ParseError::Arity { expected: arity, found: self.0.len() });
        }
        Ok(())
    }

    fn parse(s: &str, arity: usize) -> Result<Self, ParseError> {
        let ticket = Ticket(s.split(',')
            .map(parse_value)
            .collect::<Result<Vec<_>, _>>()?);
        ticket.check_arity(arity)?;
        Ok(ticket)
    }
}

impl Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts = self.0.iter().map(|v| v.to_string()).collect::<Vec<_>>();
        write!(f, "{}", parts.join(","))
    }
}

/// The fields (in the order they were defined), your ticket, and the nearby
/// tickets. A field's position in fields() is its field index everywhere
/// else in the crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    fields: Vec<Field>,
    own_ticket: Ticket,
    nearby: Vec<Ticket>,
}

impl Puzzle {
    /// Holds a directly assembled puzzle to the same rules the parser
    /// enforces: at least one field, unique names, and every ticket with one
    /// value per field.
    pub fn new(fields: Vec<Field>, own_ticket: Ticket, nearby: Vec<Ticket>) -> Result<Self, Error> {
        if fields.is_empty() {
            return Err(Error::Inconsistent(ParseError::NoFields));
        }
        {
            let mut names = HashSet::new();
            if let Some(dup) = fields.iter().find(|f| !names.insert(f.name())) {
                return Err(Error::Inconsistent(ParseError::DuplicateField(dup.name().to_string())));
            }
        }
        for ticket in std::iter::once(&own_ticket).chain(nearby.iter()) {
            ticket.check_arity(fields.len()).map_err(Error::Inconsistent)?;
        }
        Ok(Puzzle { fields, own_ticket, nearby })
    }

    pub fn fields(&self) -> &[Field] { &self.fields }
    pub fn own_ticket(&self) -> &Ticket { &self.own_ticket }
    pub fn nearby_tickets(&self) -> &[Ticket] { &self.nearby }

    /// Number of columns on every ticket (equal to the number of fields).
    pub fn arity(&self) -> usize { self.fields.len() }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.field_index(name).map(|i| &self.fields[i])
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&contents)
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        let mut lines = Lines::new(s);

        let mut fields: Vec<Field> = Vec::new();
        let mut names = HashSet::new();
        loop {
            let (n, line) = match lines.next() {
                Some(l) => l,
                None if fields.is_empty() => return Err(lines.error(ParseError::NoFields)),
                None => return Err(lines.error(ParseError::UnexpectedEnd(Section::YourTicket))),
            };
            if line.trim().is_empty() {
                if fields.is_empty() {
                    return Err(Error::malformed(n, ParseError::NoFields));
                }
                break;
            }
            let field: Field = line.parse().map_err(|e| Error::malformed(n, e))?;
            if !names.insert(field.name().to_string()) {
                return Err(Error::malformed(n, ParseError::DuplicateField(field.name().to_string())));
            }
            fields.push(field);
        }
        let arity = fields.len();

        lines.expect_header(Section::YourTicket)?;
        let own_ticket = {
            let (n, line) = lines.next()
                .ok_or_else(|| lines.error(ParseError::UnexpectedEnd(Section::YourTicket)))?;
            Ticket::parse(line, arity).map_err(|e| Error::malformed(n, e))?
        };
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => {},
            Some((n, line)) => {
                return Err(Error::malformed(n, ParseError::MissingSeparator(Section::NearbyTickets, line.to_string())));
            },
            None => return Err(lines.error(ParseError::UnexpectedEnd(Section::NearbyTickets))),
        }
        lines.expect_header(Section::NearbyTickets)?;

        let mut nearby = Vec::new();
        let mut blank_seen = false;
        while let Some((n, line)) = lines.next() {
            if line.trim().is_empty() {
                blank_seen = true;
                continue;
            } else if blank_seen {
                return Err(Error::malformed(n, ParseError::TrailingContent(line.to_string())));
            }
            nearby.push(Ticket::parse(line, arity).map_err(|e| Error::malformed(n, e))?);
        }

        debug!("parsed {} fields and {} nearby tickets", fields.len(), nearby.len());
        Ok(Puzzle { fields, own_ticket, nearby })
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for field in &self.fields {
            writeln!(f, "{}", field)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", Section::YourTicket)?;
        writeln!(f, "{}", self.own_ticket)?;
        writeln!(f)?;
        writeln!(f, "{}", Section::NearbyTickets)?;
        for t in &self.nearby {
            writeln!(f, "{}", t)?;
        }
        Ok(())
    }
}

// Line cursor that remembers the last (1-based) line number so that errors
// at end of input can still point somewhere.
struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
    last: usize,
}

impl <'a> Lines<'a> {
    fn new(s: &'a str) -> Self {
        Lines { inner: s.lines().enumerate(), last: 0 }
    }

    fn next(&mut self) -> Option<(usize, &'a str)> {
        let (i, line) = self.inner.next()?;
        self.last = i + 1;
        Some((self.last, line))
    }

    fn error(&self, e: ParseError) -> Error {
        Error::malformed(self.last + 1, e)
    }

    fn expect_header(&mut self, section: Section) -> Result<(), Error> {
        match self.next() {
            Some((_, line)) if line.trim() == section.to_string() => Ok(()),
            Some((n, line)) => Err(Error::malformed(n, ParseError::MissingHeader {
                expected: section,
                found: line.to_string(),
            })),
            None => Err(self.error(ParseError::UnexpectedEnd(section))),
        }
    }
}

#[cfg(any(test, feature = "test-util"))]
pub mod test_util {
    /// Every value is accepted by some field except 4, 55 and 12.
    pub const SCANNING_EXAMPLE: &str = "class: 1-3 or 5-7\n\
                                        row: 6-11 or 33-44\n\
                                        seat: 13-40 or 45-50\n\
                                        \n\
                                        your ticket:\n\
                                        7,1,14\n\
                                        \n\
                                        nearby tickets:\n\
                                        7,3,47\n\
                                        40,4,50\n\
                                        55,2,20\n\
                                        38,6,12\n";

    /// Uniquely resolves to row, class, seat.
    pub const DEDUCTION_EXAMPLE: &str = "class: 0-1 or 4-19\n\
                                         row: 0-5 or 8-19\n\
                                         seat: 0-13 or 16-19\n\
                                         \n\
                                         your ticket:\n\
                                         11,12,13\n\
                                         \n\
                                         nearby tickets:\n\
                                         3,9,18\n\
                                         15,1,5\n\
                                         5,14,9\n";

    /// Same shape as DEDUCTION_EXAMPLE, with the class and row fields renamed
    /// so that they carry the departure marker, plus one invalid ticket.
    pub const DEPARTURE_EXAMPLE: &str = "departure location: 0-1 or 4-19\n\
                                         departure station: 0-5 or 8-19\n\
                                         seat: 0-13 or 16-19\n\
                                         \n\
                                         your ticket:\n\
                                         11,12,13\n\
                                         \n\
                                         nearby tickets:\n\
                                         3,9,18\n\
                                         15,1,5\n\
                                         20,2,2\n\
                                         5,14,9\n";

    /// Two indistinguishable fields cannot cover three columns, and "late"
    /// accepts none of the observed values.
    pub const UNSATISFIABLE_EXAMPLE: &str = "early: 0-5\n\
                                             middle: 0-5\n\
                                             late: 10-20\n\
                                             \n\
                                             your ticket:\n\
                                             1,2,3\n\
                                             \n\
                                             nearby tickets:\n\
                                             4,5,0\n";
}
