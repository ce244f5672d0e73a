use std::fmt::Display;
use std::str::FromStr;
use crate::core::{ParseError, Value};
use crate::interval::Interval;

/// A named predicate over values: the OR of its intervals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    name: String,
    ranges: Vec<Interval>,
}

impl Field {
    pub fn new<S: Into<String>>(name: S, ranges: Vec<Interval>) -> Self {
        Field { name: name.into(), ranges }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn ranges(&self) -> &[Interval] { &self.ranges }

    pub fn accepts(&self, value: Value) -> bool {
        self.ranges.iter().any(|r| r.contains(value))
    }
}

/// True iff at least one of the fields accepts the value.
pub fn any_field_accepts(value: Value, fields: &[Field]) -> bool {
    fields.iter().any(|f| f.accepts(value))
}

impl FromStr for Field {
    type Err = ParseError;

    // "<name>: <start>-<end> or <start>-<end> ..."; the name may contain
    // spaces but not colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, rules) = s.split_once(':')
            .ok_or_else(|| ParseError::BadField(s.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ParseError::EmptyName);
        }
        let rules = rules.trim();
        if rules.is_empty() {
            return Err(ParseError::BadField(s.to_string()));
        }
        let ranges = rules.split(" or ")
            .map(Interval::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Field::new(name, ranges))
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.name)?;
        for (i, r) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, " or ")?;
            }
            write!(f, "{}", r)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn field(s: &str) -> Field {
        s.parse().unwrap()
    }

    #[test]
    fn test_field_parse() {
        let f = field("departure location: 26-404 or 427-951");
        assert_eq!(f.name(), "departure location");
        assert_eq!(f.ranges(), &[Interval::new(26, 404).unwrap(), Interval::new(427, 951).unwrap()]);
        assert_eq!(f.to_string(), "departure location: 26-404 or 427-951");
        assert_eq!(field("zone: 3-3").ranges().len(), 1);
        assert_eq!(field("zone: 1-2 or 4-5 or 7-8").ranges().len(), 3);
    }

    #[test]
    fn test_field_parse_errors() {
        assert_eq!("class 1-3".parse::<Field>(), Err(ParseError::BadField("class 1-3".into())));
        assert_eq!(": 1-3".parse::<Field>(), Err(ParseError::EmptyName));
        assert_eq!("class:".parse::<Field>(), Err(ParseError::BadField("class:".into())));
        assert_eq!("class: 1-3 or".parse::<Field>(), Err(ParseError::BadInterval("1-3 or".into())));
        assert_eq!("class: 1-3 or 7-5".parse::<Field>(), Err(ParseError::ReversedInterval(7, 5)));
    }

    #[test]
    fn test_accepts_boundaries() {
        let f = field("class: 1-3 or 5-7");
        let expected = [
            (0, false), (1, true), (3, true), (4, false),
            (5, true), (7, true), (8, false),
        ];
        for (v, ok) in expected {
            assert_eq!(f.accepts(v), ok, "value {}", v);
        }
    }

    #[test]
    fn test_any_field_accepts() {
        let fields = vec![
            field("class: 1-3 or 5-7"),
            field("row: 6-11 or 33-44"),
            field("seat: 13-40 or 45-50"),
        ];
        // Exhaustively compare against a direct scan of every interval, which
        // covers start-1/start/end/end+1 for each bound.
        for v in 0..=55 {
            let direct = fields.iter()
                .flat_map(|f| f.ranges().iter())
                .any(|r| r.start() <= v && v <= r.end());
            assert_eq!(any_field_accepts(v, &fields), direct, "value {}", v);
        }
        assert!(!any_field_accepts(4, &fields));
        assert!(!any_field_accepts(12, &fields));
        assert!(!any_field_accepts(55, &fields));
        assert!(!any_field_accepts(1, &[]));
    }
}
