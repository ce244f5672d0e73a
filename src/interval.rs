use std::fmt::Display;
use std::str::FromStr;
use crate::core::{ParseError, Value};

/// Inclusive on both ends. Always start <= end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    start: Value,
    end: Value,
}

impl Interval {
    pub fn new(start: Value, end: Value) -> Result<Self, ParseError> {
        if start > end {
            return Err(ParseError::ReversedInterval(start, end));
        }
        Ok(Interval { start, end })
    }

    pub fn start(&self) -> Value { self.start }
    pub fn end(&self) -> Value { self.end }

    pub fn contains(&self, value: Value) -> bool {
        self.start <= value && value <= self.end
    }
}

pub(crate) fn parse_value(s: &str) -> Result<Value, ParseError> {
    let s = s.trim();
    s.parse::<Value>().map_err(|_| ParseError::BadValue(s.to_string()))
}

impl FromStr for Interval {
    type Err = ParseError;

    // "<start>-<end>"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (start, end) = s.split_once('-')
            .ok_or_else(|| ParseError::BadInterval(s.to_string()))?;
        let start = parse_value(start).map_err(|_| ParseError::BadInterval(s.to_string()))?;
        let end = parse_value(end).map_err(|_| ParseError::BadInterval(s.to_string()))?;
        Interval::new(start, end)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_interval_boundaries() {
        let i = Interval::new(5, 7).unwrap();
        assert!(!i.contains(4));
        assert!(i.contains(5));
        assert!(i.contains(6));
        assert!(i.contains(7));
        assert!(!i.contains(8));
        let point = Interval::new(0, 0).unwrap();
        assert!(point.contains(0));
        assert!(!point.contains(1));
    }

    #[test]
    fn test_interval_reversed() {
        assert_eq!(Interval::new(7, 5), Err(ParseError::ReversedInterval(7, 5)));
        assert_eq!("9-2".parse::<Interval>(), Err(ParseError::ReversedInterval(9, 2)));
    }

    #[test]
    fn test_interval_parse() {
        assert_eq!("13-40".parse::<Interval>(), Interval::new(13, 40));
        assert_eq!(" 1-3 ".parse::<Interval>(), Interval::new(1, 3));
        assert_eq!("13".parse::<Interval>(), Err(ParseError::BadInterval("13".into())));
        assert_eq!("a-3".parse::<Interval>(), Err(ParseError::BadInterval("a-3".into())));
        assert_eq!("-1-3".parse::<Interval>(), Err(ParseError::BadInterval("-1-3".into())));
        assert_eq!(Interval::new(45, 50).unwrap().to_string(), "45-50");
    }
}
