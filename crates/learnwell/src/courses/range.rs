/// Inclusive numeric window parsed from `"min-max"`, `"min+"` or a bare `"min"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl NumericRange {
    pub const fn closed(min: f64, max: f64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub const fn lower_bounded(min: f64) -> Self {
        Self { min, max: None }
    }

    /// Returns `None` for empty or malformed input; callers skip the criterion then.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Some(lower) = raw.strip_suffix('+') {
            return number(lower).map(Self::lower_bounded);
        }

        match raw.split_once('-') {
            Some((lower, upper)) if upper.trim().is_empty() => {
                number(lower).map(Self::lower_bounded)
            }
            Some((lower, upper)) => Some(Self::closed(number(lower)?, number(upper)?)),
            None => number(raw).map(Self::lower_bounded),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

fn number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_shapes() {
        assert_eq!(NumericRange::parse("5-10"), Some(NumericRange::closed(5.0, 10.0)));
        assert_eq!(NumericRange::parse(" 700+ "), Some(NumericRange::lower_bounded(700.0)));
        assert_eq!(NumericRange::parse("500"), Some(NumericRange::lower_bounded(500.0)));
        assert_eq!(NumericRange::parse("300-"), Some(NumericRange::lower_bounded(300.0)));
    }

    #[test]
    fn malformed_input_is_skipped() {
        for raw in ["", "  ", "cheap", "a-b", "10-x", "+", "-"] {
            assert_eq!(NumericRange::parse(raw), None, "input {raw:?}");
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = NumericRange::closed(5.0, 10.0);
        assert!(range.contains(5.0));
        assert!(range.contains(10.0));
        assert!(!range.contains(10.5));

        let open = NumericRange::lower_bounded(700.0);
        assert!(open.contains(700.0));
        assert!(open.contains(25_000.0));
        assert!(!open.contains(699.99));
    }
}
