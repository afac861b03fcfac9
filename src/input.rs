// Numeric text entry
// Characters that cannot be part of the field's number are dropped as they are typed,
// so parsing further down never sees garbage

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    // digits only
    Unsigned,
    // digits with an optional leading minus
    Signed,
    // signed with at most one decimal point
    Decimal,
}

impl NumericKind {
    fn accepts(self, ch: char, position: usize, seen_point: bool) -> bool {
        match ch {
            '0'..='9' => true,
            '-' => position == 0 && self != NumericKind::Unsigned,
            '.' => self == NumericKind::Decimal && !seen_point,
            _ => false,
        }
    }
}

pub fn filter(kind: NumericKind, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut seen_point = false;
    for ch in text.chars() {
        if kind.accepts(ch, out.len(), seen_point) {
            seen_point |= ch == '.';
            out.push(ch);
        }
    }
    out
}

// Filters in place, returns true when something was rejected
pub fn sanitize(kind: NumericKind, text: &mut String) -> bool {
    let filtered = filter(kind, text);
    if filtered == *text {
        return false;
    }
    *text = filtered;
    true
}

// Empty or partial input ("", "-", ".") falls back to the given value
pub fn parse_f64(text: &str, fallback: f64) -> f64 {
    text.parse().unwrap_or(fallback)
}

pub fn parse_i32(text: &str, fallback: i32) -> i32 {
    text.parse().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_keeps_digits_only() {
        assert_eq!(filter(NumericKind::Unsigned, "5a0"), "50");
        assert_eq!(filter(NumericKind::Unsigned, "-12.5"), "125");
    }

    #[test]
    fn signed_allows_leading_minus() {
        assert_eq!(filter(NumericKind::Signed, "-12"), "-12");
        assert_eq!(filter(NumericKind::Signed, "1-2"), "12");
        assert_eq!(filter(NumericKind::Signed, "--3"), "-3");
        assert_eq!(filter(NumericKind::Signed, "3.5"), "35");
    }

    #[test]
    fn decimal_allows_one_point() {
        assert_eq!(filter(NumericKind::Decimal, "-1.2.3"), "-1.23");
        assert_eq!(filter(NumericKind::Decimal, "x.5"), ".5");
    }

    #[test]
    fn sanitize_reports_rejections() {
        let mut text = String::from("12");
        assert!(!sanitize(NumericKind::Unsigned, &mut text));
        text.push('e');
        assert!(sanitize(NumericKind::Unsigned, &mut text));
        assert_eq!(text, "12");
    }

    #[test]
    fn partial_input_falls_back() {
        assert_eq!(parse_f64("-", 7.0), 7.0);
        assert_eq!(parse_f64("", 7.0), 7.0);
        assert_eq!(parse_f64("-5", 7.0), -5.0);
        assert_eq!(parse_f64(".5", 7.0), 0.5);
        assert_eq!(parse_i32("-", 3), 3);
        assert_eq!(parse_i32("-14", 3), -14);
    }
}
