// Reference code value object

use serde::{Deserialize, Serialize};

use crate::value_objects::ReportKind;

/// The human-facing reference assigned to a report at creation time,
/// e.g. `LST0007` or `FND0123`.
///
/// The numeric part is zero-padded to 4 digits; past 9999 the field widens
/// rather than truncating or erroring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RefCode(pub String);

impl RefCode {
    pub fn new(kind: ReportKind, value: u64) -> Self {
        Self(format!("{}{:04}", prefix(kind), value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits a raw code into its kind and counter value. Returns `None` for
    /// codes that do not carry a known prefix or a numeric tail.
    pub fn parse(raw: &str) -> Option<(ReportKind, u64)> {
        let raw = raw.trim().to_uppercase();
        let (kind, digits) = if let Some(rest) = raw.strip_prefix("LST") {
            (ReportKind::Lost, rest)
        } else if let Some(rest) = raw.strip_prefix("FND") {
            (ReportKind::Found, rest)
        } else {
            return None;
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let value = digits.parse::<u64>().ok()?;
        Some((kind, value))
    }
}

impl std::fmt::Display for RefCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn prefix(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Lost => "LST",
        ReportKind::Found => "FND",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_prefixed_and_zero_padded() {
        assert_eq!(RefCode::new(ReportKind::Lost, 1).as_str(), "LST0001");
        assert_eq!(RefCode::new(ReportKind::Found, 123).as_str(), "FND0123");
        assert_eq!(RefCode::new(ReportKind::Found, 9999).as_str(), "FND9999");
    }

    #[test]
    fn field_widens_past_four_digits() {
        assert_eq!(RefCode::new(ReportKind::Lost, 10000).as_str(), "LST10000");
        assert_eq!(RefCode::new(ReportKind::Found, 123456).as_str(), "FND123456");
    }

    #[test]
    fn parse_accepts_known_prefixes() {
        assert_eq!(RefCode::parse("LST0007"), Some((ReportKind::Lost, 7)));
        assert_eq!(RefCode::parse("fnd0123"), Some((ReportKind::Found, 123)));
        assert_eq!(RefCode::parse(" LST10000 "), Some((ReportKind::Lost, 10000)));
    }

    #[test]
    fn parse_rejects_malformed_codes() {
        assert_eq!(RefCode::parse("XYZ0001"), None);
        assert_eq!(RefCode::parse("LST"), None);
        assert_eq!(RefCode::parse("LST00a1"), None);
        assert_eq!(RefCode::parse(""), None);
    }
}
