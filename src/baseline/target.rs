//! Target Extractor
//!
//! Parses documented performance targets such as `"75%"`, `"<15%"`, `">70%"`
//! or `"3x ROI"` into an operator and a magnitude.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// `[op] number [unit]`, where unit is `%` or any trailing word(s) such as `x ROI`
static TARGET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?P<op><=?|>=?|≤|≥)?\s*(?P<num>[+-]?(?:\d+(?:\.\d*)?|\.\d+))\s*(?P<unit>[%A-Za-z][%A-Za-z ]*)?\s*$",
    )
    .expect("target pattern should compile")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetOperator {
    Exact,
    LessThan,
    GreaterThan,
}

impl TargetOperator {
    fn from_symbol(symbol: Option<&str>) -> Self {
        match symbol {
            Some(s) if s.starts_with('<') || s == "≤" => Self::LessThan,
            Some(s) if s.starts_with('>') || s == "≥" => Self::GreaterThan,
            _ => Self::Exact,
        }
    }
}

impl fmt::Display for TargetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact",
            Self::LessThan => "less_than",
            Self::GreaterThan => "greater_than",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParsedTarget {
    pub operator: TargetOperator,
    pub value: f64,
}

/// Outcome of target extraction. Failed parses collapse into `NoTarget`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    NoTarget,
    Parsed(ParsedTarget),
}

impl Target {
    pub fn parsed(&self) -> Option<&ParsedTarget> {
        match self {
            Self::Parsed(target) => Some(target),
            Self::NoTarget => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetParseError {
    #[error("target is empty")]
    Empty,

    #[error("target '{raw}' is not numeric")]
    NotNumeric { raw: String },
}

/// Parse a raw target string. Pure function of the input.
pub fn parse_target(raw: &str) -> Result<ParsedTarget, TargetParseError> {
    if raw.trim().is_empty() {
        return Err(TargetParseError::Empty);
    }

    let not_numeric = || TargetParseError::NotNumeric {
        raw: raw.to_string(),
    };

    let caps = TARGET_PATTERN.captures(raw).ok_or_else(not_numeric)?;
    let value: f64 = caps["num"].parse().map_err(|_| not_numeric())?;
    if !value.is_finite() {
        return Err(not_numeric());
    }

    Ok(ParsedTarget {
        operator: TargetOperator::from_symbol(caps.name("op").map(|m| m.as_str())),
        value,
    })
}

/// Extract a target, treating absence and parse failures as `NoTarget`.
///
/// Documented targets are advisory, so a malformed one only costs a warning.
pub fn extract_target(raw: Option<&str>, metric: &str) -> Target {
    let Some(raw) = raw else {
        return Target::NoTarget;
    };

    match parse_target(raw) {
        Ok(target) => Target::Parsed(target),
        Err(TargetParseError::Empty) => Target::NoTarget,
        Err(e) => {
            tracing::warn!("Ignoring documented target for {}: {}", metric, e);
            Target::NoTarget
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_percentage() {
        let target = parse_target("75%").unwrap();
        assert_eq!(target.operator, TargetOperator::Exact);
        assert_eq!(target.value, 75.0);
    }

    #[test]
    fn test_parse_operators() {
        let lt = parse_target("<15%").unwrap();
        assert_eq!(lt.operator, TargetOperator::LessThan);
        assert_eq!(lt.value, 15.0);

        let gt = parse_target(" > 70 % ").unwrap();
        assert_eq!(gt.operator, TargetOperator::GreaterThan);
        assert_eq!(gt.value, 70.0);

        assert_eq!(parse_target("<=2%").unwrap().operator, TargetOperator::LessThan);
        assert_eq!(parse_target("≥80%").unwrap().operator, TargetOperator::GreaterThan);
    }

    #[test]
    fn test_parse_unit_suffixes() {
        assert_eq!(parse_target("3x ROI").unwrap().value, 3.0);
        assert_eq!(parse_target("8% monthly").unwrap().value, 8.0);
        assert_eq!(parse_target("0.5").unwrap().value, 0.5);
        assert_eq!(parse_target("45 steps").unwrap().value, 45.0);
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(parse_target("   "), Err(TargetParseError::Empty));
        assert!(matches!(
            parse_target("high"),
            Err(TargetParseError::NotNumeric { .. })
        ));
        assert!(parse_target("<").is_err());
        assert!(parse_target("75-80%").is_err());
    }

    #[test]
    fn test_extract_degrades_to_no_target() {
        assert_eq!(extract_target(None, "fcr"), Target::NoTarget);
        assert_eq!(extract_target(Some("as high as possible"), "fcr"), Target::NoTarget);
        assert_eq!(extract_target(Some(""), "fcr"), Target::NoTarget);
        assert!(extract_target(Some("90%"), "fcr").parsed().is_some());
    }
}
