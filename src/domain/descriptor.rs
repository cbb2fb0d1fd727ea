use crate::domain::Period;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// What a caller hands the resolver for one side of a range.
///
/// Deserializing never produces `Named`: strings arrive as `Text` so period
/// keys go through the resolver's `PredefinedPeriods` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PeriodDescriptor {
    Named(Period),
    /// Unix seconds, used as-is
    Timestamp(i64),
    /// A period key or any date string the parser understands
    Text(String),
}

impl PeriodDescriptor {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl<'de> Deserialize<'de> for PeriodDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Timestamp(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Timestamp(ts) => Self::Timestamp(ts),
            Raw::Text(text) => Self::Text(text),
        })
    }
}

impl Default for PeriodDescriptor {
    fn default() -> Self {
        Self::Named(Period::ThisMonth)
    }
}

impl fmt::Display for PeriodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(period) => write!(f, "{period}"),
            Self::Timestamp(ts) => write!(f, "{ts}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<Period> for PeriodDescriptor {
    fn from(period: Period) -> Self {
        Self::Named(period)
    }
}

impl From<i64> for PeriodDescriptor {
    fn from(timestamp: i64) -> Self {
        Self::Timestamp(timestamp)
    }
}

impl From<&str> for PeriodDescriptor {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for PeriodDescriptor {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(
            PeriodDescriptor::from(Period::LastYear),
            PeriodDescriptor::Named(Period::LastYear)
        );
        assert_eq!(
            PeriodDescriptor::from(1_700_000_000),
            PeriodDescriptor::Timestamp(1_700_000_000)
        );
        assert_eq!(
            PeriodDescriptor::from("August 3, 2013"),
            PeriodDescriptor::Text("August 3, 2013".to_string())
        );
    }

    #[test]
    fn blank_detection() {
        assert!(PeriodDescriptor::text("   ").is_blank());
        assert!(!PeriodDescriptor::text("today").is_blank());
        assert!(!PeriodDescriptor::Timestamp(0).is_blank());
    }

    #[test]
    fn named_serializes_as_its_key() {
        let json = serde_json::to_string(&PeriodDescriptor::Named(Period::LastQuarter)).unwrap();
        assert_eq!(json, "\"last_quarter\"");
    }

    #[test]
    fn untagged_deserialization() {
        let values: Vec<PeriodDescriptor> =
            serde_json::from_str(r#"["this_month", 1700000000, "2024-02-01"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                PeriodDescriptor::text("this_month"),
                PeriodDescriptor::Timestamp(1_700_000_000),
                PeriodDescriptor::Text("2024-02-01".to_string()),
            ]
        );
    }
}
