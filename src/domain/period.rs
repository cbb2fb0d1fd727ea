use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named reporting windows understood by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    ThisQuarter,
    LastQuarter,
    ThisYear,
    LastYear,
}

impl Period {
    pub const ALL: [Period; 10] = [
        Period::Today,
        Period::Yesterday,
        Period::ThisWeek,
        Period::LastWeek,
        Period::ThisMonth,
        Period::LastMonth,
        Period::ThisQuarter,
        Period::LastQuarter,
        Period::ThisYear,
        Period::LastYear,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Yesterday => "yesterday",
            Period::ThisWeek => "this_week",
            Period::LastWeek => "last_week",
            Period::ThisMonth => "this_month",
            Period::LastMonth => "last_month",
            Period::ThisQuarter => "this_quarter",
            Period::LastQuarter => "last_quarter",
            Period::ThisYear => "this_year",
            Period::LastYear => "last_year",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            Period::Today => "Today",
            Period::Yesterday => "Yesterday",
            Period::ThisWeek => "This Week",
            Period::LastWeek => "Last Week",
            Period::ThisMonth => "This Month",
            Period::LastMonth => "Last Month",
            Period::ThisQuarter => "This Quarter",
            Period::LastQuarter => "Last Quarter",
            Period::ThisYear => "This Year",
            Period::LastYear => "Last Year",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown period: {0}")]
pub struct UnknownPeriod(pub String);

impl FromStr for Period {
    type Err = UnknownPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .iter()
            .copied()
            .find(|p| p.key() == s)
            .ok_or_else(|| UnknownPeriod(s.to_string()))
    }
}

/// The table of periods a resolver treats as symbolic, with their labels.
///
/// Starts from all ten periods; callers narrow or relabel it and hand the
/// result to the resolver explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct PredefinedPeriods {
    entries: Vec<(Period, String)>,
}

impl PredefinedPeriods {
    pub fn new() -> Self {
        Self {
            entries: Period::ALL
                .iter()
                .map(|p| (*p, p.default_label().to_string()))
                .collect(),
        }
    }

    /// Replace the label for a period, re-enabling it if it was removed
    pub fn with_label(mut self, period: Period, label: impl Into<String>) -> Self {
        let label = label.into();
        match self.entries.iter_mut().find(|(p, _)| *p == period) {
            Some(entry) => entry.1 = label,
            None => {
                self.entries.push((period, label));
                self.entries.sort_by_key(|(p, _)| Self::position(*p));
            }
        }
        self
    }

    /// Stop treating a period's key as symbolic
    pub fn without(mut self, period: Period) -> Self {
        self.entries.retain(|(p, _)| *p != period);
        self
    }

    pub fn contains(&self, period: Period) -> bool {
        self.entries.iter().any(|(p, _)| *p == period)
    }

    pub fn lookup(&self, key: &str) -> Option<Period> {
        self.entries
            .iter()
            .map(|(p, _)| *p)
            .find(|p| p.key() == key)
    }

    pub fn label(&self, period: Period) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| *p == period)
            .map(|(_, label)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Period, &str)> {
        self.entries.iter().map(|(p, label)| (*p, label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(period: Period) -> usize {
        Period::ALL
            .iter()
            .position(|p| *p == period)
            .unwrap_or(Period::ALL.len())
    }
}

impl Default for PredefinedPeriods {
    fn default() -> Self {
        Self::new()
    }
}
