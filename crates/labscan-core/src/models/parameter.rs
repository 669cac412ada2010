//! Health parameter data model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::extract::rules::patterns::{RANGE_ABOVE, RANGE_BELOW, RANGE_BETWEEN};

/// One lab value recovered from report text.
///
/// Serializes to the `{name, value, unit?, normalRange?, status?}` shape the
/// web front end and the report history consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthParameter {
    /// Parameter label, e.g. "Haemoglobin".
    pub name: String,

    /// Numeric text exactly as found in the report.
    pub value: String,

    /// Unit of measurement (g/dL, %, fL, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Reference range as printed: `min-max`, `<threshold` or `>threshold`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_range: Option<String>,

    /// Classification of `value` against `normal_range`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl HealthParameter {
    /// True when the value lies outside its reference range.
    pub fn is_abnormal(&self) -> bool {
        self.status.is_some_and(Status::is_abnormal)
    }
}

/// Value status relative to its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Normal,
    High,
    Low,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::High => "high",
            Self::Low => "low",
        }
    }

    pub fn is_abnormal(self) -> bool {
        matches!(self, Self::High | Self::Low)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// A parsed reference range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReferenceRange {
    /// Closed interval `min-max`; both ends count as normal.
    Between { min: f64, max: f64 },
    /// `<threshold`: values strictly below are normal.
    Below(f64),
    /// `>threshold`: values strictly above are normal.
    Above(f64),
}

impl ReferenceRange {
    /// Parse a range string.
    ///
    /// The shapes are searched for anywhere in the string, `min-max` first,
    /// so `"(12.0-15.0)"` and `"< 200 mg/dL"` both parse. Returns `None` when
    /// no shape is present or the numbers in the first matching shape do not
    /// parse.
    pub fn parse(range: &str) -> Option<Self> {
        if let Some(caps) = RANGE_BETWEEN.captures(range) {
            let min = parse_finite(&caps[1])?;
            let max = parse_finite(&caps[2])?;
            return Some(Self::Between { min, max });
        }

        if let Some(caps) = RANGE_BELOW.captures(range) {
            return parse_finite(&caps[1]).map(Self::Below);
        }

        if let Some(caps) = RANGE_ABOVE.captures(range) {
            return parse_finite(&caps[1]).map(Self::Above);
        }

        None
    }

    /// Classify a value against this range. Non-finite values have no status.
    pub fn classify(&self, value: f64) -> Option<Status> {
        if !value.is_finite() {
            return None;
        }

        let status = match *self {
            Self::Between { min, max } => {
                if value < min {
                    Status::Low
                } else if value > max {
                    Status::High
                } else {
                    Status::Normal
                }
            }
            Self::Below(threshold) => {
                if value < threshold {
                    Status::Normal
                } else {
                    Status::High
                }
            }
            Self::Above(threshold) => {
                if value > threshold {
                    Status::Normal
                } else {
                    Status::Low
                }
            }
        };

        Some(status)
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Tally of statuses across a set of parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub normal: usize,
    pub high: usize,
    pub low: usize,
    /// Parameters without a status (no recoverable range).
    pub unknown: usize,
}

impl StatusCounts {
    pub fn from_parameters(parameters: &[HealthParameter]) -> Self {
        parameters
            .iter()
            .fold(Self::default(), |mut counts, param| {
                match param.status {
                    Some(Status::Normal) => counts.normal += 1,
                    Some(Status::High) => counts.high += 1,
                    Some(Status::Low) => counts.low += 1,
                    None => counts.unknown += 1,
                }
                counts
            })
    }

    /// High plus low.
    pub fn abnormal(&self) -> usize {
        self.high + self.low
    }

    pub fn total(&self) -> usize {
        self.normal + self.high + self.low + self.unknown
    }
}
