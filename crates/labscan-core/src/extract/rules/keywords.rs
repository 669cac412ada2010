//! High-confidence manual rules keyed on hematology test names.

use crate::extract::observer::{Candidate, ExtractionObserver};
use crate::models::parameter::HealthParameter;

use super::patterns::{INLINE_RANGE, NUMBER};
use super::status::status_for;
use super::LineExtractor;

/// Substrings a line must contain for a rule to fire.
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Every substring must be present.
    All(&'static [&'static str]),
    /// At least one substring must be present.
    Any(&'static [&'static str]),
}

impl Trigger {
    /// Case-sensitive test against the line as given.
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::All(needles) => needles.iter().all(|n| line.contains(n)),
            Self::Any(needles) => needles.iter().any(|n| line.contains(n)),
        }
    }
}

/// Where a rule takes its reference range from.
#[derive(Debug, Clone, Copy)]
pub enum RangePolicy {
    /// First range on the line, else the given default.
    FromLineOr(&'static str),
    /// Always this range, whatever the line says.
    Fixed(&'static str),
}

impl RangePolicy {
    fn resolve(&self, line: &str) -> String {
        match self {
            Self::FromLineOr(default) => INLINE_RANGE
                .captures(line)
                .map(|caps| caps[1].to_string())
                .unwrap_or_else(|| (*default).to_string()),
            Self::Fixed(range) => (*range).to_string(),
        }
    }
}

/// One row of the manual rule table.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub label: &'static str,
    pub trigger: Trigger,
    pub name: &'static str,
    pub unit: &'static str,
    pub range: RangePolicy,
}

/// The manual rule table, in evaluation order.
pub const MANUAL_RULES: &[KeywordRule] = &[
    KeywordRule {
        label: "manual:haemoglobin",
        trigger: Trigger::All(&["HAEMOGLOBIN"]),
        name: "Haemoglobin",
        unit: "g/dL",
        range: RangePolicy::FromLineOr("12.0-15.0"),
    },
    KeywordRule {
        label: "manual:rbc",
        trigger: Trigger::All(&["RED BLOOD", "COUNT"]),
        name: "Red Blood Cell Count",
        unit: "million/cumm",
        range: RangePolicy::FromLineOr("3.8-4.8"),
    },
    KeywordRule {
        label: "manual:pcv",
        trigger: Trigger::Any(&["PCV", "HEMATOCRIT"]),
        name: "PCV (Hematocrit)",
        unit: "%",
        range: RangePolicy::FromLineOr("36.0-46.0"),
    },
    KeywordRule {
        label: "manual:mcv",
        trigger: Trigger::All(&["MCV"]),
        name: "MCV (Mean Corpuscular Volume)",
        unit: "fL",
        range: RangePolicy::Fixed("80-100"),
    },
    KeywordRule {
        label: "manual:platelet",
        trigger: Trigger::All(&["PLATELET", "COUNT"]),
        name: "Platelet Count",
        unit: "thousand/cumm",
        range: RangePolicy::FromLineOr("150-450"),
    },
    KeywordRule {
        label: "manual:wbc",
        trigger: Trigger::All(&["TOTAL COUNT"]),
        name: "Total Count (WBC)",
        unit: "thousand/cumm",
        range: RangePolicy::FromLineOr("4.0-10.0"),
    },
];

impl KeywordRule {
    /// Apply the rule to a line, producing at most one parameter.
    pub fn apply(&self, line: &str) -> Option<HealthParameter> {
        if !self.trigger.matches(line) {
            return None;
        }

        let value = NUMBER.find(line)?.as_str().to_string();
        let range = self.range.resolve(line);
        let status = status_for(&value, Some(&range));

        Some(HealthParameter {
            name: self.name.to_string(),
            value,
            unit: Some(self.unit.to_string()),
            normal_range: Some(range),
            status,
        })
    }
}

impl LineExtractor for KeywordRule {
    fn label(&self) -> &str {
        self.label
    }

    fn extract_line(&self, line: &str, observer: &dyn ExtractionObserver) -> Vec<HealthParameter> {
        let Some(param) = self.apply(line) else {
            return Vec::new();
        };

        observer.candidate(
            self.label,
            &Candidate {
                name: param.name.clone(),
                value: param.value.clone(),
                unit: param.unit.clone(),
                range: param.normal_range.clone(),
            },
        );
        observer.accepted(self.label, &param);

        vec![param]
    }
}
