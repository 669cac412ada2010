//! Generic extraction patterns for varied report layouts.
//!
//! Each pattern captures the name in group 1, the value in group 2 and an
//! optional unit in group 3. The range sits in group 4, or in group 5 for
//! the pattern that splits parenthesized and bare ranges.

use regex::Regex;

use crate::extract::lines::title_case;
use crate::extract::observer::{Candidate, ExtractionObserver};
use crate::models::parameter::HealthParameter;

use super::patterns::{CBC_ROW, KEYWORD_VALUE_RANGE, KEY_VALUE, RESULT_REFERENCE, TABLE_ROW};
use super::relevance::is_health_parameter;
use super::status::status_for;
use super::LineExtractor;

/// A regex-backed matcher with the shared capture-group contract.
pub struct GenericPattern {
    pub label: &'static str,
    pub regex: &'static Regex,
    /// Groups tried in order for the range; the first non-empty one wins.
    pub range_groups: &'static [usize],
}

lazy_static::lazy_static! {
    /// The generic cascade, in evaluation order.
    pub static ref GENERIC_PATTERNS: [GenericPattern; 5] = [
        GenericPattern {
            label: "pattern:keyword-value-range",
            regex: &KEYWORD_VALUE_RANGE,
            range_groups: &[4, 5],
        },
        GenericPattern {
            label: "pattern:result-reference",
            regex: &RESULT_REFERENCE,
            range_groups: &[4],
        },
        GenericPattern {
            label: "pattern:key-value",
            regex: &KEY_VALUE,
            range_groups: &[4],
        },
        GenericPattern {
            label: "pattern:table-row",
            regex: &TABLE_ROW,
            range_groups: &[4],
        },
        GenericPattern {
            label: "pattern:cbc-row",
            regex: &CBC_ROW,
            range_groups: &[4],
        },
    ];
}

fn non_empty(s: Option<regex::Match<'_>>) -> Option<String> {
    s.map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl GenericPattern {
    /// Every raw match on the line, trimmed.
    pub fn candidates(&self, line: &str) -> Vec<Candidate> {
        self.regex
            .captures_iter(line)
            .map(|caps| Candidate {
                name: caps.get(1).map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
                value: caps.get(2).map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
                unit: non_empty(caps.get(3)),
                range: self
                    .range_groups
                    .iter()
                    .find_map(|&group| non_empty(caps.get(group))),
            })
            .collect()
    }
}

impl LineExtractor for GenericPattern {
    fn label(&self) -> &str {
        self.label
    }

    fn extract_line(&self, line: &str, observer: &dyn ExtractionObserver) -> Vec<HealthParameter> {
        let mut results = Vec::new();

        for candidate in self.candidates(line) {
            observer.candidate(self.label, &candidate);

            if candidate.name.is_empty() || candidate.value.is_empty() {
                continue;
            }

            let relevant = is_health_parameter(&candidate.name);
            observer.relevance(&candidate.name, relevant);
            if !relevant {
                continue;
            }

            let status = status_for(&candidate.value, candidate.range.as_deref());
            let param = HealthParameter {
                name: title_case(&candidate.name),
                value: candidate.value,
                unit: candidate.unit,
                normal_range: candidate.range,
                status,
            };

            observer.accepted(self.label, &param);
            results.push(param);
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::observer::NoopObserver;
    use crate::models::parameter::Status;
    use pretty_assertions::assert_eq;

    fn pattern(label: &str) -> &'static GenericPattern {
        GENERIC_PATTERNS.iter().find(|p| p.label == label).unwrap()
    }

    #[test]
    fn test_parenthesized_range_uses_inner_text() {
        let params = pattern("pattern:keyword-value-range")
            .extract_line("PLATELET COUNT 250 thousand/cumm (150-450)", &NoopObserver);

        assert_eq!(
            params,
            vec![HealthParameter {
                name: "Platelet Count".to_string(),
                value: "250".to_string(),
                unit: Some("thousand/cumm".to_string()),
                normal_range: Some("150-450".to_string()),
                status: Some(Status::Normal),
            }]
        );
    }

    #[test]
    fn test_bare_range_falls_back_to_fifth_group() {
        let params = pattern("pattern:keyword-value-range")
            .extract_line("Mean Corpuscular Volume 72 fL 80 - 100", &NoopObserver);

        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "Mean Corpuscular Volume");
        assert_eq!(params[0].normal_range.as_deref(), Some("80 - 100"));
        assert_eq!(params[0].status, Some(Status::Low));
    }

    #[test]
    fn test_result_reference_keeps_parentheses() {
        let params = pattern("pattern:result-reference")
            .extract_line("Total HAEMOGLOBIN 16.2 g/dL (12.0-15.0)", &NoopObserver);

        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "Total Haemoglobin");
        assert_eq!(params[0].normal_range.as_deref(), Some("(12.0-15.0)"));
        assert_eq!(params[0].status, Some(Status::High));
    }

    #[test]
    fn test_key_value_without_range() {
        let params = pattern("pattern:key-value")
            .extract_line("Fasting Glucose: 95 mg/dL", &NoopObserver);

        assert_eq!(
            params,
            vec![HealthParameter {
                name: "Fasting Glucose".to_string(),
                value: "95".to_string(),
                unit: Some("mg/dL".to_string()),
                normal_range: None,
                status: None,
            }]
        );
    }

    #[test]
    fn test_key_value_matches_more_than_once_per_line() {
        let params = pattern("pattern:key-value")
            .extract_line("Sodium: 140 mmol   Potassium: 4.1 mmol", &NoopObserver);

        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Sodium", "Potassium"]);
    }

    #[test]
    fn test_empty_unit_is_absent() {
        let params = pattern("pattern:table-row")
            .extract_line("TOTAL COUNT  7500  4000-11000", &NoopObserver);

        assert_eq!(params.len(), 1);
        assert_eq!(params[0].unit, None);
        assert_eq!(params[0].status, Some(Status::Normal));
    }

    #[test]
    fn test_noisy_value_classified_by_leading_number() {
        let params = pattern("pattern:table-row")
            .extract_line("PLATELET COUNT  1.2.3  lakh  1.5-4.5", &NoopObserver);

        assert_eq!(params.len(), 1);
        assert_eq!(params[0].value, "1.2.3");
        assert_eq!(params[0].normal_range.as_deref(), Some("1.5-4.5"));
        assert_eq!(params[0].status, Some(Status::Low));
    }

    #[test]
    fn test_name_needs_text_before_keyword() {
        // Keyword-suffixed names need at least one leading character.
        let line = "HAEMOGLOBIN 16.2 g/dL (12.0-15.0)";
        assert!(pattern("pattern:keyword-value-range").extract_line(line, &NoopObserver).is_empty());
        assert!(pattern("pattern:result-reference").extract_line(line, &NoopObserver).is_empty());
        assert_eq!(pattern("pattern:cbc-row").extract_line(line, &NoopObserver).len(), 1);
    }

    #[test]
    fn test_no_match_yields_nothing() {
        for pattern in GENERIC_PATTERNS.iter() {
            assert!(pattern.extract_line("Patient name John", &NoopObserver).is_empty());
        }
    }
}
