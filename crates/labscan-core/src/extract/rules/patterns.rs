//! Common regex patterns for lab report extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // First numeric token on a line (a lone "." never counts)
    pub static ref NUMBER: Regex = Regex::new(
        r"\d*\.?\d+"
    ).unwrap();

    // Leading numeric part of a value that may carry OCR noise ("13.5.")
    pub static ref NUMERIC_PREFIX: Regex = Regex::new(
        r"^\d*\.?\d+"
    ).unwrap();

    // In-line reference range: "12.0-15.0", "150 - 450"
    pub static ref INLINE_RANGE: Regex = Regex::new(
        r"([0-9.\-]+\s*-\s*[0-9.]+)"
    ).unwrap();

    // Range string shapes, searched in this order
    pub static ref RANGE_BETWEEN: Regex = Regex::new(
        r"([0-9.]+)\s*-\s*([0-9.]+)"
    ).unwrap();

    pub static ref RANGE_BELOW: Regex = Regex::new(
        r"<\s*([0-9.]+)"
    ).unwrap();

    pub static ref RANGE_ABOVE: Regex = Regex::new(
        r">\s*([0-9.]+)"
    ).unwrap();

    // Name ending in a hematology keyword, value, unit, then "(range)" or "a - b"
    pub static ref KEYWORD_VALUE_RANGE: Regex = Regex::new(
        r"(?i)([A-Za-z\s()]+(?:COUNT|VOLUME|CONCENTRATION|HAEMOGLOBIN|HEMATOCRIT|MCV|MCH|MCHC|PLATELET))\s*([0-9.]+)\s*([a-zA-Z/%]+)?\s*(?:\(([^)]+)\)|([0-9.\-]+\s*-\s*[0-9.]+))"
    ).unwrap();

    // "TEST NAME ... Result Unit Reference"
    pub static ref RESULT_REFERENCE: Regex = Regex::new(
        r"(?i)([A-Za-z\s()]+(?:HAEMOGLOBIN|COUNT|VOLUME|HEMATOCRIT|MCV|MCH|MCHC|PLATELET))[^0-9]*([0-9.]+)\s*([a-zA-Z/%]*)\s*([0-9.\-]+\s*-\s*[0-9.]+|\([^)]+\))"
    ).unwrap();

    // "Parameter: value unit"
    pub static ref KEY_VALUE: Regex = Regex::new(
        r"(?i)([A-Za-z\s]{4,}):\s*([0-9.]+)\s*([A-Za-z/%]+)?"
    ).unwrap();

    // Whitespace-separated table row
    pub static ref TABLE_ROW: Regex = Regex::new(
        r"(?i)([A-Za-z\s()]{4,}(?:HAEMOGLOBIN|COUNT|VOLUME|HEMATOCRIT|MCV|MCH|MCHC|PLATELET))\s+([0-9.]+)\s+([a-zA-Z/%]*)\s+([0-9.\-]+\s*-\s*[0-9.]+)"
    ).unwrap();

    // Anchored on the complete blood count test names
    pub static ref CBC_ROW: Regex = Regex::new(
        r"(?i)(HAEMOGLOBIN|RED BLOOD.*COUNT|PCV|HEMATOCRIT|MCV|MCH|MCHC|PLATELET.*COUNT|TOTAL COUNT)\s*(?:\([^)]*\))?\s*([0-9.]+)\s*([a-zA-Z/%]*)\s*([0-9.\-]+\s*-\s*[0-9.]+|\([^)]+\))"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_skips_lone_dot() {
        let m = NUMBER.find("Dr. Smith 13.5").unwrap();
        assert_eq!(m.as_str(), "13.5");
        assert!(NUMBER.find("no digits here.").is_none());
    }

    #[test]
    fn test_inline_range() {
        let caps = INLINE_RANGE.captures("HAEMOGLOBIN 13.5 g/dL (12.0 - 15.0)").unwrap();
        assert_eq!(&caps[1], "12.0 - 15.0");
    }

    #[test]
    fn test_key_value_needs_four_letters() {
        assert!(KEY_VALUE.is_match("Glucose: 95 mg/dL"));
        assert!(!KEY_VALUE.is_match("Hb: 13"));
    }

    #[test]
    fn test_cbc_row_skips_parenthesized_aside() {
        let caps = CBC_ROW.captures("PCV (Packed Cell Volume) 41.2 % 36-46").unwrap();
        assert_eq!(&caps[1], "PCV");
        assert_eq!(&caps[2], "41.2");
        assert_eq!(&caps[3], "%");
        assert_eq!(&caps[4], "36-46");
    }
}
