//! Relevance filter for names recovered by the generic patterns.

/// Substrings that mark a name as a health parameter.
pub const HEALTH_KEYWORDS: &[&str] = &[
    "haemoglobin", "hemoglobin", "hb", "count", "platelet", "wbc", "rbc",
    "hematocrit", "pcv", "mcv", "mch", "mchc", "neutrophil", "lymphocyte",
    "monocyte", "eosinophil", "basophil", "glucose", "cholesterol", "hdl",
    "ldl", "triglycerides", "creatinine", "urea", "bun", "sodium", "potassium",
    "chloride", "tsh", "vitamin", "iron", "calcium", "blood", "sugar",
    "pressure", "level", "serum", "plasma", "volume",
];

/// Whether `name` plausibly names a health parameter.
///
/// Accepts a keyword hit, or any name longer than two characters. The
/// length fallback favours recall; almost every real name passes it.
pub fn is_health_parameter(name: &str) -> bool {
    let lower = name.to_lowercase();
    HEALTH_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
        || lower.trim().chars().count() > 2
}
