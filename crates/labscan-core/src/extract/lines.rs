//! Line splitting and name normalization.

/// Split raw text into its non-blank lines, in order.
///
/// Only whitespace-only lines are dropped; kept lines are returned verbatim,
/// including leading/trailing whitespace and any `\r` from CRLF input.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Title-case a name: lowercase everything, then capitalize each word
/// character that starts a word.
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_is_word = false;

    for c in name.chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            result.extend(c.to_uppercase());
        } else {
            result.extend(c.to_lowercase());
        }
        prev_is_word = is_word;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_drops_blank_lines_only() {
        let text = "HAEMOGLOBIN 13.5\n\n   \n  MCV 90 fL  \r\nlast";
        assert_eq!(
            split_lines(text),
            vec!["HAEMOGLOBIN 13.5", "  MCV 90 fL  \r", "last"]
        );
    }

    #[test]
    fn test_split_empty() {
        assert!(split_lines("").is_empty());
        assert!(split_lines("\n\n \t\n").is_empty());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("HAEMOGLOBIN"), "Haemoglobin");
        assert_eq!(title_case("RED BLOOD CELL COUNT"), "Red Blood Cell Count");
        assert_eq!(title_case("pcv (hematocrit)"), "Pcv (Hematocrit)");
        assert_eq!(title_case("mean  CORPUSCULAR"), "Mean  Corpuscular");
    }
}
