use regex::Regex;

/// A label that introduces a license code in certificate text.
#[derive(Debug, Clone, Copy)]
pub struct CodeLabel {
    pub label: &'static str,
    pub colon_optional: bool,
}

/// Tried in order; the first label found anywhere in the text wins.
pub const CODE_LABELS: &[CodeLabel] = &[
    CodeLabel {
        label: "Registration Code",
        colon_optional: false,
    },
    CodeLabel {
        label: "Contract Registration Code",
        colon_optional: false,
    },
    CodeLabel {
        label: "Activation Code",
        colon_optional: true,
    },
];

/// Five groups of five alphanumerics, as printed on FortiToken activation sheets.
const ACTIVATION_TOKEN_PATTERN: &str = r"[A-Z0-9]{5}(?:-[A-Z0-9]{5}){4}";

/// Only the label ignores case. A code is uppercase and must end at a
/// non-code character, so `Activation Code\nExpiration` yields nothing.
/// Without a colon the code has to follow on the same line.
fn label_pattern(label: &CodeLabel) -> String {
    let words: Vec<String> = label.label.split_whitespace().map(regex::escape).collect();
    let separator = if label.colon_optional {
        r"(?:[ \t]*:\s*|[ \t]+)"
    } else {
        r"\s*:\s*"
    };
    format!(
        r"(?i:{}){}(?P<code>[A-Z0-9-]+)(?:[^A-Za-z0-9-]|$)",
        words.join(r"\s+"),
        separator
    )
}

pub struct CodeMatcher {
    patterns: Vec<Regex>,
}

impl CodeMatcher {
    pub fn new() -> Self {
        Self::with_labels(CODE_LABELS)
    }

    pub fn with_labels(labels: &[CodeLabel]) -> Self {
        let patterns = labels
            .iter()
            .filter_map(|label| Regex::new(&label_pattern(label)).ok())
            .collect();

        Self { patterns }
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Returns the code following the highest-priority label present.
    pub fn find_code(&self, text: &str) -> Option<String> {
        self.patterns.iter().find_map(|regex| {
            regex
                .captures(text)
                .and_then(|caps| caps.name("code"))
                .map(|m| m.as_str().to_string())
        })
    }
}

impl Default for CodeMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds `XXXXX-XXXXX-XXXXX-XXXXX-XXXXX` codes in OCR output.
pub struct ActivationTokenMatcher {
    regex: Option<Regex>,
}

impl ActivationTokenMatcher {
    pub fn new() -> Self {
        Self {
            regex: Regex::new(ACTIVATION_TOKEN_PATTERN).ok(),
        }
    }

    pub fn find_token(&self, text: &str) -> Option<String> {
        let upper = text.to_uppercase();
        self.regex
            .as_ref()
            .and_then(|regex| regex.find(&upper))
            .map(|m| m.as_str().to_string())
    }
}

impl Default for ActivationTokenMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_label_patterns_compile() {
        assert_eq!(CodeMatcher::new().pattern_count(), CODE_LABELS.len());
    }

    #[test]
    fn test_registration_code() {
        let matcher = CodeMatcher::new();
        assert_eq!(
            matcher.find_code("Registration Code: ABC-123"),
            Some("ABC-123".to_string())
        );
    }

    #[test]
    fn test_whitespace_around_colon() {
        let matcher = CodeMatcher::new();
        for text in [
            "Registration Code:ABC-123",
            "Registration Code :ABC-123",
            "Registration Code   :   ABC-123",
            "Registration Code:\n  ABC-123",
        ] {
            assert_eq!(
                matcher.find_code(text),
                Some("ABC-123".to_string()),
                "text: {:?}",
                text
            );
        }
    }

    #[test]
    fn test_label_case_insensitive() {
        let matcher = CodeMatcher::new();
        assert_eq!(
            matcher.find_code("registration code: AB12-CD34"),
            Some("AB12-CD34".to_string())
        );
        assert_eq!(
            matcher.find_code("ACTIVATION CODE: 7F3K-22QX"),
            Some("7F3K-22QX".to_string())
        );
    }

    #[test]
    fn test_lowercase_code_rejected() {
        let matcher = CodeMatcher::new();
        assert_eq!(matcher.find_code("Registration Code: ab12-cd34"), None);
    }

    #[test]
    fn test_activation_label_followed_by_prose() {
        let matcher = CodeMatcher::new();
        for text in [
            "FortiToken Mobile\nActivation Code\nExpiration Date: 2026-12-01",
            "FortiToken\nActivation Code: see attached image",
            "FortiToken: your activation code is printed below",
            "Activation Code\nFTM",
            "Activation Code: Enter it in the app",
        ] {
            assert_eq!(matcher.find_code(text), None, "text: {:?}", text);
        }
    }

    #[test]
    fn test_code_ends_at_separator() {
        let matcher = CodeMatcher::new();
        assert_eq!(
            matcher.find_code("Registration Code: AB12-CD34, valid until 2026"),
            Some("AB12-CD34".to_string())
        );
        assert_eq!(
            matcher.find_code("Activation Code 7F3K-22QX\nFortiToken"),
            Some("7F3K-22QX".to_string())
        );
    }

    #[test]
    fn test_registration_beats_activation() {
        let matcher = CodeMatcher::new();
        let text = "Activation Code: YYYY-1111\nRegistration Code: XXXX-2222";
        assert_eq!(matcher.find_code(text), Some("XXXX-2222".to_string()));
    }

    #[test]
    fn test_contract_registration_code() {
        let matcher = CodeMatcher::new();
        assert_eq!(
            matcher.find_code("Contract Registration Code: FC-10-1234"),
            Some("FC-10-1234".to_string())
        );
    }

    #[test]
    fn test_activation_code_colon_optional() {
        let matcher = CodeMatcher::new();
        assert_eq!(
            matcher.find_code("Activation Code 7F3K-22QX"),
            Some("7F3K-22QX".to_string())
        );
        assert_eq!(
            matcher.find_code("Activation Code: 7F3K-22QX"),
            Some("7F3K-22QX".to_string())
        );
    }

    #[test]
    fn test_registration_requires_colon() {
        let matcher = CodeMatcher::new();
        assert_eq!(matcher.find_code("Registration Code ABC-123"), None);
    }

    #[test]
    fn test_no_label() {
        let matcher = CodeMatcher::new();
        assert_eq!(matcher.find_code("Nothing to see here"), None);
        assert_eq!(matcher.find_code(""), None);
    }

    #[test]
    fn test_custom_label_table() {
        let labels = [CodeLabel {
            label: "Serial Number",
            colon_optional: false,
        }];
        let matcher = CodeMatcher::with_labels(&labels);
        assert_eq!(
            matcher.find_code("Serial Number: FGT60F-001"),
            Some("FGT60F-001".to_string())
        );
        assert_eq!(matcher.find_code("Registration Code: ABC"), None);
    }

    #[test]
    fn test_activation_token() {
        let matcher = ActivationTokenMatcher::new();
        assert_eq!(
            matcher.find_token("Code: abcde-12345-fghij-67890-klmno"),
            Some("ABCDE-12345-FGHIJ-67890-KLMNO".to_string())
        );
    }

    #[test]
    fn test_activation_token_first_match_wins() {
        let matcher = ActivationTokenMatcher::new();
        let text = "AAAAA-AAAAA-AAAAA-AAAAA-AAAAA BBBBB-BBBBB-BBBBB-BBBBB-BBBBB";
        assert_eq!(
            matcher.find_token(text),
            Some("AAAAA-AAAAA-AAAAA-AAAAA-AAAAA".to_string())
        );
    }

    #[test]
    fn test_activation_token_wrong_shape() {
        let matcher = ActivationTokenMatcher::new();
        assert_eq!(matcher.find_token("ABCD-12345-FGHIJ-67890-KLMNO"), None);
        assert_eq!(matcher.find_token("ABCDE-12345-FGHIJ-67890"), None);
        assert_eq!(matcher.find_token("ABCDE 12345 FGHIJ 67890 KLMNO"), None);
    }
}
