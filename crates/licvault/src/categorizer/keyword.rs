use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Product family a license certificate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Keyword {
    Fgt,
    Fac,
    Ftm,
    Fic,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Fgt => "FGT",
            Keyword::Fac => "FAC",
            Keyword::Ftm => "FTM",
            Keyword::Fic => "FIC",
        }
    }

    /// FortiToken certificates often carry the activation code only as an image.
    pub fn requires_ocr_fallback(&self) -> bool {
        matches!(self, Keyword::Ftm)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Keyword {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FGT" => Ok(Keyword::Fgt),
            "FAC" => Ok(Keyword::Fac),
            "FTM" => Ok(Keyword::Ftm),
            "FIC" => Ok(Keyword::Fic),
            other => Err(format!("Unknown keyword: {}", other)),
        }
    }
}

pub struct KeywordRule {
    pub keyword: Keyword,
    /// Uppercase substrings.
    pub aliases: &'static [&'static str],
}

/// Checked in order; the first category with any alias present wins,
/// so a FortiGate certificate that mentions FTM stays FGT.
pub const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        keyword: Keyword::Fgt,
        aliases: &["FORTIGATE", "FGT"],
    },
    KeywordRule {
        keyword: Keyword::Fac,
        aliases: &["FORTIAUTHENTICATOR", "FAC"],
    },
    KeywordRule {
        keyword: Keyword::Ftm,
        aliases: &["FORTITOKEN", "FORTITOKENS", "FTM"],
    },
    KeywordRule {
        keyword: Keyword::Fic,
        aliases: &["FORTIIDENTITY CLOUD", "FORTIIDENTITYCLOUD", "FIC"],
    },
];

pub struct KeywordCategorizer {
    rules: &'static [KeywordRule],
}

impl KeywordCategorizer {
    pub fn new() -> Self {
        Self {
            rules: KEYWORD_RULES,
        }
    }

    pub fn categorize(&self, text: &str) -> Option<Keyword> {
        let upper = text.to_uppercase();

        self.rules
            .iter()
            .find(|rule| rule.aliases.iter().any(|alias| upper.contains(alias)))
            .map(|rule| rule.keyword)
    }
}

impl Default for KeywordCategorizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_category_by_full_name() {
        let categorizer = KeywordCategorizer::new();
        assert_eq!(categorizer.categorize("FortiGate 60F"), Some(Keyword::Fgt));
        assert_eq!(
            categorizer.categorize("FortiAuthenticator VM"),
            Some(Keyword::Fac)
        );
        assert_eq!(categorizer.categorize("FortiToken Mobile"), Some(Keyword::Ftm));
        assert_eq!(
            categorizer.categorize("FortiIdentity Cloud subscription"),
            Some(Keyword::Fic)
        );
    }

    #[test]
    fn test_short_aliases() {
        let categorizer = KeywordCategorizer::new();
        assert_eq!(categorizer.categorize("SKU FGT-60F"), Some(Keyword::Fgt));
        assert_eq!(categorizer.categorize("SKU FAC-VM"), Some(Keyword::Fac));
        assert_eq!(categorizer.categorize("SKU FTM-ELIC-10"), Some(Keyword::Ftm));
        assert_eq!(categorizer.categorize("SKU FIC-100"), Some(Keyword::Fic));
    }

    #[test]
    fn test_case_insensitive() {
        let categorizer = KeywordCategorizer::new();
        assert_eq!(categorizer.categorize("fortitokens"), Some(Keyword::Ftm));
        assert_eq!(
            categorizer.categorize("fortiidentitycloud"),
            Some(Keyword::Fic)
        );
    }

    #[test]
    fn test_table_order_breaks_ties() {
        let categorizer = KeywordCategorizer::new();
        assert_eq!(
            categorizer.categorize("FortiToken licenses for FortiGate"),
            Some(Keyword::Fgt)
        );
        assert_eq!(
            categorizer.categorize("FortiGate with FTM tokens"),
            Some(Keyword::Fgt)
        );
        assert_eq!(
            categorizer.categorize("FortiToken for FortiAuthenticator"),
            Some(Keyword::Fac)
        );
    }

    #[test]
    fn test_no_keyword() {
        let categorizer = KeywordCategorizer::new();
        assert_eq!(categorizer.categorize("Generic license"), None);
        assert_eq!(categorizer.categorize(""), None);
    }

    #[test]
    fn test_only_ftm_requires_ocr() {
        assert!(Keyword::Ftm.requires_ocr_fallback());
        assert!(!Keyword::Fgt.requires_ocr_fallback());
        assert!(!Keyword::Fac.requires_ocr_fallback());
        assert!(!Keyword::Fic.requires_ocr_fallback());
    }

    #[test]
    fn test_keyword_serde_and_parse() {
        assert_eq!(serde_json::to_string(&Keyword::Ftm).unwrap(), "\"FTM\"");
        assert_eq!(
            serde_json::from_str::<Keyword>("\"FIC\"").unwrap(),
            Keyword::Fic
        );
        assert_eq!("fac".parse::<Keyword>().unwrap(), Keyword::Fac);
        assert!("XYZ".parse::<Keyword>().is_err());
        assert_eq!(Keyword::Fgt.to_string(), "FGT");
    }
}
