use chrono::{Datelike, NaiveDate};
use regex::Regex;

const EXPIRATION_PATTERN: &str =
    r"(?i)(?:Expiration|Expiry|Expires)\s*(?:Date)?\s*:?\s*(?P<date>[A-Za-z0-9,\-/ ]{6,30})";

/// Month-first for ambiguous numeric dates.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m/%d/%y",
    "%m-%d-%y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%d-%b-%Y",
];

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2999;

pub struct ExpirationMatcher {
    regex: Option<Regex>,
}

impl ExpirationMatcher {
    pub fn new() -> Self {
        Self {
            regex: Regex::new(EXPIRATION_PATTERN).ok(),
        }
    }

    /// The free-text fragment after the first expiration label.
    pub fn find_fragment<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .as_ref()
            .and_then(|regex| regex.captures(text))
            .and_then(|caps| caps.name("date"))
            .map(|m| m.as_str())
    }

    pub fn find_expiration(&self, text: &str) -> Option<NaiveDate> {
        let fragment = self.find_fragment(text)?;
        let parsed = parse_fuzzy_date(fragment);
        if parsed.is_none() {
            tracing::debug!(fragment, "Expiration fragment is not a date");
        }
        parsed
    }
}

impl Default for ExpirationMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds a date inside free text, skipping words around it.
///
/// Token windows are tried from the earliest start and, for each start,
/// from the longest span down, so the result is deterministic.
pub fn parse_fuzzy_date(fragment: &str) -> Option<NaiveDate> {
    let tokens: Vec<String> = fragment
        .split_whitespace()
        .map(strip_ordinal_suffix)
        .collect();

    for start in 0..tokens.len() {
        for end in (start + 1..=tokens.len()).rev() {
            let candidate = tokens[start..end].join(" ");
            let candidate = candidate.trim_matches(|c: char| c == ',' || c == '-' || c == '/');
            if let Some(date) = parse_exact(candidate) {
                return Some(date);
            }
        }
    }

    None
}

fn parse_exact(candidate: &str) -> Option<NaiveDate> {
    if candidate.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .filter_map(|format| NaiveDate::parse_from_str(candidate, format).ok())
        .find(|date| (MIN_YEAR..=MAX_YEAR).contains(&date.year()))
}

/// `3rd,` -> `3,`
fn strip_ordinal_suffix(token: &str) -> String {
    let (body, trailing_comma) = match token.strip_suffix(',') {
        Some(body) => (body, ","),
        None => (token, ""),
    };

    let lower = body.to_ascii_lowercase();
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(digits) = lower.strip_suffix(suffix) {
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                return format!("{}{}", digits, trailing_comma);
            }
        }
    }

    token.to_string()
}
