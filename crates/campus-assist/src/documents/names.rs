use std::sync::OnceLock;

use regex::Regex;

use super::text::normalize_letters;

/// Common document vocabulary that should never count as a personal name.
const STOPLIST: &[&str] = &[
    "THE",
    "AND",
    "FOR",
    "WITH",
    "FROM",
    "DATE",
    "NUMBER",
    "CODE",
    "DOCUMENT",
    "CERTIFICATE",
    "BANK",
    "STATEMENT",
    "ACCOUNT",
    "BALANCE",
    "AMOUNT",
    "TOTAL",
    "PERIOD",
    "MONTH",
    "YEAR",
    "DAY",
    "SERVICES",
    "COMPANY",
    "LIMITED",
    "PAYSLIP",
    "EMPLOYEE",
    "DEPARTMENT",
    "FREQUENCY",
    "PAYMENT",
];

/// At most this many candidates are reported back to the caller.
pub const MAX_CANDIDATES: usize = 5;

fn title_case_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("valid title-case pattern")
    })
}

fn upper_case_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Z]{2,}(?:\s+[A-Z]{2,})*\b").expect("valid upper-case pattern")
    })
}

/// Scan OCR text for runs of capitalized words that could be personal names.
///
/// Both Title Case runs ("John Smith") and ALL-CAPS runs ("JOHN SMITH") are
/// collected; candidates containing stoplisted or single-letter words are
/// discarded.
pub fn extract_candidates(text: &str) -> Vec<String> {
    let mut raw: Vec<&str> = Vec::new();
    raw.extend(title_case_runs().find_iter(text).map(|m| m.as_str()));
    raw.extend(upper_case_runs().find_iter(text).map(|m| m.as_str()));

    let mut kept = Vec::new();
    for candidate in raw {
        let cleaned = normalize_letters(candidate);
        if cleaned.is_empty() {
            continue;
        }

        let plausible = cleaned.split_whitespace().all(|word| {
            let upper = word.to_ascii_uppercase();
            word.len() >= 2 && !STOPLIST.contains(&upper.as_str())
        });

        if plausible {
            kept.push(cleaned);
            if kept.len() == MAX_CANDIDATES {
                break;
            }
        }
    }

    kept
}
