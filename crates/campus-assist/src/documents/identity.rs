use super::names::extract_candidates;
use super::text::normalize_letters;

/// Outcome of matching a claimed name against OCR text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityMatch {
    pub verified: bool,
    pub found_names: Vec<String>,
}

/// Decide whether the claimed name is evidenced by the extracted text.
///
/// A part counts as evidenced when it appears (case-insensitively) inside any
/// name candidate OR as a substring of the normalized full text. Names with
/// two or more parts need evidence for both the first and the last part; the
/// whole normalized name appearing verbatim short-circuits the per-part
/// check.
pub fn verify_claimed_name(ocr_text: &str, claimed_name: &str) -> IdentityMatch {
    let candidates = extract_candidates(ocr_text);
    let claimed = normalize_letters(claimed_name).to_lowercase();
    let text = normalize_letters(ocr_text).to_lowercase();

    let parts: Vec<&str> = claimed.split_whitespace().collect();
    let verified = if parts.is_empty() {
        false
    } else if text.contains(&claimed) {
        true
    } else {
        match parts.as_slice() {
            [single] => part_evidenced(single, &candidates, &text),
            [first, .., last] => {
                part_evidenced(first, &candidates, &text) && part_evidenced(last, &candidates, &text)
            }
            [] => false,
        }
    };

    IdentityMatch {
        verified,
        found_names: candidates,
    }
}

fn part_evidenced(part: &str, candidates: &[String], normalized_text: &str) -> bool {
    candidates
        .iter()
        .any(|candidate| candidate.to_lowercase().contains(part))
        || normalized_text.contains(part)
}
