/// Strip everything except letters and whitespace, then collapse whitespace
/// runs. Applied to both claimed names and OCR text before any substring
/// comparison.
pub fn normalize_letters(input: &str) -> String {
    let letters_only: String = input
        .chars()
        .filter(|ch| ch.is_ascii_alphabetic() || ch.is_whitespace())
        .collect();

    letters_only.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_punctuation_and_digits() {
        assert_eq!(normalize_letters("J. Smith, ID 8204-117"), "J Smith ID");
    }

    #[test]
    fn removal_joins_characters_within_a_token() {
        assert_eq!(normalize_letters("O'Brien"), "OBrien");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize_letters("  John \t  Student \n"), "John Student");
    }

    #[test]
    fn symbol_only_input_becomes_empty() {
        assert_eq!(normalize_letters("12345 --- !!"), "");
    }
}
