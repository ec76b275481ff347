//! Text Matching Helpers
//!
//! Message cleaning and boundary-anchored phrase matching shared by the
//! catalog, classifier, resolver, and chart rules. Matching is always done
//! against cleaned text so the alias table and the pattern tables never have
//! to worry about case or punctuation.

/// Lowercase and strip punctuation other than `$`, `.` and `-`, collapsing
/// runs of whitespace. "What's AAPL doing?" becomes "what s aapl doing".
pub fn clean_message(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut cleaned = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        if ch.is_alphanumeric() || matches!(ch, '$' | '.' | '-') {
            cleaned.push(ch);
        } else {
            cleaned.push(' ');
        }
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip the cashtag prefix and trailing sentence punctuation from a single
/// token before comparing it to an alias ("$aapl" and "aapl." both match
/// "aapl").
pub(crate) fn normalize_token(token: &str) -> &str {
    token
        .trim_start_matches('$')
        .trim_end_matches(['.', '-'])
}

/// Find `phrase` inside `cleaned` anchored at word boundaries, so a short
/// alias never fires inside an unrelated longer word. Returns the byte
/// offset of the first anchored occurrence.
pub(crate) fn find_phrase(cleaned: &str, phrase: &str) -> Option<usize> {
    if phrase.is_empty() {
        return None;
    }
    let mut from = 0;
    while let Some(pos) = cleaned[from..].find(phrase) {
        let start = from + pos;
        let end = start + phrase.len();
        let before_ok = start == 0
            || !cleaned[..start]
                .chars()
                .next_back()
                .is_some_and(char::is_alphanumeric);
        let after_ok = end == cleaned.len()
            || !cleaned[end..].chars().next().is_some_and(char::is_alphanumeric);
        if before_ok && after_ok {
            return Some(start);
        }
        from = start + 1;
    }
    None
}

pub(crate) fn phrase_matches(cleaned: &str, phrase: &str) -> bool {
    find_phrase(cleaned, phrase).is_some()
}

/// Tokens of a cleaned message together with their byte offsets
pub(crate) fn token_spans(cleaned: &str) -> Vec<(usize, &str)> {
    cleaned
        .split_whitespace()
        .map(|tok| (tok.as_ptr() as usize - cleaned.as_ptr() as usize, tok))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_message() {
        assert_eq!(clean_message("What's AAPL doing?"), "what s aapl doing");
        assert_eq!(clean_message("  bitcoin!!  "), "bitcoin");
        assert_eq!(clean_message("$AAPL vs. $MSFT"), "$aapl vs. $msft");
        assert_eq!(clean_message("S&P 500"), "s p 500");
        assert_eq!(clean_message("   "), "");
    }

    #[test]
    fn test_phrase_anchored_at_boundaries() {
        assert!(phrase_matches("what is amd doing", "amd"));
        // Never inside an unrelated longer word
        assert!(!phrase_matches("the amdahl corporation", "amd"));
        assert!(phrase_matches("general motors stock", "general motors"));
        assert!(!phrase_matches("generally motorsport", "general motors"));
    }

    #[test]
    fn test_phrase_at_edges() {
        assert!(phrase_matches("gold", "gold"));
        assert!(phrase_matches("gold price", "gold"));
        assert!(phrase_matches("price of gold", "gold"));
    }

    #[test]
    fn test_normalize_token() {
        assert_eq!(normalize_token("$aapl"), "aapl");
        assert_eq!(normalize_token("msft."), "msft");
        assert_eq!(normalize_token("btc"), "btc");
    }
}
