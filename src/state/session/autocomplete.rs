use crate::util::sanitize_command;

/// First candidate that starts with `text`, byte for byte. No fuzzy matching.
pub fn find_completion<'a>(text: &str, candidates: &'a [String]) -> Option<(usize, &'a str)> {
    candidates
        .iter()
        .enumerate()
        .find(|(_, candidate)| candidate.starts_with(text))
        .map(|(idx, candidate)| (idx, candidate.as_str()))
}

/// Remainder of `suggestion` past the typed `command`, or `None` if the
/// suggestion went stale (no longer extends what was typed) or is empty.
pub fn suggestion_remainder(command: &str, suggestion: &str) -> Option<String> {
    let command = sanitize_command(command);
    let suggestion = sanitize_command(suggestion);
    if suggestion.is_empty() {
        return None;
    }
    suggestion
        .strip_prefix(command.as_str())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<String> {
        vec![
            "curl http://o/api/me".to_string(),
            "curl http://o/api/me/bio".to_string(),
            "curl http://o/api/me/experience".to_string(),
        ]
    }

    #[test]
    fn test_find_completion_returns_first_prefix_match() {
        let list = candidates();
        assert_eq!(find_completion("c", &list), Some((0, "curl http://o/api/me")));
        assert_eq!(find_completion("", &list), Some((0, "curl http://o/api/me")));
        assert_eq!(
            find_completion("curl http://o/api/me/e", &list),
            Some((2, "curl http://o/api/me/experience"))
        );
    }

    #[test]
    fn test_find_completion_is_case_sensitive_and_exact() {
        let list = candidates();
        assert_eq!(find_completion("Curl", &list), None);
        assert_eq!(find_completion("crl", &list), None);
        assert_eq!(find_completion("curl http://o/api/me/bio/x", &list), None);
    }

    #[test]
    fn test_remainder_hides_stale_suggestions() {
        assert_eq!(
            suggestion_remainder("cu", "curl x").as_deref(),
            Some("rl x")
        );
        assert_eq!(suggestion_remainder("curl x", "curl x").as_deref(), Some(""));
        assert_eq!(suggestion_remainder("ls", "curl x"), None);
        assert_eq!(suggestion_remainder("", ""), None);
    }

    #[test]
    fn test_remainder_sanitizes_both_sides() {
        assert_eq!(
            suggestion_remainder("\u{200B}curl\u{00A0}", "curl x").as_deref(),
            Some("x")
        );
    }
}
