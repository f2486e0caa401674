/// Splits a comma separated keyword or tag list, dropping blanks.
pub fn parse_keywords(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|keyword| keyword.trim().to_string())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}

pub fn join_keywords(keywords: &[String]) -> String {
    keywords.join(", ")
}

/// Truncates to at most `max` characters on a character boundary.
pub fn truncate_chars(input: &str, max: usize) -> String {
    if input.chars().count() <= max {
        return input.to_string();
    }

    input.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_trimmed_and_blanks_dropped() {
        let keywords = parse_keywords(" podcast ,, player ,offline , ");
        assert_eq!(keywords, vec!["podcast", "player", "offline"]);
    }

    #[test]
    fn empty_input_yields_no_keywords() {
        assert!(parse_keywords("").is_empty());
        assert!(parse_keywords(" , , ").is_empty());
    }

    #[test]
    fn keywords_rejoin_with_single_spacing() {
        let keywords = parse_keywords("a,b , c");
        assert_eq!(join_keywords(&keywords), "a, b, c");
    }

    #[test]
    fn truncation_respects_character_boundaries() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
    }
}
