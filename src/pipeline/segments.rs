/// Splits pasted text into candidate messages.
///
/// Returns `None` when the text is empty after trimming. Otherwise every
/// `'\n'`-delimited segment of the trimmed text is kept, blank ones included,
/// with a single trailing `'\r'` removed from each.
pub fn split_messages(raw: &str) -> Option<Vec<&str>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(
        trimmed
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_rejected() {
        assert_eq!(split_messages(""), None);
        assert_eq!(split_messages("   "), None);
        assert_eq!(split_messages("\n\t\r\n "), None);
    }

    #[test]
    fn interior_blank_lines_are_kept() {
        assert_eq!(
            split_messages("Hello\n\nWorld").unwrap(),
            vec!["Hello", "", "World"]
        );
        assert_eq!(
            split_messages("Hello\n   \nWorld").unwrap(),
            vec!["Hello", "   ", "World"]
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_before_splitting() {
        assert_eq!(split_messages("\n  Hello\n\n").unwrap(), vec!["Hello"]);
    }

    #[test]
    fn crlf_matches_lf() {
        assert_eq!(
            split_messages("Win a prize\r\nSee you\r\n").unwrap(),
            split_messages("Win a prize\nSee you\n").unwrap()
        );
    }
}
