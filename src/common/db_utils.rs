// src/common/db_utils.rs

/// Turns free text into a `LIKE`/`ILIKE` pattern that matches it as a literal
/// substring. Must be paired with `ESCAPE '\'` in the query.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn plain_text_is_wrapped() {
        assert_eq!(contains_pattern("gmail"), "%gmail%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn metacharacters_are_escaped() {
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern(r"c:\x"), r"%c:\\x%");
    }
}
