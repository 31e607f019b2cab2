//! Hashtag cell normalization.
//!
//! The crawler stores each product's hashtags as a stringified list, e.g.
//! `[맛있는, 신선한]`. Cells may also be missing, hold only the empty-list
//! marker `[]`, or carry stray brackets and padding around individual tags.

pub const TAG_SEPARATOR: char = ',';
pub const EMPTY_LIST_MARKER: &str = "[]";

fn is_artifact(c: char) -> bool {
    c == '[' || c == ']' || c.is_whitespace()
}

/// Strips bracket and whitespace artifacts from one tag substring.
/// Returns `None` when nothing is left.
pub fn clean_tag(raw: &str) -> Option<&str> {
    if raw == EMPTY_LIST_MARKER {
        return None;
    }

    let cleaned = raw.trim_matches(is_artifact);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Iterates the normalized tokens of a present cell, in their original order.
pub fn tokens(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(TAG_SEPARATOR).filter_map(clean_tag)
}

/// Normalizes one raw hashtag cell. A missing cell yields no tokens.
pub fn normalize_cell(cell: Option<&str>) -> Vec<String> {
    match cell {
        Some(cell) => tokens(cell).map(str::to_string).collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_empty_cells() {
        assert!(normalize_cell(None).is_empty());
        assert!(normalize_cell(Some("")).is_empty());
        assert!(normalize_cell(Some("[]")).is_empty());
        assert!(normalize_cell(Some("[ ]")).is_empty());
        assert!(normalize_cell(Some("  ")).is_empty());
    }

    #[test]
    fn test_list_cells() {
        assert_eq!(normalize_cell(Some("[맛있는, 신선한]")), vec!["맛있는", "신선한"]);
        assert_eq!(normalize_cell(Some("[신선한]")), vec!["신선한"]);
        assert_eq!(
            normalize_cell(Some("[ 국내산 ,  무항생제,간편식 ]")),
            vec!["국내산", "무항생제", "간편식"]
        );
    }

    #[test]
    fn test_separator_artifacts() {
        // Leading, trailing and doubled separators never produce empty tokens
        assert_eq!(normalize_cell(Some(",[가성비],,")), vec!["가성비"]);
        assert_eq!(normalize_cell(Some("[], 대용량")), vec!["대용량"]);
        assert_eq!(normalize_cell(Some("[,]")), Vec::<String>::new());
    }

    #[test]
    fn test_malformed_brackets() {
        assert_eq!(normalize_cell(Some("[[유기농, 저당")), vec!["유기농", "저당"]);
        assert_eq!(normalize_cell(Some("유기농]]")), vec!["유기농"]);
        assert_eq!(normalize_cell(Some("]][[")), Vec::<String>::new());
    }

    #[test]
    fn test_inner_text_is_untouched() {
        // Only the ends are trimmed; inner brackets, spaces and case survive
        assert_eq!(normalize_cell(Some("[Big Size, a[b]c]")), vec!["Big Size", "a[b]c"]);
        assert_eq!(normalize_cell(Some("[\u{3000}おいしい\t, Café ]")), vec!["おいしい", "Café"]);
    }

    #[test]
    fn test_tokens_are_never_empty() {
        let cells = ["", "[]", ",", "[ , , ]", "[a,,b]", " ] [ ", "[가, 나 ,다 ]", "\n,\t"];
        for cell in cells {
            assert!(tokens(cell).all(|t| !t.is_empty()), "empty token from {:?}", cell);
        }
    }
}
