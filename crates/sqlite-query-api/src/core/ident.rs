//! Identifier helpers shared by every component that compares or emits
//! column and table names.

/// Case-insensitive name equality with Unicode lowercase folding, so
/// `Élan` and `élan` name the same column.
pub fn eq_fold(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
        || a.chars()
            .flat_map(char::to_lowercase)
            .eq(b.chars().flat_map(char::to_lowercase))
}

/// Returns the whitelisted spelling of `needle`, if present.
pub fn find_fold<'a, S: AsRef<str>>(haystack: &'a [S], needle: &str) -> Option<&'a str> {
    haystack
        .iter()
        .map(AsRef::as_ref)
        .find(|candidate| eq_fold(candidate, needle))
}

pub fn contains_fold<S: AsRef<str>>(haystack: &[S], needle: &str) -> bool {
    find_fold(haystack, needle).is_some()
}

pub fn is_safe_identifier(s: &str) -> bool {
    // Minimal safe subset: [A-Za-z_][A-Za-z0-9_]*
    let mut chars = s.chars();
    let Some(first) = chars.next() else { return false };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// https://www.sqlite.org/lang_keywords.html
const SQLITE_KEYWORDS: &[&str] = &[
    "ABORT", "ACTION", "ADD", "AFTER", "ALL", "ALTER", "ALWAYS", "ANALYZE", "AND", "AS", "ASC",
    "ATTACH", "AUTOINCREMENT", "BEFORE", "BEGIN", "BETWEEN", "BY", "CASCADE", "CASE", "CAST",
    "CHECK", "COLLATE", "COLUMN", "COMMIT", "CONFLICT", "CONSTRAINT", "CREATE", "CROSS",
    "CURRENT", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "DATABASE", "DEFAULT",
    "DEFERRABLE", "DEFERRED", "DELETE", "DESC", "DETACH", "DISTINCT", "DO", "DROP", "EACH",
    "ELSE", "END", "ESCAPE", "EXCEPT", "EXCLUDE", "EXCLUSIVE", "EXISTS", "EXPLAIN", "FAIL",
    "FILTER", "FIRST", "FOLLOWING", "FOR", "FOREIGN", "FROM", "FULL", "GENERATED", "GLOB",
    "GROUP", "GROUPS", "HAVING", "IF", "IGNORE", "IMMEDIATE", "IN", "INDEX", "INDEXED",
    "INITIALLY", "INNER", "INSERT", "INSTEAD", "INTERSECT", "INTO", "IS", "ISNULL", "JOIN",
    "KEY", "LAST", "LEFT", "LIKE", "LIMIT", "MATCH", "MATERIALIZED", "NATURAL", "NO", "NOT",
    "NOTHING", "NOTNULL", "NULL", "NULLS", "OF", "OFFSET", "ON", "OR", "ORDER", "OTHERS",
    "OUTER", "OVER", "PARTITION", "PLAN", "PRAGMA", "PRECEDING", "PRIMARY", "QUERY", "RAISE",
    "RANGE", "RECURSIVE", "REFERENCES", "REGEXP", "REINDEX", "RELEASE", "RENAME", "REPLACE",
    "RESTRICT", "RETURNING", "RIGHT", "ROLLBACK", "ROW", "ROWS", "SAVEPOINT", "SELECT", "SET",
    "TABLE", "TEMP", "TEMPORARY", "THEN", "TIES", "TO", "TRANSACTION", "TRIGGER", "UNBOUNDED",
    "UNION", "UNIQUE", "UPDATE", "USING", "VACUUM", "VALUES", "VIEW", "VIRTUAL", "WHEN",
    "WHERE", "WINDOW", "WITH", "WITHOUT",
];

fn is_keyword(s: &str) -> bool {
    SQLITE_KEYWORDS.iter().any(|k| eq_fold(k, s))
}

/// Renders an identifier for statement text: bare when it is a plain,
/// non-keyword identifier, double-quoted otherwise.
pub fn quote_ident(s: &str) -> String {
    if is_safe_identifier(s) && !is_keyword(s) {
        s.to_string()
    } else {
        format!("\"{}\"", s.replace('"', "\"\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_matching_ignores_case() {
        let cols = vec!["Name".to_string(), "price".to_string()];
        assert_eq!(find_fold(&cols, "name"), Some("Name"));
        assert_eq!(find_fold(&cols, "PRICE"), Some("price"));
        assert_eq!(find_fold(&cols, "stock"), None);
        assert!(contains_fold(&cols, "nAmE"));
        assert!(!contains_fold(&cols, "nam"));
    }

    #[test]
    fn fold_matching_covers_non_ascii() {
        let cols = vec!["Élan".to_string(), "straße".to_string()];
        assert_eq!(find_fold(&cols, "élan"), Some("Élan"));
        assert_eq!(find_fold(&cols, "STRAßE"), Some("straße"));
        assert!(!eq_fold("élan", "elan"));
    }

    #[test]
    fn safe_identifiers() {
        assert!(is_safe_identifier("products"));
        assert!(is_safe_identifier("_tmp1"));
        assert!(!is_safe_identifier(""));
        assert!(!is_safe_identifier("1abc"));
        assert!(!is_safe_identifier("users; DROP TABLE x"));
        assert!(!is_safe_identifier("first name"));
    }

    #[test]
    fn quoting_only_when_needed() {
        assert_eq!(quote_ident("price"), "price");
        assert_eq!(quote_ident("unit price"), "\"unit price\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(quote_ident("order"), "\"order\"");
        assert_eq!(quote_ident("Limit"), "\"Limit\"");
    }
}
