use crate::error::{AppError, AppResult};

/// Merges a request-supplied limit with the configured default.
///
/// The request value wins when present; an empty value counts as absent.
/// Zero or a negative number from either source means no limit. Values are
/// signed 64-bit, the range SQLite accepts in `LIMIT`.
pub fn effective_limit(requested: Option<&str>, default_limit: i64) -> AppResult<Option<i64>> {
    let n = match requested.filter(|s| !s.is_empty()) {
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| AppError::InvalidLimit(raw.to_string()))?,
        None => default_limit,
    };
    Ok((n > 0).then_some(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_everywhere_is_unbounded() {
        assert_eq!(effective_limit(None, 0).unwrap(), None);
        assert_eq!(effective_limit(Some(""), 0).unwrap(), None);
    }

    #[test]
    fn request_overrides_default() {
        assert_eq!(effective_limit(Some("5"), 50).unwrap(), Some(5));
        assert_eq!(effective_limit(Some("0"), 50).unwrap(), None);
        assert_eq!(effective_limit(None, 50).unwrap(), Some(50));
    }

    #[test]
    fn negative_means_unbounded() {
        assert_eq!(effective_limit(Some("-1"), 50).unwrap(), None);
        assert_eq!(effective_limit(None, -3).unwrap(), None);
    }

    #[test]
    fn accepts_the_full_signed_range() {
        assert_eq!(
            effective_limit(Some("9223372036854775807"), 0).unwrap(),
            Some(i64::MAX)
        );
    }

    #[test]
    fn garbage_is_rejected() {
        for raw in ["ten", "1.5", "5x", "10000000000000000000", "9223372036854775808"] {
            let err = effective_limit(Some(raw), 0).unwrap_err();
            assert!(matches!(err, AppError::InvalidLimit(_)), "{raw}");
        }
    }
}
