//! Phone number normalization.
//!
//! The phone number is the only key used to match a placeholder identity created by an admin
//! with the real user who signs up later, so both sides are normalized the same way before
//! being compared or stored.

/// Returns the normalized form of the provided phone number.
///
/// Every non-digit character is removed. If the result has 11 digits and starts with `1`
/// (the North American country code), the leading `1` is dropped.
///
/// The function is idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    match digits.strip_prefix('1') {
        Some(national) if digits.len() == 11 => national.to_owned(),
        _ => digits,
    }
}

/// Returns whether both phone numbers are present and equal once normalized.
///
/// A missing or empty number never matches anything, not even another missing one.
pub fn same_number(a: Option<&str>, b: Option<&str>) -> bool {
    match (a.map(normalize), b.map(normalize)) {
        (Some(a), Some(b)) => !a.is_empty() && a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize, same_number};

    #[test]
    fn strips_formatting() {
        assert_eq!(normalize("(787) 555-1234"), "7875551234");
        assert_eq!(normalize("787.555.1234"), "7875551234");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("n/a"), "");
    }

    #[test]
    fn drops_country_code() {
        assert_eq!(normalize("+1 787 555 1234"), "7875551234");
        assert_eq!(normalize("17875551234"), "7875551234");
        // Not a country code: the number doesn't have 11 digits.
        assert_eq!(normalize("1555123"), "1555123");
        assert_eq!(normalize("+44 20 7946 0958"), "442079460958");
    }

    #[test]
    fn idempotent() {
        for raw in [
            "+1 (787) 555-1234",
            "11234567890",
            "111234567890",
            "1",
            "",
            "+33 6 12 34 56 78",
            "1-1-1-1-1-1-1-1-1-1-1",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "normalize isn't idempotent for `{raw}`");
        }
    }

    #[test]
    fn matching() {
        assert!(same_number(Some("7875551234"), Some("+1 787-555-1234")));
        assert!(!same_number(Some("7875551234"), Some("7875551235")));
        assert!(!same_number(None, Some("7875551234")));
        assert!(!same_number(None, None));
        assert!(!same_number(Some(""), Some("--")));
    }
}
