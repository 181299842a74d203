//! Slug shape validation shared across domain entities.

pub(crate) fn is_valid_slug(value: &str) -> bool {
    is_trimmed_non_empty(value) && has_allowed_slug_chars(value)
}

fn is_trimmed_non_empty(value: &str) -> bool {
    !value.is_empty() && value.trim() == value
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::is_valid_slug;

    #[rstest]
    #[case("vuejs-3-masterclass", true)]
    #[case("sante", true)]
    #[case("", false)]
    #[case(" padded ", false)]
    #[case("Upper-Case", false)]
    #[case("under_score", false)]
    fn slug_shapes(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(value), expected);
    }
}
