//! Well-known level tags. Tags are free-form; these are just the common ones.

pub const ERROR: &str = "ERROR";
pub const WARNING: &str = "WARNING";
pub const INFO: &str = "INFO";
pub const DEBUG: &str = "DEBUG";
/// Tag applied to stderr lines captured in framed mode.
pub const STDERR: &str = "STDERR";

/// Longest tag accepted by [`is_valid_tag`].
pub const MAX_TAG_LEN: usize = 16;

/// A tag is usable when it is non-empty, short, and cannot break the
/// `[<level>]` framing (no whitespace, no brackets).
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag.len() <= MAX_TAG_LEN
        && !tag
            .chars()
            .any(|c| c.is_whitespace() || c == '[' || c == ']')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ERROR, true)]
    #[case(WARNING, true)]
    #[case("audit", true)]
    #[case("", false)]
    #[case("TWO WORDS", false)]
    #[case("[ERROR]", false)]
    #[case("tab\there", false)]
    #[case("AVERYLONGTAGNAMEXX", false)]
    fn tag_validation(#[case] tag: &str, #[case] ok: bool) {
        assert_eq!(is_valid_tag(tag), ok, "tag {tag:?}");
    }
}
