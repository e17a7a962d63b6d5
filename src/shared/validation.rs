use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating media reference strings returned by the storage
    /// collaborator. Opaque keys: path-like segments of alphanumerics,
    /// dots, underscores and hyphens.
    /// - Valid: "uploads/2024/pothole-1.jpg", "a1b2c3.png"
    /// - Invalid: "/leading-slash", "a//b", "spaces in key"
    pub static ref MEDIA_REF_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*(?:/[A-Za-z0-9][A-Za-z0-9._-]*)*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_ref_regex_valid() {
        assert!(MEDIA_REF_REGEX.is_match("uploads/2024/pothole-1.jpg"));
        assert!(MEDIA_REF_REGEX.is_match("a1b2c3.png"));
        assert!(MEDIA_REF_REGEX.is_match("reports/abc_def/IMG-0001.jpeg"));
        assert!(MEDIA_REF_REGEX.is_match("x"));
    }

    #[test]
    fn test_media_ref_regex_invalid() {
        assert!(!MEDIA_REF_REGEX.is_match("/leading-slash"));
        assert!(!MEDIA_REF_REGEX.is_match("trailing/"));
        assert!(!MEDIA_REF_REGEX.is_match("a//b"));
        assert!(!MEDIA_REF_REGEX.is_match("spaces in key"));
        assert!(!MEDIA_REF_REGEX.is_match(""));
        assert!(!MEDIA_REF_REGEX.is_match(".hidden"));
    }
}
