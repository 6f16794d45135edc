//! Format version of a document.

use std::fmt;

/// Recognised format versions. Parsing never fails: absent or unknown
/// version strings fall back to [`Version::default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Version {
    #[default]
    One,
}

impl Version {
    pub const ALL: [Version; 1] = [Version::One];

    pub fn as_str(&self) -> &'static str {
        match self {
            Version::One => "1.0",
        }
    }

    /// Exact match against a known tag, `None` otherwise.
    pub fn recognize(tag: &str) -> Option<Version> {
        Self::ALL.into_iter().find(|v| v.as_str() == tag.trim())
    }

    pub fn parse(tag: Option<&str>) -> Version {
        tag.and_then(Version::recognize).unwrap_or_default()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_falls_back_to_default() {
        assert_eq!(Version::parse(Some("1.0")), Version::One);
        assert_eq!(Version::parse(Some(" 1.0 ")), Version::One);
        assert_eq!(Version::parse(Some("2.5")), Version::One);
        assert_eq!(Version::parse(None), Version::One);
        assert_eq!(Version::recognize("2.5"), None);
    }
}
