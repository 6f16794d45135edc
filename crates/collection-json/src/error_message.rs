//! Error payload carried by an error document.

use std::fmt;

/// `title`, `code` and `message` of an `error` object.
///
/// [`ErrorMessage::EMPTY`] stands for an error object that was present but
/// carried nothing informative. A document without any error object never
/// produces an `ErrorMessage` at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ErrorMessage {
    title: Option<String>,
    code: Option<String>,
    message: Option<String>,
}

impl ErrorMessage {
    pub const EMPTY: ErrorMessage = ErrorMessage {
        title: None,
        code: None,
        message: None,
    };

    pub fn new(title: Option<String>, code: Option<String>, message: Option<String>) -> Self {
        Self {
            title,
            code,
            message,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// True when every field is absent or blank.
    pub fn is_empty(&self) -> bool {
        [&self.title, &self.code, &self.message]
            .iter()
            .all(|field| is_blank(field.as_deref()))
    }
}

pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = self.code() {
            write!(f, "[{code}] ")?;
        }
        f.write_str(self.title().unwrap_or("error"))?;
        if let Some(message) = self.message() {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_count_as_empty() {
        let msg = ErrorMessage::new(Some("  ".into()), None, Some("\n".into()));
        assert!(msg.is_empty());
        assert!(ErrorMessage::EMPTY.is_empty());
        assert!(!ErrorMessage::new(None, Some("404".into()), None).is_empty());
    }

    #[test]
    fn display_includes_available_fields() {
        let msg = ErrorMessage::new(
            Some("Not Found".into()),
            Some("404".into()),
            Some("no such item".into()),
        );
        assert_eq!(msg.to_string(), "[404] Not Found: no such item");
        assert_eq!(ErrorMessage::EMPTY.to_string(), "error");
    }
}
