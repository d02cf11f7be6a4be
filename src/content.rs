use chrono::{DateTime, Utc};
use serde::Serialize;

/// The result of one scrape attempt. Built only through the constructors,
/// so the invariants hold: a successful record carries no error, a failed
/// record carries no text and no timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapedContent {
    pub text: String,
    pub url: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub status: bool,
    pub error: String,
    pub title: String,
    /// Wikipedia path only: heading text paired with the joined paragraph
    /// text of that section, in document order.
    pub sections: Option<Vec<(String, String)>>,
}

impl ScrapedContent {
    pub fn success(
        url: &str,
        title: String,
        text: String,
        sections: Option<Vec<(String, String)>>,
    ) -> Self {
        ScrapedContent {
            text,
            url: url.to_string(),
            timestamp: Some(Utc::now()),
            status: true,
            error: String::new(),
            title,
            sections,
        }
    }

    pub fn failure(url: &str, error: impl Into<String>) -> Self {
        ScrapedContent {
            text: String::new(),
            url: url.to_string(),
            timestamp: None,
            status: false,
            error: error.into(),
            title: String::new(),
            sections: None,
        }
    }
}

/// Single-slot session state: the most recently attempted scrape. Failed
/// records are kept too, so the caller can read the reason back.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<ScrapedContent>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Drops whatever was scraped before. Idempotent.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Every attempt lands here, success or failure; the previous record is
    /// replaced as a whole value.
    pub fn store(&mut self, content: ScrapedContent) {
        self.current = Some(content);
    }

    pub fn current(&self) -> Option<&ScrapedContent> {
        self.current.as_ref()
    }

    /// Cloned snapshot for use outside the session lock.
    pub fn snapshot(&self) -> Option<ScrapedContent> {
        self.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_record_has_no_error() {
        let content = ScrapedContent::success(
            "https://example.com",
            "Example".to_string(),
            "body text".to_string(),
            None,
        );
        assert!(content.status);
        assert!(content.error.is_empty());
        assert!(content.timestamp.is_some());
    }

    #[test]
    fn failed_record_has_no_text_or_timestamp() {
        let content = ScrapedContent::failure("https://example.com", "it broke");
        assert!(!content.status);
        assert!(content.text.is_empty());
        assert!(content.timestamp.is_none());
        assert_eq!(content.error, "it broke");
    }

    #[test]
    fn session_keeps_the_latest_attempt() {
        let mut session = Session::new();
        assert!(session.current().is_none());

        session.store(ScrapedContent::failure("https://a.example", "nope"));
        assert!(!session.current().unwrap().status);

        session.store(ScrapedContent::success(
            "https://b.example",
            String::new(),
            "text".to_string(),
            None,
        ));
        assert_eq!(session.current().unwrap().url, "https://b.example");

        session.clear();
        assert!(session.current().is_none());
    }
}
