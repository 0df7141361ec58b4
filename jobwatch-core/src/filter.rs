//! Title keyword filter

/// Returns true when `title` contains any of `keywords`, ignoring case
///
/// An empty keyword list matches every title.
pub fn matches<S: AsRef<str>>(title: &str, keywords: &[S]) -> bool {
    if keywords.is_empty() {
        return true;
    }

    let title = title.to_lowercase();
    keywords
        .iter()
        .any(|keyword| title.contains(&keyword.as_ref().to_lowercase()))
}

/// Keyword list configured for a scanner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    /// Keywords are stored lower-cased; blank entries are dropped
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn matches(&self, title: &str) -> bool {
        matches(title, &self.keywords)
    }
}
