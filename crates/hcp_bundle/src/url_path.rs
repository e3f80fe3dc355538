use crate::error::{Error, Result};
use std::borrow::Borrow;
use std::fmt;

/// An absolute URL path under which a bundle serves an asset.
///
/// Always starts with `/` and never carries a query string or fragment, so two
/// spellings of the same resource cannot end up as separate map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlPath(String);

impl UrlPath {
    pub fn parse(path: impl AsRef<str>) -> Result<Self> {
        let path = path.as_ref();
        if !path.starts_with('/') || path.contains(['?', '#']) {
            return Err(Error::InvalidUrlPath(path.to_string()));
        }

        Ok(Self(path.to_string()))
    }

    /// The URL path of a bundle's entry document.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UrlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UrlPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute_path() {
        let path = UrlPath::parse("/app/app.js").unwrap();
        assert_eq!(path.as_str(), "/app/app.js");
        assert_eq!(path.to_string(), "/app/app.js");
    }

    #[test]
    fn test_root() {
        assert_eq!(UrlPath::root(), UrlPath::parse("/").unwrap());
    }

    #[test]
    fn test_rejects_relative_path() {
        assert!(matches!(
            UrlPath::parse("app/app.js"),
            Err(Error::InvalidUrlPath(p)) if p == "app/app.js"
        ));
        assert!(UrlPath::parse("").is_err());
    }

    #[test]
    fn test_rejects_query_and_fragment() {
        assert!(UrlPath::parse("/app.js?hash=1").is_err());
        assert!(UrlPath::parse("/index.html#top").is_err());
    }
}
